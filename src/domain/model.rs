use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// 轉換後的單位
    pub fn target(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnit(pub String);

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown temperature unit '{}'", self.0)
    }
}

impl std::error::Error for UnknownUnit {}

impl FromStr for TemperatureUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "celsius" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

/// 遠端服務提供的兩個操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOperation {
    FahrenheitToCelsius,
    CelsiusToFahrenheit,
}

impl ConversionOperation {
    pub const ALL: [ConversionOperation; 2] = [
        ConversionOperation::FahrenheitToCelsius,
        ConversionOperation::CelsiusToFahrenheit,
    ];

    pub fn from_unit(unit: TemperatureUnit) -> Self {
        match unit {
            TemperatureUnit::Fahrenheit => ConversionOperation::FahrenheitToCelsius,
            TemperatureUnit::Celsius => ConversionOperation::CelsiusToFahrenheit,
        }
    }

    /// Operation name as declared by the remote service.
    pub fn name(self) -> &'static str {
        match self {
            ConversionOperation::FahrenheitToCelsius => "FahrenheitToCelsius",
            ConversionOperation::CelsiusToFahrenheit => "CelsiusToFahrenheit",
        }
    }

    /// Name of the single string parameter the operation takes.
    pub fn parameter(self) -> &'static str {
        match self {
            ConversionOperation::FahrenheitToCelsius => "Fahrenheit",
            ConversionOperation::CelsiusToFahrenheit => "Celsius",
        }
    }

    pub fn source(self) -> TemperatureUnit {
        match self {
            ConversionOperation::FahrenheitToCelsius => TemperatureUnit::Fahrenheit,
            ConversionOperation::CelsiusToFahrenheit => TemperatureUnit::Celsius,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub original: String,
    pub converted: String,
    pub from_unit: TemperatureUnit,
    pub to_unit: TemperatureUnit,
}

impl ConversionResponse {
    pub fn new(original: String, converted: String, from_unit: TemperatureUnit) -> Self {
        Self {
            original,
            converted,
            from_unit,
            to_unit: from_unit.target(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub temperatures: Vec<String>,
    // 保留原始字串，讓 HTTP 層回傳 400 而不是解碼錯誤
    #[serde(alias = "from_unit")]
    pub from_unit: String,
}

/// Outcome of converting one batch element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchItem {
    Converted {
        input: String,
        output: String,
        from: TemperatureUnit,
    },
    Failed {
        input: String,
        message: String,
    },
}

impl BatchItem {
    pub fn is_converted(&self) -> bool {
        matches!(self, BatchItem::Converted { .. })
    }
}

impl fmt::Display for BatchItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchItem::Converted {
                input,
                output,
                from,
            } => write!(
                f,
                "{}{} = {}{}",
                input,
                from.symbol(),
                output,
                from.target().symbol()
            ),
            BatchItem::Failed { input, message } => {
                write!(f, "Error converting {}: {}", input, message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub results: Vec<String>,
    pub total_converted: usize,
    pub total_errors: usize,
}

impl BatchResult {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let total_converted = items.iter().filter(|item| item.is_converted()).count();
        Self {
            results: items.iter().map(ToString::to_string).collect(),
            total_converted,
            total_errors: items.len() - total_converted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: ServiceState,
    pub remote_available: bool,
    pub version: String,
}

impl HealthStatus {
    pub fn new(remote_available: bool) -> Self {
        Self {
            status: if remote_available {
                ServiceState::Healthy
            } else {
                ServiceState::Degraded
            },
            remote_available,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
