use crate::config::RemoteSettings;
use crate::domain::model::ConversionOperation;
use crate::domain::ports::TemperatureConverter;
use crate::utils::error::{GatewayError, RemoteCallError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

// ---- service description (WSDL) ----

#[derive(Debug, Deserialize)]
struct Definitions {
    #[serde(rename = "@targetNamespace", default)]
    target_namespace: String,
    #[serde(rename = "portType", default)]
    port_types: Vec<PortType>,
    #[serde(rename = "binding", default)]
    bindings: Vec<Binding>,
    #[serde(rename = "service", default)]
    services: Vec<WsdlService>,
}

#[derive(Debug, Deserialize)]
struct PortType {
    #[serde(rename = "operation", default)]
    operations: Vec<NamedOperation>,
}

#[derive(Debug, Deserialize)]
struct NamedOperation {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct Binding {
    #[serde(rename = "operation", default)]
    operations: Vec<BindingOperation>,
}

#[derive(Debug, Deserialize)]
struct BindingOperation {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "operation")]
    soap: Option<SoapOperation>,
}

#[derive(Debug, Deserialize)]
struct SoapOperation {
    #[serde(rename = "@soapAction", default)]
    soap_action: String,
}

#[derive(Debug, Deserialize)]
struct WsdlService {
    #[serde(rename = "port", default)]
    ports: Vec<WsdlPort>,
}

#[derive(Debug, Deserialize)]
struct WsdlPort {
    address: Option<WsdlAddress>,
}

#[derive(Debug, Deserialize)]
struct WsdlAddress {
    #[serde(rename = "@location")]
    location: String,
}

/// What the gateway needs to know about the remote service, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    pub namespace: String,
    pub address: Option<String>,
    pub operations: Vec<String>,
    soap_actions: Vec<(String, String)>,
}

impl ServiceDescription {
    pub fn parse(xml: &str) -> Result<Self> {
        let definitions: Definitions = quick_xml::de::from_str(xml)?;

        let operations = definitions
            .port_types
            .iter()
            .flat_map(|pt| pt.operations.iter().map(|op| op.name.clone()))
            .collect();

        let soap_actions = definitions
            .bindings
            .iter()
            .flat_map(|b| b.operations.iter())
            .filter_map(|op| {
                let action = op.soap.as_ref()?.soap_action.trim();
                (!action.is_empty()).then(|| (op.name.clone(), action.to_string()))
            })
            .collect();

        let address = definitions
            .services
            .iter()
            .flat_map(|s| s.ports.iter())
            .find_map(|p| p.address.as_ref().map(|a| a.location.clone()));

        Ok(Self {
            namespace: definitions.target_namespace,
            address,
            operations,
            soap_actions,
        })
    }

    /// 確認遠端服務宣告了需要的操作
    pub fn require(&self, operations: &[ConversionOperation]) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(GatewayError::BindingError {
                message: "service description has no targetNamespace".to_string(),
            });
        }
        for op in operations {
            if !self.operations.iter().any(|name| name == op.name()) {
                return Err(GatewayError::BindingError {
                    message: format!("remote service does not declare operation {}", op.name()),
                });
            }
        }
        Ok(())
    }

    pub fn soap_action(&self, operation: ConversionOperation) -> String {
        self.soap_actions
            .iter()
            .find(|(name, _)| name == operation.name())
            .map(|(_, action)| action.clone())
            .unwrap_or_else(|| {
                if self.namespace.ends_with('/') {
                    format!("{}{}", self.namespace, operation.name())
                } else {
                    format!("{}/{}", self.namespace, operation.name())
                }
            })
    }
}

// ---- SOAP envelope ----

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Body")]
    body: Body,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(rename = "Fault")]
    fault: Option<Fault>,
    #[serde(
        rename = "FahrenheitToCelsiusResponse",
        alias = "CelsiusToFahrenheitResponse"
    )]
    response: Option<OperationResponse>,
}

#[derive(Debug, Deserialize)]
struct OperationResponse {
    #[serde(
        rename = "FahrenheitToCelsiusResult",
        alias = "CelsiusToFahrenheitResult"
    )]
    result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Fault {
    #[serde(default)]
    faultcode: String,
    #[serde(default)]
    faultstring: String,
}

pub fn build_envelope(namespace: &str, operation: ConversionOperation, value: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            r#"<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
            r#"xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
            r#"<soap:Body><{op} xmlns="{ns}"><{param}>{value}</{param}></{op}></soap:Body>"#,
            r#"</soap:Envelope>"#
        ),
        op = operation.name(),
        ns = quick_xml::escape::escape(namespace),
        param = operation.parameter(),
        value = quick_xml::escape::escape(value),
    )
}

/// 解析遠端回應；SOAP fault 常以 HTTP 500 回傳，所以先看內容再看狀態碼
pub fn parse_response(
    operation: ConversionOperation,
    status: u16,
    body: &str,
) -> std::result::Result<String, RemoteCallError> {
    let success = (200..300).contains(&status);

    let envelope: Envelope = match quick_xml::de::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !success => return Err(RemoteCallError::Status { status }),
        Err(e) => return Err(RemoteCallError::MalformedResponse(e.to_string())),
    };

    if let Some(fault) = envelope.body.fault {
        return Err(RemoteCallError::Fault {
            code: fault.faultcode.trim().to_string(),
            message: fault.faultstring.trim().to_string(),
        });
    }
    if !success {
        return Err(RemoteCallError::Status { status });
    }

    envelope
        .body
        .response
        .and_then(|r| r.result)
        .ok_or_else(|| {
            RemoteCallError::MalformedResponse(format!("missing {}Result", operation.name()))
        })
}

// ---- transport ----

/// Converter backed by the remote SOAP service.
pub struct SoapConverter {
    http: Client,
    endpoint: String,
    description: ServiceDescription,
}

impl SoapConverter {
    /// Downloads and checks the service description. Failing here is fatal
    /// for the process; nothing is retried.
    pub async fn connect(settings: &RemoteSettings) -> Result<Self> {
        let http = Client::builder().timeout(settings.timeout).build()?;

        tracing::info!("Loading service description from {}", settings.wsdl_url);
        let response = http
            .get(&settings.wsdl_url)
            .send()
            .await?
            .error_for_status()?;
        let xml = response.text().await?;

        let description = ServiceDescription::parse(&xml)?;
        description.require(&ConversionOperation::ALL)?;

        let endpoint = match (&settings.endpoint, &description.address) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(address)) => address.clone(),
            (None, None) => strip_query(&settings.wsdl_url)?,
        };

        tracing::info!(
            "Bound to {} (namespace {}, timeout {:?})",
            endpoint,
            description.namespace,
            settings.timeout
        );

        Ok(Self {
            http,
            endpoint,
            description,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(
        &self,
        operation: ConversionOperation,
        value: &str,
    ) -> std::result::Result<String, RemoteCallError> {
        let envelope = build_envelope(&self.description.namespace, operation, value);

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", format!("\"{}\"", self.description.soap_action(operation)))
            .body(envelope)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("{} replied with HTTP {}", operation.name(), status);

        parse_response(operation, status, &body)
    }
}

fn strip_query(url: &str) -> Result<String> {
    let mut parsed = Url::parse(url).map_err(|e| GatewayError::BindingError {
        message: format!("invalid service description URL {}: {}", url, e),
    })?;
    parsed.set_query(None);
    Ok(parsed.to_string())
}

#[async_trait]
impl TemperatureConverter for SoapConverter {
    async fn fahrenheit_to_celsius(
        &self,
        fahrenheit: &str,
    ) -> std::result::Result<String, RemoteCallError> {
        self.call(ConversionOperation::FahrenheitToCelsius, fahrenheit)
            .await
    }

    async fn celsius_to_fahrenheit(
        &self,
        celsius: &str,
    ) -> std::result::Result<String, RemoteCallError> {
        self.call(ConversionOperation::CelsiusToFahrenheit, celsius)
            .await
    }
}
