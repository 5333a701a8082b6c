use crate::domain::model::{BatchItem, ConversionOperation, TemperatureUnit};
use crate::domain::ports::TemperatureConverter;
use crate::utils::error::RemoteCallError;
use std::sync::Arc;

/// 將本地呼叫轉成遠端轉換操作，並整理結果
#[derive(Clone)]
pub struct ConversionClient {
    remote: Arc<dyn TemperatureConverter>,
}

impl ConversionClient {
    pub fn new(remote: Arc<dyn TemperatureConverter>) -> Self {
        Self { remote }
    }

    pub async fn convert_fahrenheit_to_celsius(
        &self,
        value: &str,
    ) -> Result<String, RemoteCallError> {
        tracing::debug!("FahrenheitToCelsius({})", value);
        self.remote.fahrenheit_to_celsius(value).await
    }

    pub async fn convert_celsius_to_fahrenheit(
        &self,
        value: &str,
    ) -> Result<String, RemoteCallError> {
        tracing::debug!("CelsiusToFahrenheit({})", value);
        self.remote.celsius_to_fahrenheit(value).await
    }

    /// Converts every value in order. A failing element is recorded as
    /// [`BatchItem::Failed`] and never aborts its siblings.
    pub async fn batch_convert(&self, values: &[String], from: TemperatureUnit) -> Vec<BatchItem> {
        let operation = ConversionOperation::from_unit(from);
        let mut items = Vec::with_capacity(values.len());

        for value in values {
            let item = match self.remote.invoke(operation, value).await {
                Ok(output) => BatchItem::Converted {
                    input: value.clone(),
                    output,
                    from,
                },
                Err(e) => {
                    tracing::warn!("Batch element '{}' failed: {}", value, e);
                    BatchItem::Failed {
                        input: value.clone(),
                        message: e.to_string(),
                    }
                }
            };
            items.push(item);
        }

        tracing::debug!(
            "Batch of {} {} values finished",
            items.len(),
            from
        );
        items
    }
}
