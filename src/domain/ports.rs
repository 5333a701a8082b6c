use crate::domain::model::ConversionOperation;
use crate::utils::error::RemoteCallError;
use async_trait::async_trait;

/// Remote capability performing the actual unit arithmetic.
#[async_trait]
pub trait TemperatureConverter: Send + Sync {
    async fn fahrenheit_to_celsius(&self, fahrenheit: &str) -> Result<String, RemoteCallError>;
    async fn celsius_to_fahrenheit(&self, celsius: &str) -> Result<String, RemoteCallError>;

    async fn invoke(
        &self,
        operation: ConversionOperation,
        value: &str,
    ) -> Result<String, RemoteCallError> {
        match operation {
            ConversionOperation::FahrenheitToCelsius => self.fahrenheit_to_celsius(value).await,
            ConversionOperation::CelsiusToFahrenheit => self.celsius_to_fahrenheit(value).await,
        }
    }
}
