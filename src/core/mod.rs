pub mod client;
pub mod soap;

pub use crate::domain::model::{BatchItem, BatchResult, ConversionOperation, TemperatureUnit};
pub use crate::domain::ports::TemperatureConverter;
pub use crate::utils::error::{RemoteCallError, Result};
