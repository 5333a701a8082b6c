pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use api::{app, AppState};
pub use config::{CliConfig, Settings};
pub use core::{client::ConversionClient, soap::SoapConverter};
pub use utils::error::{GatewayError, RemoteCallError, Result};
