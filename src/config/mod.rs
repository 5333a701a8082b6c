pub mod settings;
pub mod toml_config;

pub use settings::{RemoteSettings, ServerSettings, Settings};
pub use toml_config::TomlConfig;

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tempconvert-gateway")]
#[command(about = "REST/JSON gateway for a remote SOAP temperature conversion service")]
#[command(version)]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on [default: 0.0.0.0]")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on [default: 8000]")]
    pub port: Option<u16>,

    #[arg(long, help = "URL of the remote service description (WSDL)")]
    pub wsdl_url: Option<String>,

    #[arg(long, help = "Override the SOAP endpoint declared by the WSDL")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Timeout for calls to the remote service, in seconds [default: 30]")]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}
