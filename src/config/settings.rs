use crate::config::{CliConfig, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_bind_host, validate_body_limit, validate_log_format, validate_remote_timeout,
    validate_soap_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_WSDL_URL: &str = "https://www.w3schools.com/xml/tempconvert.asmx?WSDL";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;
/// 1 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub wsdl_url: String,
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            wsdl_url: DEFAULT_WSDL_URL.to_string(),
            endpoint: None,
            timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
        }
    }
}

/// Effective configuration: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub remote: RemoteSettings,
    pub log_format: String,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self::merge(file, cli))
    }

    pub fn merge(file: TomlConfig, cli: &CliConfig) -> Self {
        let server_defaults = ServerSettings::default();
        let remote_defaults = RemoteSettings::default();

        let server = ServerSettings {
            host: cli
                .host
                .clone()
                .or(file.server.host)
                .unwrap_or(server_defaults.host),
            port: cli.port.or(file.server.port).unwrap_or(server_defaults.port),
            max_body_bytes: file
                .server
                .max_body_bytes
                .unwrap_or(server_defaults.max_body_bytes),
        };

        let remote = RemoteSettings {
            wsdl_url: cli
                .wsdl_url
                .clone()
                .or(file.remote.wsdl_url)
                .unwrap_or(remote_defaults.wsdl_url),
            endpoint: cli.endpoint.clone().or(file.remote.endpoint),
            timeout: cli
                .timeout_secs
                .or(file.remote.timeout_seconds)
                .map(Duration::from_secs)
                .unwrap_or(remote_defaults.timeout),
        };

        let log_format = if cli.json_logs {
            "json".to_string()
        } else {
            file.logging.format.unwrap_or_else(|| "compact".to_string())
        };

        Self {
            server,
            remote,
            log_format,
            verbose: cli.verbose || file.logging.verbose.unwrap_or(false),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_bind_host(&self.server.host)?;
        validate_body_limit(self.server.max_body_bytes)?;

        validate_soap_url("remote.wsdl_url", &self.remote.wsdl_url)?;
        if let Some(endpoint) = &self.remote.endpoint {
            validate_soap_url("remote.endpoint", endpoint)?;
        }
        validate_remote_timeout(self.remote.timeout)?;

        validate_log_format(&self.log_format)
    }
}
