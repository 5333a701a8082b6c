use crate::utils::error::{GatewayError, Result};
use std::time::Duration;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> GatewayError {
    GatewayError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// WSDL 與 SOAP endpoint 只接受 http(s)
pub fn validate_soap_url(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("not a URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(field, raw, "SOAP service must be reached over http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid(field, raw, "SOAP service URL needs a host"));
    }
    Ok(url)
}

pub fn validate_bind_host(host: &str) -> Result<()> {
    if host.trim().is_empty() || host.contains(char::is_whitespace) {
        return Err(invalid("server.host", host, "bind host must be a hostname or IP address"));
    }
    Ok(())
}

pub fn validate_remote_timeout(timeout: Duration) -> Result<()> {
    if timeout.is_zero() {
        return Err(invalid(
            "remote.timeout_seconds",
            timeout.as_secs(),
            "remote calls need a timeout of at least one second",
        ));
    }
    Ok(())
}

pub fn validate_body_limit(max_body_bytes: usize) -> Result<()> {
    if max_body_bytes == 0 {
        return Err(invalid(
            "server.max_body_bytes",
            max_body_bytes,
            "request bodies cannot be limited to zero bytes",
        ));
    }
    Ok(())
}

pub fn validate_log_format(format: &str) -> Result<()> {
    match format {
        "compact" | "json" => Ok(()),
        other => Err(invalid("logging.format", other, "expected \"compact\" or \"json\"")),
    }
}
