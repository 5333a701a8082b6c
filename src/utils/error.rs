use thiserror::Error;

/// 啟動與配置階段的錯誤，任何一個都會讓服務無法啟動
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::de::DeError),

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Remote service binding failed: {message}")]
    BindingError { message: String },
}

/// 單次遠端呼叫的錯誤，由 HTTP 層轉成 500 或批次中的錯誤字串
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteCallError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("SOAP fault {code}: {message}")]
    Fault { code: String, message: String },

    #[error("remote service returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for RemoteCallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteCallError::Timeout
        } else {
            RemoteCallError::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_message_includes_code_and_text() {
        let err = RemoteCallError::Fault {
            code: "soap:Server".to_string(),
            message: "Server was unable to process request.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "SOAP fault soap:Server: Server was unable to process request."
        );
    }

    #[test]
    fn test_invalid_config_value_message() {
        let err = GatewayError::InvalidConfigValueError {
            field: "remote.wsdl_url".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert!(err.to_string().contains("remote.wsdl_url"));
        assert!(err.to_string().contains("ftp"));
    }
}
