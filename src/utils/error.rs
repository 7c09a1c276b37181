use thiserror::Error;

/// Failures reported by a geospatial engine backend.
///
/// Only `Domain` is part of the engine contract: it carries the human-readable
/// message the engine raised and is relayed to clients as `errMsg`. The other
/// variants are infrastructure failures that the translator does not catch.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{message}")]
    Domain { message: String },

    #[error("Engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected engine response: {0}")]
    Protocol(String),
}

impl EngineError {
    pub fn domain(message: impl Into<String>) -> Self {
        EngineError::Domain {
            message: message.into(),
        }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, EngineError::Domain { .. })
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Engine failure: {0}")]
    Engine(#[from] EngineError),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Request body is missing")]
    MissingPayload,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GatewayError {
    /// True for errors caused by what the client sent.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::MalformedBody(_)
                | GatewayError::InvalidPayload { .. }
                | GatewayError::InvalidField { .. }
                | GatewayError::MissingPayload
        )
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_displays_bare_message() {
        let err = EngineError::domain("bad polygon");
        assert_eq!(err.to_string(), "bad polygon");
        assert!(err.is_domain());
        assert!(!EngineError::Protocol("status 500".into()).is_domain());
    }

    #[test]
    fn test_client_error_classification() {
        assert!(GatewayError::MissingPayload.is_client_error());
        assert!(GatewayError::InvalidField {
            field: "scale".into(),
            reason: "not a number".into()
        }
        .is_client_error());
        assert!(!GatewayError::Engine(EngineError::Protocol("x".into())).is_client_error());
    }
}
