//! Error types for Bridgework operations

/// Result type for Bridgework operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Error types for the Bridgework examples
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Input had the wrong type or shape for the operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The host runtime failed while a value was being inspected
    #[error("Host error: {0}")]
    Host(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl BridgeError {
    /// Shorthand for [`BridgeError::InvalidInput`]
    pub fn invalid(message: impl Into<String>) -> Self {
        BridgeError::InvalidInput(message.into())
    }

    /// Whether this is the invalid-input kind
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, BridgeError::InvalidInput(_))
    }
}

impl From<String> for BridgeError {
    fn from(s: String) -> Self {
        BridgeError::Other(s)
    }
}

impl From<&str> for BridgeError {
    fn from(s: &str) -> Self {
        BridgeError::Other(s.to_string())
    }
}

impl From<anyhow::Error> for BridgeError {
    fn from(err: anyhow::Error) -> Self {
        BridgeError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = BridgeError::invalid("expected a list, got int");
        assert_eq!(err.to_string(), "Invalid input: expected a list, got int");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_string_conversion() {
        let err: BridgeError = "boom".into();
        assert!(matches!(err, BridgeError::Other(ref m) if m == "boom"));
        assert!(!err.is_invalid_input());
    }
}
