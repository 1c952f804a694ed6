//! Standard error response body.

use serde::{Deserialize, Serialize};

/// The JSON body a node returns for `400`, `403`, `404` and `409` responses.
///
/// ```json
/// { "error_message": "Pool not found." }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable description of the problem.
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialises_node_error_body() {
        let e: ErrorResponse =
            serde_json::from_str(r#"{"error_message":"Pool not found."}"#).unwrap();
        assert_eq!(e, ErrorResponse::new("Pool not found."));
    }

    #[test]
    fn missing_message_is_rejected() {
        assert!(serde_json::from_str::<ErrorResponse>(r#"{"detail":"x"}"#).is_err());
    }
}
