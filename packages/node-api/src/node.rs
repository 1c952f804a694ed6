//! Node information — `GET /node`.

use serde::{Deserialize, Serialize};

/// The response body for `GET /node`.
///
/// ```json
/// { "name": "public-relay", "version": "0.1.0" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    /// Operator-chosen name of the node.
    pub name: String,

    /// Node software version. The client compares it against the set of
    /// versions it knows how to talk to.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_requires_version() {
        let err = serde_json::from_str::<Node>(r#"{"name":"relay"}"#).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn node_ignores_unknown_fields() {
        let node: Node =
            serde_json::from_str(r#"{"name":"relay","version":"0.1.0","uptime":12}"#).unwrap();
        assert_eq!(node.name, "relay");
        assert_eq!(node.version, "0.1.0");
    }
}
