//! Node versions this client knows how to talk to.

/// Versions of `evade84-node` whose API matches this client.
pub const COMPATIBLE_NODE_VERSIONS: &[&str] = &["0.1.0", "0.1.1"];

/// `true` when `version` is one of [`COMPATIBLE_NODE_VERSIONS`].
pub fn is_compatible(version: &str) -> bool {
    COMPATIBLE_NODE_VERSIONS.contains(&version)
}
