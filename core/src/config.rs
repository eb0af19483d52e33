//! Settings for the default network transport.

use serde::Deserialize;

/// Knobs passed to the ureq agent behind `UreqTransportFactory`.
///
/// Every field has a default, so a partial document such as
/// `{"user_agent": "probe/1.0"}` deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Overrides ureq's own `user-agent` header when set.
    pub user_agent: Option<String>,
    pub max_redirects: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            max_redirects: 10,
        }
    }
}
