//! Upstream portal client configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortalConfig {
    /// Helper program speaking the line-delimited JSON bridge protocol.
    #[serde(default)]
    pub bridge_command: String,

    /// Extra arguments passed to the helper program.
    #[serde(default)]
    pub bridge_args: Vec<String>,

    /// JSON fixture for the offline in-memory portal. Takes precedence over
    /// the bridge when both are set.
    #[serde(default)]
    pub fixture_path: String,
}

impl PortalConfig {
    pub fn has_bridge(&self) -> bool {
        !self.bridge_command.is_empty()
    }

    pub fn has_fixture(&self) -> bool {
        !self.fixture_path.is_empty()
    }

    pub fn is_configured(&self) -> bool {
        self.has_bridge() || self.has_fixture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = PortalConfig::default();
        assert!(!config.is_configured());
        assert!(config.bridge_args.is_empty());
    }

    #[test]
    fn either_mode_counts_as_configured() {
        let bridge = PortalConfig {
            bridge_command: "pronote-helper".into(),
            ..Default::default()
        };
        assert!(bridge.is_configured());

        let fixture = PortalConfig {
            fixture_path: "account.json".into(),
            ..Default::default()
        };
        assert!(fixture.is_configured());
    }
}
