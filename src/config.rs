//! Plugin and navigator settings.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HostError;

/// Entity name that marks a point of interest
pub const DEFAULT_MARKER_NAME: &str = "Point of Interest";

/// Navigation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Half-width of the random X/Z scatter around the target, world units
    pub radius_offset: f64,
    /// Lift added to the target height to avoid clipping into the ground
    pub vertical_lift: f64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            radius_offset: 1.0,
            vertical_lift: 0.1,
        }
    }
}

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub marker_name: String,
    /// Whether the current user may edit the world
    pub can_edit: bool,
    /// Editor-mode poll period in milliseconds
    pub editor_poll_interval_ms: u64,
    pub navigator: NavigatorConfig,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            marker_name: DEFAULT_MARKER_NAME.to_string(),
            can_edit: false,
            editor_poll_interval_ms: 1000,
            navigator: NavigatorConfig::default(),
        }
    }
}

impl PluginConfig {
    /// Load from a JSON file; absent keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn editor_poll_interval(&self) -> Duration {
        Duration::from_millis(self.editor_poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PluginConfig::default();
        assert_eq!(config.marker_name, "Point of Interest");
        assert_eq!(config.navigator.radius_offset, 1.0);
        assert_eq!(config.navigator.vertical_lift, 0.1);
        assert_eq!(config.editor_poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: PluginConfig =
            serde_json::from_str(r#"{"can_edit": true, "navigator": {"radius_offset": 0.5}}"#)
                .unwrap();
        assert!(config.can_edit);
        assert_eq!(config.navigator.radius_offset, 0.5);
        assert_eq!(config.navigator.vertical_lift, 0.1);
        assert_eq!(config.editor_poll_interval_ms, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poi.json");
        std::fs::write(&path, r#"{"marker_name": "Waypoint"}"#).unwrap();

        let config = PluginConfig::load(&path).unwrap();
        assert_eq!(config.marker_name, "Waypoint");
    }
}
