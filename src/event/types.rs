use serde::{Deserialize, Serialize};

use crate::point::Vec3;

/// Wire name of the event emitted after every navigation attempt
pub const ON_MOVE_EVENT: &str = "pointofinterest_onMove";

/// Final avatar target of a navigation attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovePayload {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3> for MovePayload {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Events this plugin publishes on the host event bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PluginEvent {
    #[serde(rename = "pointofinterest_onMove")]
    Moved(MovePayload),
}

impl PluginEvent {
    /// Name the host bus dispatches on
    pub fn name(&self) -> &'static str {
        match self {
            PluginEvent::Moved(_) => ON_MOVE_EVENT,
        }
    }

    /// Payload as the host bus expects it
    pub fn payload(&self) -> serde_json::Value {
        match self {
            PluginEvent::Moved(p) => serde_json::json!({ "x": p.x, "y": p.y, "z": p.z }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_event_wire_format() {
        let event = PluginEvent::Moved(Vec3::new(1.0, 0.1, -2.0).into());
        assert_eq!(event.name(), "pointofinterest_onMove");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "pointofinterest_onMove");
        assert_eq!(json["x"], 1.0);
        assert_eq!(event.payload()["z"], -2.0);
    }

    #[test]
    fn test_parse_moved_event() {
        let json = r#"{"event": "pointofinterest_onMove", "x": 0, "y": 0.1, "z": 3}"#;
        let event: PluginEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            PluginEvent::Moved(MovePayload {
                x: 0.0,
                y: 0.1,
                z: 3.0
            })
        );
    }
}
