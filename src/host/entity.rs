use serde::{Deserialize, Serialize};

/// Stable identifier assigned by the entity store
pub type EntityId = String;

/// A world entity as the host stores it.
///
/// Field names follow the host's property keys so world files can be read
/// as-is. Only the properties this plugin reads or writes are modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,

    #[serde(default, rename = "quatX", skip_serializing_if = "Option::is_none")]
    pub quat_x: Option<f64>,
    #[serde(default, rename = "quatY", skip_serializing_if = "Option::is_none")]
    pub quat_y: Option<f64>,
    #[serde(default, rename = "quatZ", skip_serializing_if = "Option::is_none")]
    pub quat_z: Option<f64>,
    #[serde(default, rename = "quatW", skip_serializing_if = "Option::is_none")]
    pub quat_w: Option<f64>,

    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub physical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<String>,

    /// Set on entities that carry the point-of-interest modifier
    #[serde(default, rename = "modifier:pointofinterest")]
    pub has_poi_modifier: bool,
    /// Set by the modifier once it has loaded
    #[serde(default)]
    pub point_of_interest_object: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointofinterest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointofinterest_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointofinterest_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointofinterest_url: Option<String>,
}

impl Entity {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &EntityPatch) {
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
        if let Some(physical) = patch.physical {
            self.physical = physical;
        }
        if let Some(flag) = patch.point_of_interest_object {
            self.point_of_interest_object = flag;
        }
        if let Some(ref url) = patch.pointofinterest_url {
            self.pointofinterest_url = url.clone();
        }
    }
}

/// Partial entity update. `None` leaves a property untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityPatch {
    pub hidden: Option<bool>,
    pub physical: Option<bool>,
    pub point_of_interest_object: Option<bool>,
    /// `Some(None)` clears the icon
    pub pointofinterest_url: Option<Option<String>>,
}

impl EntityPatch {
    /// Show or hide the marker, toggling physics with it
    pub fn visibility(visible: bool) -> Self {
        Self {
            hidden: Some(!visible),
            physical: Some(visible),
            ..Default::default()
        }
    }

    pub fn mark_point_of_interest(mut self) -> Self {
        self.point_of_interest_object = Some(true);
        self
    }

    pub fn clear_icon() -> Self {
        Self {
            pointofinterest_url: Some(None),
            ..Default::default()
        }
    }
}

/// Menubar entry registered by the plugin on load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenubarItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_panel: bool,
    pub icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_entity() {
        let json = r#"{"id": "poi-1", "name": "Point of Interest", "type": "mesh", "x": 1.5, "quatY": 0.7, "modifier:pointofinterest": true, "pointofinterest_name": "Stage", "pointofinterest_category": "media"}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.id, "poi-1");
        assert_eq!(entity.kind.as_deref(), Some("mesh"));
        assert_eq!(entity.x, 1.5);
        assert_eq!(entity.y, 0.0);
        assert_eq!(entity.quat_y, Some(0.7));
        assert_eq!(entity.quat_w, None);
        assert!(entity.has_poi_modifier);
        assert!(!entity.point_of_interest_object);
    }

    #[test]
    fn test_visibility_patch() {
        let mut entity = Entity::default();
        entity.apply(&EntityPatch::visibility(false).mark_point_of_interest());
        assert!(entity.hidden);
        assert!(!entity.physical);
        assert!(entity.point_of_interest_object);

        entity.apply(&EntityPatch::visibility(true));
        assert!(!entity.hidden);
        assert!(entity.physical);
        assert!(entity.point_of_interest_object);
    }

    #[test]
    fn test_clear_icon_patch() {
        let mut entity = Entity {
            pointofinterest_url: Some("icon.png".into()),
            ..Default::default()
        };
        entity.apply(&EntityPatch::clear_icon());
        assert_eq!(entity.pointofinterest_url, None);
    }
}
