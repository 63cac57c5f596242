mod math;

pub use math::{Quat, Vec3};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::host::{Entity, EntityId};

/// Label shown for points without a name
pub const UNNAMED: &str = "unnamed";

/// Classification tag attached to a point of interest
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    #[default]
    General,
    Content,
    Media,
    Activity,
}

impl Category {
    /// Wire value, e.g. `"media"`
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Capitalised label for list display, e.g. `"Media"`
    pub fn label(&self) -> String {
        let value = self.as_str();
        let mut chars = value.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Category of a stored entity value. Missing or unrecognised values
    /// count as `General`.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Category::General,
            Some(v) => v.parse().unwrap_or_else(|_| {
                tracing::debug!(value = v, "unrecognised point category, using general");
                Category::General
            }),
        }
    }
}

/// Read-only projection of a point-of-interest entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: EntityId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Category,
    pub position: Vec3,
    /// Facing to apply on arrival; `None` means no facing change
    pub rotation: Option<Quat>,
    pub icon_url: Option<String>,
}

impl PointOfInterest {
    pub fn new(id: impl Into<EntityId>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            category: Category::General,
            position,
            rotation: None,
            icon_url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED)
    }

    /// Map a raw host entity into the point shape
    pub fn from_entity(entity: &Entity) -> Self {
        let has_rotation = entity.quat_x.is_some()
            || entity.quat_y.is_some()
            || entity.quat_z.is_some()
            || entity.quat_w.is_some();

        let rotation = has_rotation.then(|| {
            Quat::new(
                entity.quat_x.unwrap_or(0.0),
                entity.quat_y.unwrap_or(0.0),
                entity.quat_z.unwrap_or(0.0),
                entity.quat_w.unwrap_or(0.0),
            )
        });

        Self {
            id: entity.id.clone(),
            name: entity
                .pointofinterest_name
                .clone()
                .filter(|name| !name.is_empty()),
            description: entity.pointofinterest_description.clone(),
            category: Category::from_stored(entity.pointofinterest_category.as_deref()),
            position: Vec3::new(entity.x, entity.y, entity.z),
            rotation,
            icon_url: entity.pointofinterest_url.clone(),
        }
    }
}
