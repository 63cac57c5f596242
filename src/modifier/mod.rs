//! Per-entity lifecycle of a point-of-interest marker.
//!
//! Markers are invisible and non-physical while people explore the world,
//! and show up only while the editor is open so builders can place them.

mod editor_watch;

pub use editor_watch::{
    EditorMode, EditorNotifier, EditorWatch, PollingEditorWatch, SubscribedEditorWatch,
};

use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error::HostError;
use crate::host::{EntityId, EntityPatch, EntityStore};
use crate::point::Category;

/// Display name of the modifier in the editor
pub const MODIFIER_NAME: &str = "Point Of Interest";

/// One field of the modifier's settings form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModifierSetting {
    Description {
        name: String,
    },
    Text {
        id: String,
        name: String,
        help: String,
    },
    Select {
        id: String,
        name: String,
        placeholder: String,
        values: Vec<String>,
        labels: Vec<String>,
        help: String,
    },
    File {
        id: String,
        name: String,
        allow_clear: bool,
        help: String,
    },
}

/// Settings form the editor shows for a point of interest
pub fn settings() -> Vec<ModifierSetting> {
    vec![
        ModifierSetting::Description {
            name: "The details for the point of interest.".into(),
        },
        ModifierSetting::Text {
            id: "pointofinterest_name".into(),
            name: "Name".into(),
            help: "The name and identifier of the point of interest.".into(),
        },
        ModifierSetting::Text {
            id: "pointofinterest_description".into(),
            name: "Description".into(),
            help: "Talking points for the ai to speak about the place.".into(),
        },
        ModifierSetting::Select {
            id: "pointofinterest_category".into(),
            name: "Category".into(),
            placeholder: Category::General.label(),
            values: Category::iter().map(|c| c.as_str().to_string()).collect(),
            labels: Category::iter().map(|c| c.label()).collect(),
            help: "The category the point of interest falls under.".into(),
        },
        ModifierSetting::File {
            id: "pointofinterest_url".into(),
            name: "Icon".into(),
            allow_clear: true,
            help: "The image to render.".into(),
        },
    ]
}

/// Modifier attached to one point-of-interest entity
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterestModifier {
    entity_id: EntityId,
    visible: bool,
}

impl PointOfInterestModifier {
    pub fn new(entity_id: impl Into<EntityId>) -> Self {
        Self {
            entity_id: entity_id.into(),
            visible: false,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide the marker and flag the entity as a point of interest
    pub fn on_load<S>(&mut self, store: &mut S) -> Result<(), HostError>
    where
        S: EntityStore + ?Sized,
    {
        store.update(
            &self.entity_id,
            &EntityPatch::visibility(false).mark_point_of_interest(),
        )?;
        self.visible = false;
        Ok(())
    }

    pub fn on_editor_open<S>(&mut self, store: &mut S) -> Result<(), HostError>
    where
        S: EntityStore + ?Sized,
    {
        self.set_visible(store, true)
    }

    pub fn on_editor_close<S>(&mut self, store: &mut S) -> Result<(), HostError>
    where
        S: EntityStore + ?Sized,
    {
        self.set_visible(store, false)
    }

    /// Apply an editor mode change
    pub fn on_editor_mode<S>(&mut self, store: &mut S, mode: EditorMode) -> Result<(), HostError>
    where
        S: EntityStore + ?Sized,
    {
        match mode {
            EditorMode::Open => self.on_editor_open(store),
            EditorMode::Closed => self.on_editor_close(store),
        }
    }

    /// Re-send the current visibility, e.g. after the entity was reloaded
    pub fn restore<S>(&mut self, store: &mut S) -> Result<(), HostError>
    where
        S: EntityStore + ?Sized,
    {
        store.update(
            &self.entity_id,
            &EntityPatch::visibility(self.visible).mark_point_of_interest(),
        )
    }

    /// Clear the icon. `remove_url = false` leaves it in place.
    pub fn remove_image<S>(&mut self, store: &mut S, remove_url: bool) -> Result<(), HostError>
    where
        S: EntityStore + ?Sized,
    {
        if remove_url {
            store.update(&self.entity_id, &EntityPatch::clear_icon())?;
        }
        Ok(())
    }

    fn set_visible<S>(&mut self, store: &mut S, visible: bool) -> Result<(), HostError>
    where
        S: EntityStore + ?Sized,
    {
        store.update(&self.entity_id, &EntityPatch::visibility(visible))?;
        self.visible = visible;
        Ok(())
    }
}
