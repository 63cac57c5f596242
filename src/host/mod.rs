//! Collaborator interfaces owned by the host runtime.
//!
//! The navigator never reaches for a global host object. Everything it needs
//! (entity storage, avatar and camera control, panels, the event bus and the
//! editor) is passed in through these traits, so the selection and
//! navigation logic runs the same against a real host, the simulated host or
//! a test double.

mod entity;
pub mod file;
mod memory;

pub use entity::{Entity, EntityId, EntityPatch, MenubarItem};
pub use memory::InMemoryStore;

use crate::error::HostError;
use crate::event::PluginEvent;
use crate::point::Vec3;

/// Query and update access to world entities
pub trait EntityStore {
    /// Snapshot of every entity currently in the world
    fn entities(&self) -> Result<Vec<Entity>, HostError>;

    /// Add an entity. An empty id is replaced with a store-assigned one.
    fn add(&mut self, entity: Entity) -> Result<EntityId, HostError>;

    fn update(&mut self, id: &str, patch: &EntityPatch) -> Result<(), HostError>;
}

/// The local user's avatar
pub trait AvatarControl {
    /// Current avatar position, if the avatar has spawned
    fn current_position(&self) -> Option<Vec3>;

    /// Teleport the avatar. Fire-and-forget: no completion is observed.
    fn move_to(&mut self, target: Vec3) -> Result<(), HostError>;
}

/// The user's camera rig
pub trait CameraControl {
    /// Set the yaw (rotation about Y) in radians
    fn set_yaw(&mut self, yaw: f64) -> Result<(), HostError>;

    fn world_position(&self) -> Vec3;

    /// Forward direction of the camera in world space
    fn world_direction(&self) -> Vec3;
}

/// Menubar and side panels
pub trait PanelControl {
    fn add_menubar_item(&mut self, item: MenubarItem);

    /// Toggle the panel owned by menubar item `id`. Returns true when the
    /// panel is open afterwards.
    fn toggle_panel(&mut self, id: &str) -> bool;

    /// Close whichever panel is open. No-op when none is.
    fn close_panel(&mut self);
}

/// Plugin event bus
pub trait EventSink {
    fn send_event(&mut self, event: PluginEvent);
}

/// World editor state and selection
pub trait EditorControl {
    fn is_open(&self) -> bool;

    fn select(&mut self, id: &str);
}

/// Everything the plugin needs from its host
pub trait Host:
    EntityStore + AvatarControl + CameraControl + PanelControl + EventSink + EditorControl
{
}

impl<T> Host for T where
    T: EntityStore + AvatarControl + CameraControl + PanelControl + EventSink + EditorControl
{
}
