//! Point of Interest navigation for hosted virtual worlds.
//!
//! World builders drop "Point of Interest" markers into a scene; visitors
//! (or an AI assistant acting for them) travel to a marker by name, by
//! category, at random or by proximity. The host runtime owns the scene,
//! the avatar and the UI. This crate reads point entities through the
//! [`host`] traits, picks a target with the [`selector`] and hands a pose to
//! the host through the [`navigator`].
//!
//! [`PointOfInterestPlugin`] ties the pieces together and exposes the
//! assistant actions.

pub mod actions;
pub mod config;
pub mod demo;
pub mod error;
pub mod event;
pub mod host;
pub mod modifier;
pub mod navigator;
pub mod plugin;
pub mod point;
pub mod registry;
pub mod selector;
pub mod window;

pub use actions::{ActionInput, PointAction};
pub use config::{NavigatorConfig, PluginConfig};
pub use error::{HostError, PoiError, Result};
pub use navigator::{NavigationOutcome, Navigator};
pub use plugin::PointOfInterestPlugin;
pub use point::{Category, PointOfInterest, Quat, Vec3};
pub use registry::PointRegistry;
pub use selector::{select_point, PointFilter, Selection};
