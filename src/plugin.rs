//! The plugin facade: collaborators in, navigation and assistant actions out.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::actions::{self, ActionInput, KnowledgeBaseEntry, PointAction, MOVED_CONFIRMATION};
use crate::config::PluginConfig;
use crate::error::Result;
use crate::host::{Entity, EntityId, Host, MenubarItem};
use crate::modifier::{EditorMode, EditorWatch, PointOfInterestModifier, PollingEditorWatch};
use crate::navigator::{NavigationOutcome, Navigator};
use crate::point::{PointOfInterest, Vec3};
use crate::registry::PointRegistry;
use crate::selector::{self, PointFilter, Selection};
use crate::window::{PointsWindow, DEFAULT_ICON, MENU_ITEM_ID};

/// Model placed in the world for a new point
pub const INDICATOR_MODEL: &str = "point-of-interest_indicator.glb";

/// Distance in front of the camera at which new points are placed
const PLACE_DISTANCE: f64 = 2.0;

/// Sideways shift of new points so they do not block the view
const PLACE_SIDE_OFFSET: f64 = 1.0;

/// Static plugin description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub provides: &'static [&'static str],
    pub requires: &'static [&'static str],
}

pub static PLUGIN_INFO: PluginInfo = PluginInfo {
    id: "pointofinterest",
    name: "Point of Interest",
    description: "Place named markers in the world and travel to them by name, category or proximity.",
    version: env!("CARGO_PKG_VERSION"),
    provides: &["pointofinterest", "modifier:pointofinterest"],
    requires: &["avatars"],
};

/// Entry offered in the editor's "add" menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddableEntity {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// Point of interest plugin bound to a host
pub struct PointOfInterestPlugin<H, R = StdRng> {
    host: H,
    config: PluginConfig,
    registry: PointRegistry,
    navigator: Navigator,
    rng: R,
    modifiers: Vec<PointOfInterestModifier>,
    editor_watch: Box<dyn EditorWatch>,
    /// Last editor mode applied to the markers
    editor_mode: Option<EditorMode>,
}

impl<H: Host> PointOfInterestPlugin<H, StdRng> {
    pub fn new(host: H, config: PluginConfig) -> Self {
        Self::with_rng(host, config, StdRng::from_entropy())
    }
}

impl<H: Host, R: Rng> PointOfInterestPlugin<H, R> {
    pub fn with_rng(host: H, config: PluginConfig, rng: R) -> Self {
        let editor_watch = Box::new(PollingEditorWatch::new(config.editor_poll_interval()));
        Self {
            registry: PointRegistry::new(config.marker_name.clone()),
            navigator: Navigator::new(config.navigator.clone()),
            host,
            config,
            rng,
            modifiers: Vec::new(),
            editor_watch,
            editor_mode: None,
        }
    }

    /// Swap the editor-mode source, e.g. for a host that pushes notifications
    pub fn with_editor_watch(mut self, watch: Box<dyn EditorWatch>) -> Self {
        self.editor_watch = watch;
        self
    }

    pub fn info(&self) -> &'static PluginInfo {
        &PLUGIN_INFO
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn modifiers(&self) -> &[PointOfInterestModifier] {
        &self.modifiers
    }

    /// Register the menubar entry and attach modifiers to existing points
    pub fn on_load(&mut self) -> Result<()> {
        self.host.add_menubar_item(menubar_item());
        let attached = self.load_modifiers()?;
        tracing::info!(plugin = PLUGIN_INFO.id, modifiers = attached, "plugin loaded");
        Ok(())
    }

    /// Attach a modifier to every entity carrying the modifier key that does
    /// not have one yet. Returns how many were attached.
    pub fn load_modifiers(&mut self) -> Result<usize> {
        let pending: Vec<EntityId> = self
            .host
            .entities()?
            .into_iter()
            .filter(|e| e.has_poi_modifier)
            .filter(|e| !self.modifiers.iter().any(|m| m.entity_id() == e.id))
            .map(|e| e.id)
            .collect();

        for id in &pending {
            let mut modifier = PointOfInterestModifier::new(id.clone());
            modifier.on_load(&mut self.host)?;
            if self.editor_mode == Some(EditorMode::Open) {
                modifier.on_editor_open(&mut self.host)?;
            }
            self.modifiers.push(modifier);
        }
        Ok(pending.len())
    }

    /// Bring modifiers in line with a world that was replaced wholesale:
    /// drop the ones whose entity is gone, re-apply visibility on the rest
    /// and attach new ones
    pub fn sync_modifiers(&mut self) -> Result<usize> {
        let entities = self.host.entities()?;
        self.modifiers
            .retain(|m| entities.iter().any(|e| e.id == m.entity_id()));

        for modifier in &mut self.modifiers {
            modifier.restore(&mut self.host)?;
        }
        self.load_modifiers()
    }

    /// Clear the icon of the marker on `entity_id`. Returns false when no
    /// modifier is attached to that entity.
    pub fn remove_image(&mut self, entity_id: &str) -> Result<bool> {
        let Some(modifier) = self
            .modifiers
            .iter_mut()
            .find(|m| m.entity_id() == entity_id)
        else {
            return Ok(false);
        };
        modifier.remove_image(&mut self.host, true)?;
        Ok(true)
    }

    /// Poll the editor state and show or hide every marker on a change
    pub fn tick(&mut self, now: Instant) -> Result<Option<EditorMode>> {
        let Some(mode) = self.editor_watch.poll(now, &self.host) else {
            return Ok(None);
        };

        for modifier in &mut self.modifiers {
            modifier.on_editor_mode(&mut self.host, mode)?;
        }
        self.editor_mode = Some(mode);
        tracing::debug!(?mode, markers = self.modifiers.len(), "editor mode changed");
        Ok(Some(mode))
    }

    /// Every point of interest currently in the world
    pub fn points(&self) -> Result<Vec<PointOfInterest>> {
        Ok(self.registry.list_points(&self.host)?)
    }

    /// A random point matching the optional category and name
    pub fn random_point(
        &mut self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<PointOfInterest>> {
        let points = self.points()?;
        let filter = PointFilter::from_parts(category, name);
        Ok(selector::select_point(&points, Selection::Random, &filter, &mut self.rng))
    }

    /// The point closest to the avatar matching the optional category and name
    pub fn closest_point(
        &mut self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<PointOfInterest>> {
        let points = self.points()?;
        let filter = PointFilter::from_parts(category, name);
        let reference = self.host.current_position().unwrap_or(Vec3::ZERO);
        Ok(selector::select_point(
            &points,
            Selection::Nearest(reference),
            &filter,
            &mut self.rng,
        ))
    }

    /// Go to `point`, or to a random point when none is given
    pub fn go_to_point(&mut self, point: Option<PointOfInterest>) -> Result<NavigationOutcome> {
        let target = match point {
            Some(point) => selector::select_point(
                &[],
                Selection::Explicit(point),
                &PointFilter::new(),
                &mut self.rng,
            ),
            None => self.random_point(None, None)?,
        };
        self.navigate(target.as_ref())
    }

    pub fn go_to_random_point(
        &mut self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<NavigationOutcome> {
        let target = self.random_point(category, name)?;
        self.navigate(target.as_ref())
    }

    pub fn go_to_closest_point(
        &mut self,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<NavigationOutcome> {
        let target = self.closest_point(category, name)?;
        self.navigate(target.as_ref())
    }

    fn navigate(&mut self, point: Option<&PointOfInterest>) -> Result<NavigationOutcome> {
        Ok(self.navigator.navigate_to(point, &mut self.host, &mut self.rng)?)
    }

    /// Run an assistant action. Returns the confirmation text.
    pub fn invoke_action(&mut self, action: PointAction, input: &ActionInput) -> Result<String> {
        let value = action.required_value(input)?;
        tracing::info!(%action, ?value, "running assistant action");

        match action {
            PointAction::GoToPoint => self.go_to_closest_point(None, value)?,
            PointAction::GoToRandomPoint => self.go_to_random_point(None, None)?,
            PointAction::GoToClosestPoint => self.go_to_closest_point(None, None)?,
            PointAction::GoToClosestPointByCategory => self.go_to_closest_point(value, None)?,
            PointAction::GoToRandomPointByCategory => self.go_to_random_point(value, None)?,
        };
        Ok(MOVED_CONFIRMATION.to_string())
    }

    /// Run an assistant action by id, bare or plugin-scoped
    pub fn invoke_action_by_id(&mut self, id: &str, input: &ActionInput) -> Result<String> {
        let action = PointAction::from_id(id, PLUGIN_INFO.id)?;
        self.invoke_action(action, input)
    }

    /// Knowledge base entries describing the current points and the actions
    pub fn knowledge_base(&self) -> Result<Vec<KnowledgeBaseEntry>> {
        let points = self.points()?;
        Ok(actions::knowledge_base(PLUGIN_INFO.id, &points, self.config.can_edit))
    }

    /// Open or close the points panel. Returns the window state when the
    /// panel ends up open.
    pub fn toggle_ui(&mut self) -> Result<Option<PointsWindow>> {
        let points = self.points()?;
        if self.host.toggle_panel(MENU_ITEM_ID) {
            Ok(Some(PointsWindow::new(points)))
        } else {
            Ok(None)
        }
    }

    pub fn addable_entities(&self) -> Vec<AddableEntity> {
        vec![AddableEntity {
            id: "pointofinterest",
            name: "Point of Interest",
            icon: DEFAULT_ICON,
            description: "Adds a point of interest object.",
        }]
    }

    /// Place a new point two metres ahead of the camera, one metre to the
    /// side, and select it in the editor
    pub fn add_point(&mut self) -> Result<EntityId> {
        let position = placement_in_front(
            self.host.world_position(),
            self.host.world_direction(),
        );

        let entity = Entity {
            name: Some(self.config.marker_name.clone()),
            kind: Some("mesh".to_string()),
            sync: Some("template".to_string()),
            url: Some(INDICATOR_MODEL.to_string()),
            has_poi_modifier: true,
            hidden: false,
            physical: true,
            x: position.x,
            y: position.y,
            z: position.z,
            ..Default::default()
        };

        let id = self.host.add(entity)?;
        self.host.select(&id);
        tracing::info!(%id, x = position.x, y = position.y, z = position.z, "added point of interest");
        Ok(id)
    }
}

/// Menubar entry that opens the points panel
pub fn menubar_item() -> MenubarItem {
    MenubarItem {
        id: MENU_ITEM_ID.to_string(),
        name: "Points Of Interest".to_string(),
        description: "Can be used to go to point of interest items.".to_string(),
        is_panel: true,
        icon: DEFAULT_ICON.to_string(),
    }
}

/// Spot `PLACE_DISTANCE` along `direction` from `camera`, shifted
/// `PLACE_SIDE_OFFSET` along `up x direction`
pub fn placement_in_front(camera: Vec3, direction: Vec3) -> Vec3 {
    let ahead = direction.with_length(PLACE_DISTANCE);
    let side = Vec3::UP.cross(&ahead).with_length(PLACE_SIDE_OFFSET);
    camera + ahead + side
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_in_front() {
        let spot = placement_in_front(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!((spot.x + 1.0).abs() < 1e-9);
        assert!((spot.y - 1.6).abs() < 1e-9);
        assert!((spot.z + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_placement_looking_straight_down() {
        // No sideways axis exists; the point lands straight ahead
        let spot = placement_in_front(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0));
        assert!((spot.y + 2.0).abs() < 1e-9);
        assert!(spot.x.abs() < 1e-9 && spot.z.abs() < 1e-9);
    }

    #[test]
    fn test_menubar_item() {
        let item = menubar_item();
        assert_eq!(item.id, "pointsofinterest.menu");
        assert!(item.is_panel);
    }

    #[test]
    fn test_addable_entity() {
        let plugin = PointOfInterestPlugin::with_rng(
            crate::demo::SimulatedHost::new(Vec::new()),
            PluginConfig::default(),
            StdRng::seed_from_u64(0),
        );
        let entities = plugin.addable_entities();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, "pointofinterest");
        assert_eq!(entities[0].icon, DEFAULT_ICON);
    }

    #[test]
    fn test_plugin_info() {
        assert_eq!(PLUGIN_INFO.provides, &["pointofinterest", "modifier:pointofinterest"]);
        assert_eq!(PLUGIN_INFO.requires, &["avatars"]);
    }
}
