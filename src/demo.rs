use rand::Rng;

use crate::error::HostError;
use crate::event::{EventSender, PluginEvent};
use crate::host::{
    AvatarControl, CameraControl, EditorControl, Entity, EntityId, EntityPatch, EntityStore,
    EventSink, InMemoryStore, MenubarItem, PanelControl,
};
use crate::point::{Category, Quat, Vec3};

// ============================================================================
// SIMULATED HOST
// ============================================================================

/// Eye height of the simulated camera above the avatar's feet
const EYE_HEIGHT: f64 = 1.6;

/// A host runtime stand-in that keeps the world in memory and records every
/// call the plugin makes
#[derive(Default)]
pub struct SimulatedHost {
    pub store: InMemoryStore,
    pub avatar: Option<Vec3>,
    pub yaw: f64,
    pub editor_open: bool,
    pub open_panel: Option<String>,
    pub selected: Option<EntityId>,
    pub menubar: Vec<MenubarItem>,
    /// Every event sent, oldest first
    pub events: Vec<PluginEvent>,
    /// Forwarded copies of events, for a live consumer
    pub forward: Option<EventSender>,
}

impl SimulatedHost {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            store: InMemoryStore::with_entities(entities),
            avatar: Some(Vec3::ZERO),
            ..Default::default()
        }
    }

    pub fn with_event_forwarding(mut self, sender: EventSender) -> Self {
        self.forward = Some(sender);
        self
    }

    pub fn set_editor_open(&mut self, open: bool) {
        self.editor_open = open;
    }

    pub fn is_panel_open(&self, id: &str) -> bool {
        self.open_panel.as_deref() == Some(id)
    }

    /// Number of navigation moves performed so far
    pub fn move_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PluginEvent::Moved(_)))
            .count()
    }
}

impl EntityStore for SimulatedHost {
    fn entities(&self) -> Result<Vec<Entity>, HostError> {
        self.store.entities()
    }

    fn add(&mut self, entity: Entity) -> Result<EntityId, HostError> {
        self.store.add(entity)
    }

    fn update(&mut self, id: &str, patch: &EntityPatch) -> Result<(), HostError> {
        self.store.update(id, patch)
    }
}

impl AvatarControl for SimulatedHost {
    fn current_position(&self) -> Option<Vec3> {
        self.avatar
    }

    fn move_to(&mut self, target: Vec3) -> Result<(), HostError> {
        self.avatar = Some(target);
        Ok(())
    }
}

impl CameraControl for SimulatedHost {
    fn set_yaw(&mut self, yaw: f64) -> Result<(), HostError> {
        self.yaw = yaw;
        Ok(())
    }

    fn world_position(&self) -> Vec3 {
        self.avatar.unwrap_or(Vec3::ZERO) + Vec3::new(0.0, EYE_HEIGHT, 0.0)
    }

    /// Camera looks down -Z at zero yaw and turns with it
    fn world_direction(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }
}

impl PanelControl for SimulatedHost {
    fn add_menubar_item(&mut self, item: MenubarItem) {
        self.menubar.retain(|m| m.id != item.id);
        self.menubar.push(item);
    }

    fn toggle_panel(&mut self, id: &str) -> bool {
        if self.is_panel_open(id) {
            self.open_panel = None;
            false
        } else {
            self.open_panel = Some(id.to_string());
            true
        }
    }

    fn close_panel(&mut self) {
        self.open_panel = None;
    }
}

impl EventSink for SimulatedHost {
    fn send_event(&mut self, event: PluginEvent) {
        if let Some(ref mut forward) = self.forward {
            forward.send_event(event.clone());
        }
        self.events.push(event);
    }
}

impl EditorControl for SimulatedHost {
    fn is_open(&self) -> bool {
        self.editor_open
    }

    fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }
}

// ============================================================================
// DEMO WORLD
// ============================================================================

/// A place in the demo world
struct DemoPlace {
    name: &'static str,
    description: &'static str,
    category: Category,
    position: (f64, f64, f64),
    /// Arrival facing in degrees, if any
    facing: Option<f64>,
}

const DEMO_PLACES: [DemoPlace; 8] = [
    DemoPlace {
        name: "Lobby Desk",
        description: "Where every visit starts; ask the host for a map",
        category: Category::General,
        position: (0.0, 0.0, -4.0),
        facing: Some(180.0),
    },
    DemoPlace {
        name: "Sculpture Garden",
        description: "Open-air gallery with rotating pieces",
        category: Category::Content,
        position: (18.0, 0.0, -12.0),
        facing: None,
    },
    DemoPlace {
        name: "Cinema",
        description: "Short films on loop",
        category: Category::Media,
        position: (-22.0, 0.0, 6.0),
        facing: Some(90.0),
    },
    DemoPlace {
        name: "Listening Booth",
        description: "Headphones and a crate of records",
        category: Category::Media,
        position: (-9.0, 3.5, 14.0),
        facing: None,
    },
    DemoPlace {
        name: "Climbing Wall",
        description: "Race a friend to the top",
        category: Category::Activity,
        position: (30.0, 0.0, 20.0),
        facing: Some(-45.0),
    },
    DemoPlace {
        name: "Quiz Corner",
        description: "Ten questions, one winner",
        category: Category::Activity,
        position: (6.0, 0.0, 25.0),
        facing: None,
    },
    DemoPlace {
        name: "Library Annex",
        description: "Reading lists and talks",
        category: Category::Content,
        position: (-15.0, 7.0, -20.0),
        facing: Some(0.0),
    },
    DemoPlace {
        name: "Rooftop Terrace",
        description: "Best view of the whole space",
        category: Category::General,
        position: (2.0, 12.0, 2.0),
        facing: None,
    },
];

/// Demo world: named points across every category plus some scenery that
/// the registry must ignore
pub fn demo_world() -> Vec<Entity> {
    let mut entities: Vec<Entity> = DEMO_PLACES
        .iter()
        .enumerate()
        .map(|(i, place)| {
            let rotation = place.facing.map(|deg| Quat::from_yaw(deg.to_radians()));
            Entity {
                id: format!("poi-{}", i + 1),
                name: Some("Point of Interest".to_string()),
                kind: Some("mesh".to_string()),
                x: place.position.0,
                y: place.position.1,
                z: place.position.2,
                quat_x: rotation.map(|q| q.x),
                quat_y: rotation.map(|q| q.y),
                quat_z: rotation.map(|q| q.z),
                quat_w: rotation.map(|q| q.w),
                has_poi_modifier: true,
                pointofinterest_name: Some(place.name.to_string()),
                pointofinterest_description: Some(place.description.to_string()),
                pointofinterest_category: Some(place.category.as_str().to_string()),
                ..Default::default()
            }
        })
        .collect();

    for (i, name) in ["Tree", "Bench", "Lamp Post"].iter().enumerate() {
        entities.push(Entity {
            id: format!("scenery-{}", i + 1),
            name: Some(name.to_string()),
            kind: Some("mesh".to_string()),
            x: i as f64 * 5.0,
            physical: true,
            ..Default::default()
        });
    }

    entities
}

/// Scatter `count` extra unnamed points of random category within `extent`
/// world units of the origin
pub fn scatter_points<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f64) -> Vec<Entity> {
    const CATEGORIES: [Category; 4] = [
        Category::General,
        Category::Content,
        Category::Media,
        Category::Activity,
    ];

    (0..count)
        .map(|i| Entity {
            id: format!("scatter-{}", i + 1),
            name: Some("Point of Interest".to_string()),
            x: rng.gen_range(-extent..=extent),
            z: rng.gen_range(-extent..=extent),
            has_poi_modifier: true,
            pointofinterest_category: Some(
                CATEGORIES[rng.gen_range(0..CATEGORIES.len())]
                    .as_str()
                    .to_string(),
            ),
            ..Default::default()
        })
        .collect()
}
