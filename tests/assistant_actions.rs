use rand::rngs::StdRng;
use rand::SeedableRng;

use poi_navigator::actions::{EntryKind, MOVED_CONFIRMATION};
use poi_navigator::demo::{demo_world, SimulatedHost};
use poi_navigator::{ActionInput, PluginConfig, PoiError, PointAction, PointOfInterestPlugin};

fn demo_plugin(config: PluginConfig) -> PointOfInterestPlugin<SimulatedHost> {
    let host = SimulatedHost::new(demo_world());
    let mut plugin = PointOfInterestPlugin::with_rng(host, config, StdRng::seed_from_u64(7));
    plugin.on_load().unwrap();
    plugin
}

#[test]
fn go_to_point_travels_to_the_named_place() {
    let mut plugin = demo_plugin(PluginConfig::default());

    let reply = plugin
        .invoke_action(PointAction::GoToPoint, &ActionInput::new("lobby desk"))
        .unwrap();
    assert_eq!(reply, MOVED_CONFIRMATION);

    let avatar = plugin.host().avatar.unwrap();
    assert!((avatar.x - 0.0).abs() <= 1.0);
    assert!((avatar.z - -4.0).abs() <= 1.0);
    assert!((avatar.y - 0.1).abs() < 1e-9);
}

#[test]
fn missing_values_are_rejected_before_moving() {
    let mut plugin = demo_plugin(PluginConfig::default());

    let err = plugin
        .invoke_action(PointAction::GoToPoint, &ActionInput::empty())
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot go to empty name.");

    for action in [
        PointAction::GoToClosestPointByCategory,
        PointAction::GoToRandomPointByCategory,
    ] {
        let err = plugin.invoke_action(action, &ActionInput::new("")).unwrap_err();
        assert!(matches!(err, PoiError::MissingValue(_)));
        assert_eq!(err.to_string(), "Cannot go to empty category.");
    }

    assert_eq!(plugin.host().move_count(), 0);
}

#[test]
fn actions_without_values_ignore_the_input() {
    let mut plugin = demo_plugin(PluginConfig::default());
    for action in [PointAction::GoToRandomPoint, PointAction::GoToClosestPoint] {
        let reply = plugin.invoke_action(action, &ActionInput::empty()).unwrap();
        assert_eq!(reply, MOVED_CONFIRMATION);
    }
    assert_eq!(plugin.host().move_count(), 2);
}

#[test]
fn closest_by_category_reaches_the_nearest_of_that_kind() {
    let mut plugin = demo_plugin(PluginConfig::default());

    plugin
        .invoke_action(
            PointAction::GoToClosestPointByCategory,
            &ActionInput::new("Media"),
        )
        .unwrap();

    // From the origin the listening booth is nearer than the cinema
    let avatar = plugin.host().avatar.unwrap();
    assert!((avatar.x - -9.0).abs() <= 1.0);
    assert!((avatar.y - 3.6).abs() < 1e-9);
    assert!((avatar.z - 14.0).abs() <= 1.0);
}

#[test]
fn unmatched_name_still_confirms_the_move() {
    let mut plugin = demo_plugin(PluginConfig::default());
    let reply = plugin
        .invoke_action(PointAction::GoToPoint, &ActionInput::new("moon base"))
        .unwrap();
    assert_eq!(reply, MOVED_CONFIRMATION);
    assert_eq!(plugin.host().move_count(), 1);
}

#[test]
fn actions_resolve_by_bare_and_scoped_id() {
    let mut plugin = demo_plugin(PluginConfig::default());

    plugin
        .invoke_action_by_id("goToRandomPoint", &ActionInput::empty())
        .unwrap();
    plugin
        .invoke_action_by_id(
            "pointofinterest:goToRandomPointByCategory",
            &ActionInput::new("activity"),
        )
        .unwrap();
    assert_eq!(plugin.host().move_count(), 2);

    let err = plugin
        .invoke_action_by_id("teleportHome", &ActionInput::empty())
        .unwrap_err();
    assert!(matches!(err, PoiError::UnknownAction(ref id) if id == "teleportHome"));
}

#[test]
fn knowledge_base_lists_points_and_actions() {
    let plugin = demo_plugin(PluginConfig::default());
    let entries = plugin.knowledge_base().unwrap();

    assert_eq!(entries.len(), 6);
    let info = &entries[0];
    assert_eq!(info.id, "pointofinterest:info");
    assert_eq!(info.kind, EntryKind::Info);
    assert!(info.content.contains("name=Lobby Desk description="));
    assert!(info.content.ends_with("speak about them in natural language."));

    let go_to_point = entries
        .iter()
        .find(|e| e.id == "pointofinterest:goToPoint")
        .unwrap();
    assert_eq!(go_to_point.kind, EntryKind::Action);
    assert!(go_to_point.content.contains("Cinema"));
    assert!(go_to_point.content.contains("Rooftop Terrace"));
}

#[test]
fn knowledge_base_invites_editors_to_add_points() {
    let config = PluginConfig {
        can_edit: true,
        ..PluginConfig::default()
    };
    let plugin = demo_plugin(config);
    let info = &plugin.knowledge_base().unwrap()[0];
    assert!(info.content.contains("Add Point of Interest"));
    assert!(!info.content.contains("speak about them in natural language."));
}

#[test]
fn knowledge_base_serialises_with_type_field() {
    let plugin = demo_plugin(PluginConfig::default());
    let json = serde_json::to_value(plugin.knowledge_base().unwrap()).unwrap();
    assert_eq!(json[0]["type"], "info");
    assert_eq!(json[1]["type"], "action");
}
