//! Turning a chosen point into a concrete avatar move.

use rand::Rng;

use crate::config::NavigatorConfig;
use crate::error::HostError;
use crate::event::PluginEvent;
use crate::host::{AvatarControl, CameraControl, EntityId, EventSink, PanelControl};
use crate::point::{PointOfInterest, Quat, Vec3};

/// Result of one navigation attempt
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationOutcome {
    pub target_position: Vec3,
    pub target_yaw: f64,
    /// True when a real point was the target. The avatar is moved either way.
    pub moved: bool,
    pub point_id: Option<EntityId>,
}

/// Computes arrival poses and drives the host to them
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    config: NavigatorConfig,
}

impl Navigator {
    pub fn new(config: NavigatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Independent uniform X and Z offsets in `[-radius, radius]`
    pub fn random_offset<R>(&self, rng: &mut R) -> (f64, f64)
    where
        R: Rng + ?Sized,
    {
        let r = self.config.radius_offset.abs();
        if r == 0.0 {
            return (0.0, 0.0);
        }
        (rng.gen_range(-r..=r), rng.gen_range(-r..=r))
    }

    /// Arrival pose for `point`, without touching the host.
    ///
    /// With no point the pose is built from zero coordinates, so callers
    /// still land near the world origin instead of staying put.
    pub fn plan<R>(&self, point: Option<&PointOfInterest>, rng: &mut R) -> NavigationOutcome
    where
        R: Rng + ?Sized,
    {
        let base = point.map(|p| p.position).unwrap_or(Vec3::ZERO);
        let (dx, dz) = self.random_offset(rng);
        let target_position = base + Vec3::new(dx, self.config.vertical_lift, dz);

        let facing = point
            .and_then(|p| p.rotation)
            .filter(|q| !q.is_zero())
            .unwrap_or(Quat::ZERO);

        NavigationOutcome {
            target_position,
            target_yaw: facing.yaw_yxz(),
            moved: point.is_some(),
            point_id: point.map(|p| p.id.clone()),
        }
    }

    /// Move the avatar to `point`, face it the point's way, close any open
    /// panel and announce the move on the event bus.
    ///
    /// An absent point is logged and degrades to a best-effort move; only
    /// host failures are returned as errors.
    pub fn navigate_to<H, R>(
        &self,
        point: Option<&PointOfInterest>,
        host: &mut H,
        rng: &mut R,
    ) -> Result<NavigationOutcome, HostError>
    where
        H: AvatarControl + CameraControl + PanelControl + EventSink + ?Sized,
        R: Rng + ?Sized,
    {
        if point.is_none() {
            tracing::warn!("no points of interest found in the world");
        }

        let outcome = self.plan(point, rng);

        host.move_to(outcome.target_position)?;
        host.set_yaw(outcome.target_yaw)?;
        host.close_panel();
        host.send_event(PluginEvent::Moved(outcome.target_position.into()));

        tracing::debug!(
            point = ?outcome.point_id,
            x = outcome.target_position.x,
            y = outcome.target_position.y,
            z = outcome.target_position.z,
            yaw = outcome.target_yaw,
            "moved avatar"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MenubarItem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recorder {
        moves: Vec<Vec3>,
        yaws: Vec<f64>,
        closes: usize,
        events: Vec<PluginEvent>,
        fail_moves: bool,
    }

    impl AvatarControl for Recorder {
        fn current_position(&self) -> Option<Vec3> {
            self.moves.last().copied()
        }

        fn move_to(&mut self, target: Vec3) -> Result<(), HostError> {
            if self.fail_moves {
                return Err(HostError::Movement("avatar not spawned".into()));
            }
            self.moves.push(target);
            Ok(())
        }
    }

    impl CameraControl for Recorder {
        fn set_yaw(&mut self, yaw: f64) -> Result<(), HostError> {
            self.yaws.push(yaw);
            Ok(())
        }

        fn world_position(&self) -> Vec3 {
            Vec3::ZERO
        }

        fn world_direction(&self) -> Vec3 {
            Vec3::new(0.0, 0.0, -1.0)
        }
    }

    impl PanelControl for Recorder {
        fn add_menubar_item(&mut self, _item: MenubarItem) {}

        fn toggle_panel(&mut self, _id: &str) -> bool {
            false
        }

        fn close_panel(&mut self) {
            self.closes += 1;
        }
    }

    impl EventSink for Recorder {
        fn send_event(&mut self, event: PluginEvent) {
            self.events.push(event);
        }
    }

    #[test]
    fn test_offset_stays_within_radius() {
        let navigator = Navigator::default();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10_000;
        let (mut sum_x, mut sum_z) = (0.0, 0.0);

        for _ in 0..n {
            let (dx, dz) = navigator.random_offset(&mut rng);
            assert!((-1.0..=1.0).contains(&dx));
            assert!((-1.0..=1.0).contains(&dz));
            sum_x += dx;
            sum_z += dz;
        }

        assert!((sum_x / n as f64).abs() < 0.05);
        assert!((sum_z / n as f64).abs() < 0.05);
    }

    #[test]
    fn test_zero_radius_disables_scatter() {
        let navigator = Navigator::new(NavigatorConfig {
            radius_offset: 0.0,
            ..Default::default()
        });
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(navigator.random_offset(&mut rng), (0.0, 0.0));
    }

    #[test]
    fn test_plan_lifts_and_scatters_target() {
        let navigator = Navigator::default();
        let point = PointOfInterest::new("p", Vec3::new(10.0, 2.0, -4.0));
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = navigator.plan(Some(&point), &mut rng);
        assert!(outcome.moved);
        assert_eq!(outcome.point_id.as_deref(), Some("p"));
        assert!((outcome.target_position.y - 2.1).abs() < 1e-12);
        assert!((outcome.target_position.x - 10.0).abs() <= 1.0);
        assert!((outcome.target_position.z + 4.0).abs() <= 1.0);
        assert_eq!(outcome.target_yaw, 0.0);
    }

    #[test]
    fn test_plan_uses_point_rotation() {
        let navigator = Navigator::default();
        let point = PointOfInterest::new("p", Vec3::ZERO).with_rotation(Quat::from_yaw(1.0));
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = navigator.plan(Some(&point), &mut rng);
        assert!((outcome.target_yaw - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rotation_means_no_facing() {
        let navigator = Navigator::default();
        let point = PointOfInterest::new("p", Vec3::ZERO).with_rotation(Quat::ZERO);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(navigator.plan(Some(&point), &mut rng).target_yaw, 0.0);
    }

    #[test]
    fn test_navigate_drives_every_collaborator() {
        let navigator = Navigator::default();
        let point = PointOfInterest::new("p", Vec3::new(3.0, 0.0, 3.0));
        let mut host = Recorder::default();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = navigator.navigate_to(Some(&point), &mut host, &mut rng).unwrap();

        assert_eq!(host.moves, vec![outcome.target_position]);
        assert_eq!(host.yaws, vec![outcome.target_yaw]);
        assert_eq!(host.closes, 1);
        assert_eq!(
            host.events,
            vec![PluginEvent::Moved(outcome.target_position.into())]
        );
    }

    #[test]
    fn test_navigate_without_point_degrades_to_origin() {
        let navigator = Navigator::default();
        let mut host = Recorder::default();
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = navigator.navigate_to(None, &mut host, &mut rng).unwrap();

        assert!(!outcome.moved);
        assert_eq!(outcome.point_id, None);
        assert_eq!(outcome.target_yaw, 0.0);
        assert!((outcome.target_position.y - 0.1).abs() < 1e-12);
        assert!(outcome.target_position.x.abs() <= 1.0);
        assert!(outcome.target_position.z.abs() <= 1.0);
        assert_eq!(host.moves.len(), 1);
        assert_eq!(host.events.len(), 1);
    }

    #[test]
    fn test_movement_failure_propagates() {
        let navigator = Navigator::default();
        let mut host = Recorder {
            fail_moves: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);

        let err = navigator.navigate_to(None, &mut host, &mut rng).unwrap_err();
        assert!(matches!(err, HostError::Movement(_)));
        assert!(host.events.is_empty());
    }
}
