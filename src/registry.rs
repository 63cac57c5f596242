use crate::config::DEFAULT_MARKER_NAME;
use crate::error::HostError;
use crate::host::{Entity, EntityStore};
use crate::point::PointOfInterest;

/// Read-only view over the points of interest in the entity store
#[derive(Debug, Clone)]
pub struct PointRegistry {
    marker_name: String,
}

impl PointRegistry {
    pub fn new(marker_name: impl Into<String>) -> Self {
        Self {
            marker_name: marker_name.into(),
        }
    }

    /// An entity is a point when it carries the marker name or the flag the
    /// modifier sets on load
    pub fn is_point_of_interest(&self, entity: &Entity) -> bool {
        entity.point_of_interest_object || entity.name.as_deref() == Some(self.marker_name.as_str())
    }

    /// Snapshot of every point currently in the world, in store order
    pub fn list_points<S>(&self, store: &S) -> Result<Vec<PointOfInterest>, HostError>
    where
        S: EntityStore + ?Sized,
    {
        let points = store
            .entities()?
            .iter()
            .filter(|e| self.is_point_of_interest(e))
            .map(PointOfInterest::from_entity)
            .collect();
        Ok(points)
    }
}

impl Default for PointRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_NAME)
    }
}
