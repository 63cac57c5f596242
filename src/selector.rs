//! Choosing which point satisfies a navigation request.
//!
//! Filters run first, whatever the mode: category is an exact match on the
//! point's effective category, name is a case-insensitive substring match.
//! Either filter is skipped when not supplied. An empty candidate set is a
//! normal outcome and yields `None`.

use rand::Rng;

use crate::point::{PointOfInterest, Vec3};

/// Optional category and name constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointFilter {
    category: Option<String>,
    name: Option<String>,
}

impl PointFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from optional caller input; blank strings count as absent
    pub fn from_parts(category: Option<&str>, name: Option<&str>) -> Self {
        let mut filter = Self::new();
        if let Some(category) = category {
            filter = filter.category(category);
        }
        if let Some(name) = name {
            filter = filter.name(name);
        }
        filter
    }

    pub fn category(mut self, category: impl AsRef<str>) -> Self {
        self.category = normalize(category.as_ref());
        self
    }

    pub fn name(mut self, query: impl AsRef<str>) -> Self {
        self.name = normalize(query.as_ref());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.name.is_none()
    }

    pub fn matches(&self, point: &PointOfInterest) -> bool {
        if let Some(ref category) = self.category {
            if point.category.as_str() != category {
                return false;
            }
        }

        if let Some(ref query) = self.name {
            match point.name {
                Some(ref name) => name.to_lowercase().contains(query.as_str()),
                None => false,
            }
        } else {
            true
        }
    }

    /// Surviving points, in their original order
    pub fn apply<'a>(&self, points: &'a [PointOfInterest]) -> Vec<&'a PointOfInterest> {
        points.iter().filter(|p| self.matches(p)).collect()
    }
}

fn normalize(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_lowercase())
}

/// Selection policy
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A point the caller already picked; returned unchanged, filters unused
    Explicit(PointOfInterest),
    /// Uniform choice among the filtered points
    Random,
    /// Filtered point closest to the reference position
    Nearest(Vec3),
}

/// Resolve a selection against a point snapshot
pub fn select_point<R>(
    points: &[PointOfInterest],
    selection: Selection,
    filter: &PointFilter,
    rng: &mut R,
) -> Option<PointOfInterest>
where
    R: Rng + ?Sized,
{
    let chosen = match selection {
        Selection::Explicit(point) => return Some(point),
        Selection::Random => random_point(points, filter, rng),
        Selection::Nearest(reference) => nearest_point(points, filter, &reference),
    };

    match chosen {
        Some(point) => {
            tracing::debug!(id = %point.id, name = point.display_name(), "selected point of interest");
            Some(point.clone())
        }
        None => {
            tracing::warn!(?filter, "no point of interest matches");
            None
        }
    }
}

/// Uniformly random filtered point
pub fn random_point<'a, R>(
    points: &'a [PointOfInterest],
    filter: &PointFilter,
    rng: &mut R,
) -> Option<&'a PointOfInterest>
where
    R: Rng + ?Sized,
{
    let candidates = filter.apply(points);
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Filtered point closest to `reference`; ties go to the earliest point
pub fn nearest_point<'a>(
    points: &'a [PointOfInterest],
    filter: &PointFilter,
    reference: &Vec3,
) -> Option<&'a PointOfInterest> {
    rank_by_distance(points, filter, reference)
        .into_iter()
        .next()
        .map(|(_, point)| point)
}

/// Filtered points with their distance to `reference`, closest first.
///
/// The sort is stable, so equal distances keep their original order.
pub fn rank_by_distance<'a>(
    points: &'a [PointOfInterest],
    filter: &PointFilter,
    reference: &Vec3,
) -> Vec<(f64, &'a PointOfInterest)> {
    let mut ranked: Vec<_> = filter
        .apply(points)
        .into_iter()
        .map(|p| (reference.distance_to(&p.position), p))
        .collect();

    // Stable, so equal distances keep store order
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
}
