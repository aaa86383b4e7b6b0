//! Cone detector: which fire colliders does a spray jet reach, and how hard.
//!
//! A candidate is hit when its closest point lies within `range` of the
//! nozzle and within `half_angle_deg` of the spray axis. Its weight comes
//! from the falloff curve sampled at `distance / range`.

use glam::DVec3;
use tracing::warn;

use extinguish_core::constants::DIRECTION_EPSILON;
use extinguish_core::types::{FalloffCurve, LayerMask};

use crate::spatial::{Candidate, SpatialQuery};

/// One spray cone, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeQuery {
    pub origin: DVec3,
    /// Spray axis. Need not be normalized.
    pub forward: DVec3,
    pub range: f64,
    pub half_angle_deg: f64,
}

/// A candidate inside the cone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeHit {
    pub candidate: Candidate,
    pub distance: f64,
    /// Falloff weight in `[0, 1]`.
    pub weight: f64,
}

/// Angle in degrees between two directions, or `None` if either is degenerate.
pub fn angle_between_deg(a: DVec3, b: DVec3) -> Option<f64> {
    let a = a.try_normalize()?;
    let b = b.try_normalize()?;
    Some(a.dot(b).clamp(-1.0, 1.0).acos().to_degrees())
}

/// Geometric cone test for a single point. Returns the distance and weight
/// on a hit.
///
/// A zero-length axis disables the angular test. A point closer than
/// `DIRECTION_EPSILON` to the origin is always inside, at full weight.
pub fn within_cone(cone: &ConeQuery, falloff: &FalloffCurve, point: DVec3) -> Option<(f64, f64)> {
    if cone.range <= 0.0 {
        return None;
    }
    let to_point = point - cone.origin;
    let distance = to_point.length();
    if distance > cone.range {
        return None;
    }
    if distance < DIRECTION_EPSILON {
        return Some((distance, 1.0));
    }
    if cone.forward.length() >= DIRECTION_EPSILON {
        let angle = angle_between_deg(cone.forward, to_point)?;
        if angle > cone.half_angle_deg {
            return None;
        }
    }
    Some((distance, falloff.evaluate(distance / cone.range)))
}

/// Run a cone query against `spatial`. `filter` drops candidates before the
/// geometric test (e.g. colliders that resolve to no target).
pub fn query_hits<S, F>(
    spatial: &S,
    cone: &ConeQuery,
    falloff: &FalloffCurve,
    layers: LayerMask,
    mut filter: F,
) -> Vec<ConeHit>
where
    S: SpatialQuery + ?Sized,
    F: FnMut(&Candidate) -> bool,
{
    if cone.range <= 0.0 {
        return Vec::new();
    }
    if cone.forward.length() < DIRECTION_EPSILON {
        warn!("spray axis is zero length, angular test skipped");
    }

    spatial
        .overlap_sphere(cone.origin, cone.range, layers)
        .into_iter()
        .filter(|candidate| filter(candidate))
        .filter_map(|candidate| {
            within_cone(cone, falloff, candidate.closest_point).map(|(distance, weight)| ConeHit {
                candidate,
                distance,
                weight,
            })
        })
        .collect()
}
