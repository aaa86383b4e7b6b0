//! Timed return of a released pin to its seat.
//!
//! The animation is an explicit state object advanced by the tick; dropping
//! it cancels the animation.

use extinguish_core::constants::MIN_DIVISOR;
use extinguish_core::types::Pose;

/// Cubic ease-in/ease-out on `[0, 1]`.
pub fn smoothstep(u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    u * u * (3.0 - 2.0 * u)
}

/// In-flight snap-back. Poses are in the slot (parent) frame so the seat
/// stays correct if the extinguisher moves mid-animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapBack {
    from: Pose,
    to: Pose,
    elapsed: f64,
    duration: f64,
}

impl SnapBack {
    pub fn new(from: Pose, to: Pose, duration: f64) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance by `dt` and return the interpolated local pose. Once finished
    /// the exact target pose is returned.
    pub fn advance(&mut self, dt: f64) -> Pose {
        self.elapsed += dt.max(0.0);
        if self.is_finished() {
            return self.to;
        }
        let u = smoothstep(self.elapsed / self.duration.max(MIN_DIVISOR));
        Pose {
            position: self.from.position.lerp(self.to.position, u),
            rotation: self.from.rotation.slerp(self.to.rotation, u),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> Pose {
        self.to
    }
}
