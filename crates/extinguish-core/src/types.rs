//! Fundamental geometric and simulation types.
//!
//! World space is right-handed with y = Up and +z = Forward, the same
//! convention the VR input layer reports poses in.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{FALLOFF_FAR_WEIGHT, FALLOFF_NEAR_WEIGHT};

/// Identifier the input layer uses to address a simulated object.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World-space (or parent-space) position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    pub fn new(position: DVec3, rotation: DQuat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: DVec3) -> Self {
        Self {
            position,
            rotation: DQuat::IDENTITY,
        }
    }

    /// Local point → world point.
    pub fn transform_point(&self, local: DVec3) -> DVec3 {
        self.position + self.rotation * local
    }

    /// World point → local point.
    pub fn inverse_transform_point(&self, world: DVec3) -> DVec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Local direction → world direction (rotation only).
    pub fn transform_direction(&self, local: DVec3) -> DVec3 {
        self.rotation * local
    }

    /// Unit forward axis (+z rotated by this pose).
    pub fn forward(&self) -> DVec3 {
        self.rotation * DVec3::Z
    }

    /// Compose a child pose expressed in this pose's frame into world space.
    pub fn compose(&self, local: &Pose) -> Pose {
        Pose {
            position: self.transform_point(local.position),
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }

    /// Express a world pose in this pose's frame (inverse of `compose`).
    pub fn relative(&self, world: &Pose) -> Pose {
        let inv = self.rotation.inverse();
        Pose {
            position: inv * (world.position - self.position),
            rotation: (inv * world.rotation).normalize(),
        }
    }
}

/// Simulation time tracking. Ticks are variable-length: `dt` is always
/// supplied by the caller, never read from a clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds. Negative steps count as zero.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt.max(0.0);
    }
}

/// Bit mask of collision layers used to filter spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const FIRE: LayerMask = LayerMask(1 << 0);
    pub const PROP: LayerMask = LayerMask(1 << 1);
    pub const PIN: LayerMask = LayerMask(1 << 2);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// True if any bit of `layer` is set in this mask.
    pub fn contains(self, layer: LayerMask) -> bool {
        self.0 & layer.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

/// Piecewise-linear weight curve over normalized distance.
///
/// Keys are `[t, weight]` pairs with `t` strictly increasing in `[0, 1]`,
/// weights in `[0, 1]` and non-increasing. Deserialization validates, so a
/// curve that exists is always well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct FalloffCurve {
    keys: Vec<[f64; 2]>,
}

impl Default for FalloffCurve {
    fn default() -> Self {
        Self::linear(FALLOFF_NEAR_WEIGHT, FALLOFF_FAR_WEIGHT)
    }
}

impl FalloffCurve {
    /// Straight line from `near` at t=0 to `far` at t=1.
    /// Values are clamped so the result is always a valid curve.
    pub fn linear(near: f64, far: f64) -> Self {
        let near = near.clamp(0.0, 1.0);
        let far = far.clamp(0.0, near);
        Self {
            keys: vec![[0.0, near], [1.0, far]],
        }
    }

    /// Build a curve from keyframes, rejecting malformed input.
    pub fn from_keys(keys: Vec<[f64; 2]>) -> Result<Self, String> {
        if keys.is_empty() {
            return Err("falloff curve needs at least one key".into());
        }
        for (i, [t, w]) in keys.iter().copied().enumerate() {
            if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&w) {
                return Err(format!("falloff key {i} ({t}, {w}) outside [0, 1]"));
            }
            if i > 0 {
                let [prev_t, prev_w] = keys[i - 1];
                if t <= prev_t {
                    return Err(format!("falloff key {i}: t must strictly increase"));
                }
                if w > prev_w {
                    return Err(format!("falloff key {i}: weight must not increase"));
                }
            }
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[[f64; 2]] {
        &self.keys
    }

    /// Sample the curve at `t` (clamped to `[0, 1]`).
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let first = self.keys[0];
        if t <= first[0] {
            return first[1];
        }
        for pair in self.keys.windows(2) {
            let [t0, w0] = pair[0];
            let [t1, w1] = pair[1];
            if t <= t1 {
                let u = (t - t0) / (t1 - t0);
                return w0 + (w1 - w0) * u;
            }
        }
        self.keys[self.keys.len() - 1][1]
    }
}

impl TryFrom<Vec<[f64; 2]>> for FalloffCurve {
    type Error = String;

    fn try_from(keys: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::from_keys(keys)
    }
}

impl From<FalloffCurve> for Vec<[f64; 2]> {
    fn from(curve: FalloffCurve) -> Self {
        curve.keys
    }
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
