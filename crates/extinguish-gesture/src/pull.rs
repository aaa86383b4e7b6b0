//! Pull-gesture state machine: `Idle → Tracking → Pulled`.
//!
//! Progress is recomputed from scratch every tick. Drifting off-axis drops
//! it to zero even after a partial pull; only a single tick at full travel
//! within tolerance completes the gesture.

use glam::DVec3;
use tracing::{debug, trace, warn};

use extinguish_core::config::PinConfig;
use extinguish_core::constants::MIN_DIVISOR;
use extinguish_core::enums::PinPhase;
use extinguish_core::types::Pose;

use crate::snap_back::SnapBack;

/// One tick's measurement of the hand relative to the seat.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PullSample {
    /// Travel along the pull axis (meters). Never negative under require-forward.
    pub signed_distance: f64,
    /// Distance from the pull axis (meters).
    pub lateral_offset: f64,
    /// Pull progress in `[0, 1]`.
    pub progress01: f64,
}

/// Measure a displacement `delta` from the seat against a unit `axis`.
pub fn measure(delta: DVec3, axis: DVec3, settings: &PinConfig) -> PullSample {
    let mut signed_distance = delta.dot(axis);
    if settings.require_forward {
        signed_distance = signed_distance.max(0.0);
    }
    let lateral_offset = (delta - axis * signed_distance).length();

    let progress01 = if lateral_offset <= settings.lateral_tolerance {
        let usable = (signed_distance - settings.start_deadzone).max(0.0);
        let span = (settings.pull_distance - settings.start_deadzone).max(MIN_DIVISOR);
        (usable / span).clamp(0.0, 1.0)
    } else {
        0.0
    };

    PullSample {
        signed_distance,
        lateral_offset,
        progress01,
    }
}

/// What happened when the hand let go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The pin was not held; nothing changed.
    NotHeld,
    /// Incomplete pull: the pin is animating back to its seat.
    SnapBack,
    /// The pin was already pulled: it is now loose.
    Detached,
}

/// Gesture state for one safety pin.
#[derive(Debug, Clone)]
pub struct PullGesture {
    settings: PinConfig,
    /// Seat pose in the slot frame.
    seat: Pose,
    /// Unit pull axis in the slot frame.
    axis: DVec3,
    phase: PinPhase,
    held: bool,
    sample: PullSample,
    snap_back: Option<SnapBack>,
}

impl PullGesture {
    /// Create a seated, idle gesture. `seat` is expressed in the slot frame.
    pub fn new(seat: Pose, settings: PinConfig) -> Self {
        let axis = settings.pull_direction.try_normalize().unwrap_or_else(|| {
            warn!("pin pull direction is zero length, falling back to +x");
            DVec3::X
        });
        Self {
            settings,
            seat,
            axis,
            phase: PinPhase::Idle,
            held: false,
            sample: PullSample::default(),
            snap_back: None,
        }
    }

    pub fn phase(&self) -> PinPhase {
        self.phase
    }

    pub fn is_pulled(&self) -> bool {
        self.phase == PinPhase::Pulled
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn sample(&self) -> PullSample {
        self.sample
    }

    pub fn progress(&self) -> f64 {
        self.sample.progress01
    }

    pub fn seat(&self) -> Pose {
        self.seat
    }

    pub fn axis(&self) -> DVec3 {
        self.axis
    }

    pub fn is_snapping_back(&self) -> bool {
        self.snap_back.is_some()
    }

    /// Hand closed on the pin. Cancels a running snap-back.
    /// Returns true if this started a new tracking session.
    pub fn begin_hold(&mut self) -> bool {
        self.held = true;
        if self.snap_back.take().is_some() {
            debug!("pin snap-back cancelled by grab");
        }
        match self.phase {
            PinPhase::Idle => {
                self.phase = PinPhase::Tracking;
                self.sample = PullSample::default();
                true
            }
            PinPhase::Tracking | PinPhase::Pulled => false,
        }
    }

    /// Hand opened. `current` is the pin's world pose and `frame` the slot
    /// frame's world pose at the moment of release.
    pub fn end_hold(&mut self, current: &Pose, frame: &Pose) -> ReleaseOutcome {
        if !self.held {
            return ReleaseOutcome::NotHeld;
        }
        self.held = false;

        if self.phase == PinPhase::Pulled {
            return ReleaseOutcome::Detached;
        }

        self.phase = PinPhase::Idle;
        self.sample = PullSample::default();
        self.snap_back = Some(SnapBack::new(
            frame.relative(current),
            self.seat,
            self.settings.snap_back_secs,
        ));
        ReleaseOutcome::SnapBack
    }

    /// Measure the held pin at world `position` against the slot `frame`.
    /// Returns true exactly once, on the tick the pull completes.
    pub fn track(&mut self, position: DVec3, frame: &Pose) -> bool {
        if self.phase != PinPhase::Tracking {
            return false;
        }

        let world_start = frame.transform_point(self.seat.position);
        let world_axis = frame.transform_direction(self.axis);
        self.sample = measure(position - world_start, world_axis, &self.settings);

        trace!(
            progress = self.sample.progress01,
            dist_cm = self.sample.signed_distance * 100.0,
            lateral_cm = self.sample.lateral_offset * 100.0,
            tol_cm = self.settings.lateral_tolerance * 100.0,
            "pin sample"
        );

        if self.sample.progress01 >= 1.0 {
            self.phase = PinPhase::Pulled;
            debug!("pin pulled");
            return true;
        }
        false
    }

    /// Advance a running snap-back by `dt`. Returns the pin's pose in the
    /// slot frame and whether the animation finished this tick, or `None`
    /// when no animation is running.
    pub fn advance_snap_back(&mut self, dt: f64) -> Option<(Pose, bool)> {
        let anim = self.snap_back.as_mut()?;
        let pose = anim.advance(dt);
        let finished = anim.is_finished();
        if finished {
            self.snap_back = None;
        }
        Some((pose, finished))
    }

    /// Developer reset: back to seated and idle, whatever the phase.
    pub fn reset(&mut self) {
        self.phase = PinPhase::Idle;
        self.held = false;
        self.sample = PullSample::default();
        self.snap_back = None;
    }
}
