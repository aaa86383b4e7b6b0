//! Fire heat pool: extinguish and reignite transitions for one target.

use serde::{Deserialize, Serialize};

use extinguish_core::config::FireConfig;
use extinguish_core::constants::*;
use extinguish_core::state::FireEffects;
use extinguish_core::types::lerp;

/// Result of applying extinguishing power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatChange {
    /// Already out, or zero amount.
    Unchanged,
    /// Heat dropped but the fire is still burning.
    Cooled,
    /// Heat reached zero on this call.
    Extinguished,
}

/// Heat state of one fire target.
///
/// `0 <= heat <= max_heat` always. Once out, heat stays at zero until a
/// reignite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatState {
    max_heat: f64,
    heat: f64,
    is_out: bool,
    /// Zero disables reignite.
    reignite_delay: f64,
    reignite_fraction: f64,
    /// Seconds since the fire went out.
    out_elapsed: f64,
}

impl HeatState {
    /// A fully burning fire that never reignites.
    pub fn new(max_heat: f64) -> Self {
        let max_heat = max_heat.max(f64::EPSILON);
        Self {
            max_heat,
            heat: max_heat,
            is_out: false,
            reignite_delay: 0.0,
            reignite_fraction: FIRE_REIGNITE_FRACTION,
            out_elapsed: 0.0,
        }
    }

    /// Enable reignite `delay` seconds after going out, at `fraction` of max heat.
    pub fn with_reignite(mut self, delay: f64, fraction: f64) -> Self {
        self.reignite_delay = delay.max(0.0);
        self.reignite_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn from_config(config: &FireConfig) -> Self {
        Self::new(config.max_heat).with_reignite(config.reignite_delay_secs, config.reignite_fraction)
    }

    pub fn heat(&self) -> f64 {
        self.heat
    }

    pub fn max_heat(&self) -> f64 {
        self.max_heat
    }

    pub fn is_out(&self) -> bool {
        self.is_out
    }

    /// `heat / max_heat`.
    pub fn fraction(&self) -> f64 {
        (self.heat / self.max_heat).clamp(0.0, 1.0)
    }

    /// Remove `amount` heat. No-op once out; negative amounts count as zero.
    pub fn apply_extinguish(&mut self, amount: f64) -> HeatChange {
        if self.is_out || amount.is_nan() || amount <= 0.0 {
            return HeatChange::Unchanged;
        }
        self.heat = (self.heat - amount).max(0.0);
        if self.heat <= 0.0 {
            self.heat = 0.0;
            self.is_out = true;
            self.out_elapsed = 0.0;
            HeatChange::Extinguished
        } else {
            HeatChange::Cooled
        }
    }

    /// True once the configured delay has passed since going out.
    pub fn can_reignite(&self) -> bool {
        self.is_out && self.reignite_delay > 0.0 && self.out_elapsed >= self.reignite_delay
    }

    /// Flare back up to a fraction of max heat. Refused until the delay
    /// has elapsed.
    pub fn reignite(&mut self) -> bool {
        if !self.can_reignite() {
            return false;
        }
        self.is_out = false;
        self.out_elapsed = 0.0;
        self.heat = self.max_heat * self.reignite_fraction;
        true
    }

    /// Advance the out-timer by `dt`, reigniting automatically when due.
    /// Returns true if the fire reignited this step.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.is_out || self.reignite_delay <= 0.0 {
            return false;
        }
        self.out_elapsed += dt.max(0.0);
        self.reignite()
    }

    /// Particle, light and audio intensities for the current heat.
    pub fn effects(&self) -> FireEffects {
        fire_effects(self.fraction())
    }
}

/// Effect intensities, each linear in the heat fraction `t`.
pub fn fire_effects(t: f64) -> FireEffects {
    FireEffects {
        emission_rate: lerp(0.0, FIRE_EMISSION_MAX, t),
        particle_size: lerp(FIRE_PARTICLE_SIZE_MIN, FIRE_PARTICLE_SIZE_MAX, t),
        light_intensity: lerp(0.0, FIRE_LIGHT_MAX, t),
        audio_volume: lerp(0.0, FIRE_VOLUME_MAX, t),
    }
}
