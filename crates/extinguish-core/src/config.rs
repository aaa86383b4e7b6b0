//! Drill tuning configuration.
//!
//! Every field defaults to the matching value in `constants`, so a config
//! file only needs to name what it changes. `DrillConfig::from_json` parses
//! and validates in one step.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::FalloffCurve;

/// Top-level drill configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    pub tick_rate: TickRate,
    pub extinguisher: ExtinguisherConfig,
    pub pin: PinConfig,
    pub fire: FireConfig,
    pub layout: DrillLayout,
}

/// Tick rate wrapper so the default comes from `TICK_RATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickRate(pub u32);

impl Default for TickRate {
    fn default() -> Self {
        Self(TICK_RATE)
    }
}

impl TickRate {
    /// Seconds per tick.
    pub fn dt(self) -> f64 {
        1.0 / self.0.max(1) as f64
    }
}

/// Spray, pressure and nozzle tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtinguisherConfig {
    pub range: f64,
    pub half_angle_deg: f64,
    pub dps: f64,
    pub falloff: FalloffCurve,
    pub max_pressure: f64,
    pub consume_per_sec: f64,
    pub recharge_per_sec: f64,
    pub emission_min: f64,
    pub emission_max: f64,
    /// Scale extinguishing power by remaining pressure. Off by default:
    /// low pressure only thins the visible jet.
    pub scale_damage_with_pressure: bool,
    pub nozzle_offset: DVec3,
    pub nozzle_forward: DVec3,
}

impl Default for ExtinguisherConfig {
    fn default() -> Self {
        Self {
            range: SPRAY_RANGE,
            half_angle_deg: SPRAY_HALF_ANGLE_DEG,
            dps: SPRAY_DPS,
            falloff: FalloffCurve::default(),
            max_pressure: MAX_PRESSURE,
            consume_per_sec: PRESSURE_CONSUME_PER_SEC,
            recharge_per_sec: PRESSURE_RECHARGE_PER_SEC,
            emission_min: SPRAY_EMISSION_MIN,
            emission_max: SPRAY_EMISSION_MAX,
            scale_damage_with_pressure: false,
            nozzle_offset: DVec3::from_array(NOZZLE_OFFSET),
            nozzle_forward: DVec3::Z,
        }
    }
}

/// Safety-pin gesture tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    pub pull_distance: f64,
    pub start_deadzone: f64,
    pub lateral_tolerance: f64,
    /// Ignore motion against the pull direction.
    pub require_forward: bool,
    pub snap_back_secs: f64,
    /// Pull direction in the extinguisher's frame.
    pub pull_direction: DVec3,
    /// Seat position in the extinguisher's frame.
    pub seat_offset: DVec3,
    /// Let a pulled pin fall once released.
    pub gravity_after_release: bool,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            pull_distance: PIN_PULL_DISTANCE,
            start_deadzone: PIN_START_DEADZONE,
            lateral_tolerance: PIN_LATERAL_TOLERANCE,
            require_forward: true,
            snap_back_secs: PIN_SNAP_BACK_SECS,
            pull_direction: DVec3::from_array(PIN_PULL_DIRECTION),
            seat_offset: DVec3::from_array(PIN_SEAT_OFFSET),
            gravity_after_release: true,
        }
    }
}

/// Fire target tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    pub max_heat: f64,
    /// Seconds after extinguishing before the fire flares up again. 0 = never.
    pub reignite_delay_secs: f64,
    pub reignite_fraction: f64,
    pub radius: f64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            max_heat: FIRE_MAX_HEAT,
            reignite_delay_secs: FIRE_REIGNITE_DELAY_SECS,
            reignite_fraction: FIRE_REIGNITE_FRACTION,
            radius: FIRE_RADIUS,
        }
    }
}

/// Placement of the default drill's fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillLayout {
    pub fire_count: u32,
    pub fire_distance: f64,
    pub arc_deg: f64,
    pub jitter: f64,
}

impl Default for DrillLayout {
    fn default() -> Self {
        Self {
            fire_count: DRILL_FIRE_COUNT,
            fire_distance: DRILL_FIRE_DISTANCE,
            arc_deg: DRILL_ARC_DEG,
            jitter: DRILL_JITTER,
        }
    }
}

impl DrillConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: DrillConfig =
            serde_json::from_str(json).map_err(|e| format!("invalid drill config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate.0 == 0 {
            return Err("tick_rate must be positive".into());
        }

        let ext = &self.extinguisher;
        if ext.range <= 0.0 {
            return Err(format!("extinguisher.range must be positive, got {}", ext.range));
        }
        if !(ext.half_angle_deg > 0.0 && ext.half_angle_deg <= 180.0) {
            return Err(format!(
                "extinguisher.half_angle_deg must be in (0, 180], got {}",
                ext.half_angle_deg
            ));
        }
        if ext.dps < 0.0 {
            return Err("extinguisher.dps must not be negative".into());
        }
        if ext.max_pressure <= 0.0 {
            return Err("extinguisher.max_pressure must be positive".into());
        }
        if ext.consume_per_sec < 0.0 || ext.recharge_per_sec < 0.0 {
            return Err("extinguisher pressure rates must not be negative".into());
        }
        if ext.emission_min > ext.emission_max {
            return Err("extinguisher.emission_min exceeds emission_max".into());
        }
        if ext.nozzle_forward.length() < DIRECTION_EPSILON {
            return Err("extinguisher.nozzle_forward must be non-zero".into());
        }

        let pin = &self.pin;
        if pin.start_deadzone < 0.0 || pin.pull_distance <= pin.start_deadzone {
            return Err(format!(
                "pin.pull_distance ({}) must exceed pin.start_deadzone ({})",
                pin.pull_distance, pin.start_deadzone
            ));
        }
        if pin.lateral_tolerance < 0.0 {
            return Err("pin.lateral_tolerance must not be negative".into());
        }
        if pin.snap_back_secs < 0.0 {
            return Err("pin.snap_back_secs must not be negative".into());
        }
        if pin.pull_direction.length() < DIRECTION_EPSILON {
            return Err("pin.pull_direction must be non-zero".into());
        }

        let fire = &self.fire;
        if fire.max_heat <= 0.0 {
            return Err("fire.max_heat must be positive".into());
        }
        if fire.reignite_delay_secs < 0.0 {
            return Err("fire.reignite_delay_secs must not be negative".into());
        }
        if !(0.0..=1.0).contains(&fire.reignite_fraction) || fire.reignite_fraction == 0.0 {
            return Err("fire.reignite_fraction must be in (0, 1]".into());
        }
        if fire.radius < 0.0 {
            return Err("fire.radius must not be negative".into());
        }

        Ok(())
    }
}
