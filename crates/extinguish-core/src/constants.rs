//! Simulation constants and default tuning parameters.
//!
//! Every value here is a default; `config::DrillConfig` can override the
//! tunables at startup.

/// Default simulation tick rate (Hz). Matches a 90 Hz headset.
pub const TICK_RATE: u32 = 90;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Vectors shorter than this are treated as zero length.
pub const DIRECTION_EPSILON: f64 = 1e-4;

/// Lower bound on any divisor derived from configuration (durations, spans).
pub const MIN_DIVISOR: f64 = 1e-4;

// --- Spray geometry ---

/// Spray reach from the nozzle (meters).
pub const SPRAY_RANGE: f64 = 3.0;

/// Cone half-angle (degrees).
pub const SPRAY_HALF_ANGLE_DEG: f64 = 20.0;

/// Extinguishing power at full weight (heat per second).
pub const SPRAY_DPS: f64 = 35.0;

/// Falloff weight at the nozzle.
pub const FALLOFF_NEAR_WEIGHT: f64 = 1.0;

/// Falloff weight at the edge of the range.
pub const FALLOFF_FAR_WEIGHT: f64 = 0.3;

/// Nozzle tip offset in the extinguisher's local frame (meters).
pub const NOZZLE_OFFSET: [f64; 3] = [0.0, 0.25, 0.12];

// --- Pressure ---

/// Full tank pressure (abstract units).
pub const MAX_PRESSURE: f64 = 100.0;

/// Pressure spent per second while spraying.
pub const PRESSURE_CONSUME_PER_SEC: f64 = 10.0;

/// Pressure regained per second while idle.
pub const PRESSURE_RECHARGE_PER_SEC: f64 = 2.0;

/// Spray particle emission rate at empty pressure (particles/s).
pub const SPRAY_EMISSION_MIN: f64 = 8.0;

/// Spray particle emission rate at full pressure (particles/s).
pub const SPRAY_EMISSION_MAX: f64 = 60.0;

// --- Fire ---

/// Heat pool of a freshly spawned fire.
pub const FIRE_MAX_HEAT: f64 = 100.0;

/// Fraction of max heat restored on reignite.
pub const FIRE_REIGNITE_FRACTION: f64 = 0.3;

/// Default delay before reignite. Zero disables reignite.
pub const FIRE_REIGNITE_DELAY_SECS: f64 = 0.0;

/// Default fire collider radius (meters).
pub const FIRE_RADIUS: f64 = 0.35;

/// Fire particle emission at full heat (particles/s).
pub const FIRE_EMISSION_MAX: f64 = 60.0;

/// Fire particle start size at zero and full heat (meters).
pub const FIRE_PARTICLE_SIZE_MIN: f64 = 0.05;
pub const FIRE_PARTICLE_SIZE_MAX: f64 = 0.6;

/// Fire light intensity at full heat.
pub const FIRE_LIGHT_MAX: f64 = 2.5;

/// Fire audio volume at full heat.
pub const FIRE_VOLUME_MAX: f64 = 0.9;

// --- Safety pin ---

/// Axial travel needed to pull the pin (meters).
pub const PIN_PULL_DISTANCE: f64 = 0.08;

/// Axial travel ignored at the start of a pull (meters).
pub const PIN_START_DEADZONE: f64 = 0.005;

/// Maximum off-axis drift that still counts as pulling (meters).
pub const PIN_LATERAL_TOLERANCE: f64 = 0.015;

/// Duration of the snap-back animation after an incomplete pull (seconds).
pub const PIN_SNAP_BACK_SECS: f64 = 0.15;

/// Pull direction in the extinguisher's local frame.
pub const PIN_PULL_DIRECTION: [f64; 3] = [1.0, 0.0, 0.0];

/// Pin seat position in the extinguisher's local frame (meters).
pub const PIN_SEAT_OFFSET: [f64; 3] = [0.03, 0.2, 0.0];

/// Pin collider radius (meters).
pub const PIN_RADIUS: f64 = 0.01;

/// Pin mass (kg).
pub const PIN_MASS: f64 = 0.02;

// --- Free bodies ---

/// Gravity acceleration (m/s²), applied along -y.
pub const GRAVITY: f64 = 9.81;

/// Height of the floor plane that stops falling bodies (meters).
pub const FLOOR_Y: f64 = 0.0;

/// Horizontal velocity lost per second while resting on the floor.
pub const FLOOR_FRICTION: f64 = 4.0;

// --- Drill layout ---

/// Number of fires placed by the default drill.
pub const DRILL_FIRE_COUNT: u32 = 2;

/// Distance from the extinguisher to each fire (meters).
pub const DRILL_FIRE_DISTANCE: f64 = 1.6;

/// Total arc the fires are spread across (degrees).
pub const DRILL_ARC_DEG: f64 = 50.0;

/// Maximum random offset applied to each fire (meters).
pub const DRILL_JITTER: f64 = 0.15;

/// Height of drill fires above the floor (meters).
pub const DRILL_FIRE_HEIGHT: f64 = 0.3;

/// Spawn height of the drill extinguisher (meters).
pub const DRILL_EXTINGUISHER_HEIGHT: f64 = 0.9;

// --- Prompts ---

pub const PROMPT_GRAB: &str = "Grab the extinguisher";
pub const PROMPT_PULL_PIN: &str = "P: Pull the pin";
pub const PROMPT_READY: &str = "Ready to spray!";
