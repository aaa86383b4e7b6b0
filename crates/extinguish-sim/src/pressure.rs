//! Extinguisher pressure tank: a bounded resource spent while spraying and
//! slowly regained while idle.

use serde::{Deserialize, Serialize};

use extinguish_core::config::ExtinguisherConfig;

/// Pressure resource owned by one extinguisher. `0 <= current <= capacity`
/// holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureResource {
    capacity: f64,
    current: f64,
    consume_rate: f64,
    recharge_rate: f64,
    is_active: bool,
}

impl PressureResource {
    /// A full tank. Capacity is clamped to a small positive minimum so
    /// `level01` never divides by zero.
    pub fn new(capacity: f64, consume_rate: f64, recharge_rate: f64) -> Self {
        let capacity = capacity.max(f64::EPSILON);
        Self {
            capacity,
            current: capacity,
            consume_rate: consume_rate.max(0.0),
            recharge_rate: recharge_rate.max(0.0),
            is_active: false,
        }
    }

    pub fn from_config(config: &ExtinguisherConfig) -> Self {
        Self::new(
            config.max_pressure,
            config.consume_per_sec,
            config.recharge_per_sec,
        )
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Mark the tank as feeding a spray (active) or idle.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Spend `consume_rate * dt`, clamped at zero. Returns true when empty.
    pub fn consume(&mut self, dt: f64) -> bool {
        self.current = (self.current - self.consume_rate * dt.max(0.0)).max(0.0);
        self.is_depleted()
    }

    /// Regain `recharge_rate * dt`, clamped at capacity. Does nothing while
    /// the tank is active.
    pub fn recharge(&mut self, dt: f64) {
        if self.is_active {
            return;
        }
        self.current = (self.current + self.recharge_rate * dt.max(0.0)).min(self.capacity);
    }

    /// Remaining pressure as a fraction of capacity.
    pub fn level01(&self) -> f64 {
        (self.current / self.capacity).clamp(0.0, 1.0)
    }
}
