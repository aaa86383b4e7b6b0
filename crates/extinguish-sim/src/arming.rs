//! Arming state machine: spraying is allowed only while the extinguisher is
//! held *and* its pin has been pulled.

use serde::{Deserialize, Serialize};

use extinguish_core::enums::Prompt;

/// Capability handed to a pin so it can report completion to the arming
/// machine it belongs to, without the arming machine knowing about the pin.
pub trait PinPulledListener {
    fn on_pin_pulled(&mut self) -> ArmingTransition;
}

/// Before/after view of one arming notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmingTransition {
    pub was_armed: bool,
    pub is_armed: bool,
    pub previous_prompt: Prompt,
    pub prompt: Prompt,
}

impl ArmingTransition {
    /// `Some(new_state)` if armed flipped.
    pub fn armed_changed(&self) -> Option<bool> {
        (self.was_armed != self.is_armed).then_some(self.is_armed)
    }

    /// `Some(new_prompt)` if the prompt changed.
    pub fn prompt_changed(&self) -> Option<Prompt> {
        (self.previous_prompt != self.prompt).then_some(self.prompt)
    }
}

/// Hold and pin flags of one extinguisher. `is_armed` and `prompt` are
/// derived, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmingState {
    is_held: bool,
    is_pin_pulled: bool,
}

impl ArmingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.is_held
    }

    pub fn is_pin_pulled(&self) -> bool {
        self.is_pin_pulled
    }

    pub fn is_armed(&self) -> bool {
        self.is_held && self.is_pin_pulled
    }

    pub fn prompt(&self) -> Prompt {
        Prompt::from_state(self.is_held, self.is_pin_pulled)
    }

    /// Hold began (`true`) or ended (`false`).
    pub fn notify_held(&mut self, held: bool) -> ArmingTransition {
        self.transition(|state| state.is_held = held)
    }

    /// Pin pull completed. Idempotent; the flag can only be set.
    pub fn notify_pin_pulled(&mut self) -> ArmingTransition {
        self.transition(|state| state.is_pin_pulled = true)
    }

    /// Developer reset: re-insert the pin.
    pub fn reset_pin(&mut self) -> ArmingTransition {
        self.transition(|state| state.is_pin_pulled = false)
    }

    fn transition(&mut self, change: impl FnOnce(&mut Self)) -> ArmingTransition {
        let was_armed = self.is_armed();
        let previous_prompt = self.prompt();
        change(self);
        ArmingTransition {
            was_armed,
            is_armed: self.is_armed(),
            previous_prompt,
            prompt: self.prompt(),
        }
    }
}

impl PinPulledListener for ArmingState {
    fn on_pin_pulled(&mut self) -> ArmingTransition {
        self.notify_pin_pulled()
    }
}
