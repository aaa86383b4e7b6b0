//! Runner state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use extinguish_core::commands::InputCommand;
use extinguish_core::state::DrillSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// An input command to forward to the simulation engine.
    Input(InputCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared runner state.
///
/// - `mpsc::Sender` is wrapped in a `Mutex` (Sender is Send but not Sync)
/// - `Arc<Mutex<...>>` holds the latest snapshot, shared with the loop thread
pub struct AppState {
    /// `None` until the game loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<DrillSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward an input command to the running loop.
    pub fn send(&self, command: InputCommand) -> Result<(), String> {
        let guard = self
            .command_tx
            .lock()
            .map_err(|_| "command channel lock poisoned".to_string())?;
        let tx = guard.as_ref().ok_or("game loop not running")?;
        tx.send(GameLoopCommand::Input(command))
            .map_err(|_| "game loop has stopped".to_string())
    }

    /// Clone of the most recent snapshot, if any tick has run yet.
    pub fn latest(&self) -> Option<DrillSnapshot> {
        self.latest_snapshot.lock().ok()?.clone()
    }

    /// Ask the loop to stop and forget the channel.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.command_tx.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest().is_none());
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_send_without_loop_fails() {
        let state = AppState::new();
        assert!(state.send(InputCommand::StartDrill).is_err());
    }

    #[test]
    fn test_send_and_shutdown() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        state.send(InputCommand::Pause).unwrap();
        state.shutdown();

        assert!(matches!(
            rx.try_recv(),
            Ok(GameLoopCommand::Input(InputCommand::Pause))
        ));
        assert!(matches!(rx.try_recv(), Ok(GameLoopCommand::Shutdown)));
        assert!(state.send(InputCommand::Resume).is_err());
    }
}
