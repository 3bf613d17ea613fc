use std::sync::{Arc, Mutex};

use tictactoe_core::game::GameMode;
use tictactoe_core::session::GameSnapshot;

#[derive(Debug, Clone, Copy)]
pub enum ClientCommand {
    PlaceMark { index: usize },
    NewGame,
    SetMode(GameMode),
}

/// State shared between the session task and the UI thread. The task
/// writes snapshots; the UI polls them every frame.
pub struct SharedState {
    snapshot: Arc<Mutex<Option<GameSnapshot>>>,
    error: Arc<Mutex<Option<String>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    pub fn get_snapshot(&self) -> Option<GameSnapshot> {
        *self.snapshot.lock().unwrap()
    }

    pub fn set_error(&self, error: String) {
        *self.error.lock().unwrap() = Some(error);
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
            error: Arc::clone(&self.error),
        }
    }
}
