use std::future::Future;

use tokio::sync::mpsc;

use tictactoe_core::game::GameMode;
use tictactoe_core::log;
use tictactoe_core::session::{
    GameSession, GameSnapshot, SessionRng, SessionState, StateBroadcaster,
};

use crate::config::ClientConfig;
use crate::state::{ClientCommand, SharedState};

#[derive(Clone)]
struct UiBroadcaster {
    shared_state: SharedState,
}

impl StateBroadcaster for UiBroadcaster {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send {
        let shared_state = self.shared_state.clone();
        async move {
            shared_state.set_snapshot(snapshot);
        }
    }

    fn broadcast_game_over(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send {
        let shared_state = self.shared_state.clone();
        async move {
            shared_state.set_snapshot(snapshot);
        }
    }
}

/// Owns the game sessions. Each reset or mode switch tears the current
/// session down and starts a fresh board.
pub async fn game_task(
    config: ClientConfig,
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
) {
    let mut mode = config.mode;

    loop {
        let mut rng = SessionRng::from_random();
        log!("Starting {:?} session with seed {}", mode, rng.seed());

        let settings = config.session_settings(mode);
        let session_state = SessionState::create(&settings, &mut rng);
        let broadcaster = UiBroadcaster {
            shared_state: shared_state.clone(),
        };

        let run_state = session_state.clone();
        let mut game_handle =
            tokio::spawn(async move { GameSession::run(run_state, broadcaster).await });

        let next_mode = loop {
            tokio::select! {
                result = &mut game_handle => {
                    if let Ok(final_snapshot) = result {
                        log!("Game over: {:?}", final_snapshot.status);
                    }
                    // The final board stays on screen until the user acts.
                    match wait_for_restart(&mut command_rx, mode).await {
                        Some(next_mode) => break next_mode,
                        None => return,
                    }
                }
                command = command_rx.recv() => {
                    match command {
                        Some(ClientCommand::PlaceMark { index }) => {
                            GameSession::handle_place_mark(&session_state, index).await;
                        }
                        Some(ClientCommand::NewGame) => {
                            abort_session(&mut game_handle).await;
                            break mode;
                        }
                        Some(ClientCommand::SetMode(new_mode)) => {
                            abort_session(&mut game_handle).await;
                            break new_mode;
                        }
                        None => {
                            abort_session(&mut game_handle).await;
                            return;
                        }
                    }
                }
            }
        };

        mode = next_mode;
    }
}

async fn abort_session(game_handle: &mut tokio::task::JoinHandle<GameSnapshot>) {
    game_handle.abort();
    let _ = game_handle.await;
}

async fn wait_for_restart(
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    mode: GameMode,
) -> Option<GameMode> {
    loop {
        match command_rx.recv().await? {
            ClientCommand::NewGame => return Some(mode),
            ClientCommand::SetMode(new_mode) => return Some(new_mode),
            ClientCommand::PlaceMark { .. } => {}
        }
    }
}
