use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};

use crate::game::{
    best_move, FirstPlayerMode, GameMode, GameState, GameStatus, Mark, CELL_COUNT,
};
use crate::log;

use super::SessionRng;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub mode: GameMode,
    pub first_player: FirstPlayerMode,
    /// Pause before the AI's move is applied, so the human's own move is
    /// visible first. Presentation policy only.
    pub ai_move_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            mode: GameMode::PlayerVsPlayer,
            first_player: FirstPlayerMode::Host,
            ai_move_delay: Duration::from_millis(500),
        }
    }
}

/// Immutable view of the game handed to broadcasters.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot {
    pub cells: [Mark; CELL_COUNT],
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
    pub ai_mark: Option<Mark>,
}

pub trait StateBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}

#[derive(Clone)]
pub struct SessionState {
    pub game_state: Arc<Mutex<GameState>>,
    pub ai_mark: Option<Mark>,
    pub ai_move_delay: Duration,
    pub turn_notify: Arc<Notify>,
}

impl SessionState {
    pub fn create(settings: &SessionSettings, rng: &mut SessionRng) -> Self {
        let ai_mark = match settings.mode {
            GameMode::PlayerVsPlayer => None,
            GameMode::PlayerVsAi => Some(match settings.first_player {
                FirstPlayerMode::Host => Mark::O,
                FirstPlayerMode::Random => {
                    if rng.random_bool() {
                        Mark::X
                    } else {
                        Mark::O
                    }
                }
            }),
        };

        Self {
            game_state: Arc::new(Mutex::new(GameState::new())),
            ai_mark,
            ai_move_delay: settings.ai_move_delay,
            turn_notify: Arc::new(Notify::new()),
        }
    }
}

pub struct GameSession;

impl GameSession {
    /// Drives one game from the opening board to a terminal state.
    /// Human moves arrive through `handle_place_mark`; AI moves are
    /// computed in place when it is the AI's turn.
    pub async fn run(state: SessionState, broadcaster: impl StateBroadcaster) -> GameSnapshot {
        loop {
            let snapshot = take_snapshot(&state).await;
            broadcaster.broadcast_state(snapshot).await;

            if snapshot.status != GameStatus::InProgress {
                break;
            }

            if state.ai_mark == Some(snapshot.current_mark) {
                play_ai_turn(&state).await;
            } else {
                state.turn_notify.notified().await;
            }
        }

        let final_snapshot = take_snapshot(&state).await;
        broadcaster.broadcast_game_over(final_snapshot).await;
        final_snapshot
    }

    /// Entry point for human moves. Rejected moves are logged and
    /// dropped; the UI prevents most of them up front.
    pub async fn handle_place_mark(state: &SessionState, index: usize) {
        let mut game_state = state.game_state.lock().await;

        if game_state.status() == GameStatus::InProgress
            && state.ai_mark == Some(game_state.current_mark())
        {
            log!("Ignoring move at {} submitted on the AI's turn", index);
            return;
        }

        match game_state.place_mark(index) {
            Ok(()) => {
                drop(game_state);
                state.turn_notify.notify_one();
            }
            Err(e) => {
                log!("Rejected move at {}: {}", index, e);
            }
        }
    }
}

async fn play_ai_turn(state: &SessionState) {
    let Some(ai_mark) = state.ai_mark else {
        return;
    };

    tokio::time::sleep(state.ai_move_delay).await;

    let board = *state.game_state.lock().await.board();
    let chosen = tokio::task::spawn_blocking(move || best_move(&board, ai_mark)).await;

    if let Ok(Some(index)) = chosen {
        let mut game_state = state.game_state.lock().await;
        if let Err(e) = game_state.place_mark(index) {
            log!("AI move at {} rejected: {}", index, e);
        }
    }
}

async fn take_snapshot(state: &SessionState) -> GameSnapshot {
    let game_state = state.game_state.lock().await;
    GameSnapshot {
        cells: *game_state.board().cells(),
        current_mark: game_state.current_mark(),
        status: game_state.status(),
        last_move: game_state.last_move(),
        ai_mark: state.ai_mark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::sync::mpsc;

    #[derive(Clone)]
    struct ChannelBroadcaster {
        tx: mpsc::UnboundedSender<GameSnapshot>,
    }

    impl StateBroadcaster for ChannelBroadcaster {
        fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send {
            let tx = self.tx.clone();
            async move {
                let _ = tx.send(snapshot);
            }
        }

        fn broadcast_game_over(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send {
            let tx = self.tx.clone();
            async move {
                let _ = tx.send(snapshot);
            }
        }
    }

    fn settings(mode: GameMode) -> SessionSettings {
        SessionSettings {
            mode,
            first_player: FirstPlayerMode::Host,
            ai_move_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_pvp_session_has_no_ai_side() {
        let mut rng = SessionRng::new(1);
        let state = SessionState::create(&settings(GameMode::PlayerVsPlayer), &mut rng);
        assert_eq!(state.ai_mark, None);
    }

    #[tokio::test]
    async fn test_pva_host_mode_gives_the_ai_o() {
        let mut rng = SessionRng::new(1);
        let state = SessionState::create(&settings(GameMode::PlayerVsAi), &mut rng);
        assert_eq!(state.ai_mark, Some(Mark::O));
    }

    #[tokio::test]
    async fn test_random_mode_assigns_the_ai_either_mark() {
        let mut session_settings = settings(GameMode::PlayerVsAi);
        session_settings.first_player = FirstPlayerMode::Random;

        let mut seen = Vec::new();
        for seed in 0..16 {
            let mut rng = SessionRng::new(seed);
            let state = SessionState::create(&session_settings, &mut rng);
            seen.push(state.ai_mark.unwrap());
        }

        assert!(seen.contains(&Mark::X));
        assert!(seen.contains(&Mark::O));
    }

    #[tokio::test]
    async fn test_place_mark_is_ignored_on_the_ai_turn() {
        let mut rng = SessionRng::new(1);
        let state = SessionState::create(&settings(GameMode::PlayerVsAi), &mut rng);

        GameSession::handle_place_mark(&state, 0).await;
        // It is now the AI's turn; this submission must be dropped.
        GameSession::handle_place_mark(&state, 1).await;

        let game_state = state.game_state.lock().await;
        assert_eq!(game_state.board().cells()[0], Mark::X);
        assert_eq!(game_state.board().cells()[1], Mark::Empty);
        assert_eq!(game_state.current_mark(), Mark::O);
    }

    #[tokio::test]
    async fn test_rejected_move_leaves_state_untouched() {
        let mut rng = SessionRng::new(1);
        let state = SessionState::create(&settings(GameMode::PlayerVsPlayer), &mut rng);

        GameSession::handle_place_mark(&state, 4).await;
        GameSession::handle_place_mark(&state, 4).await;
        GameSession::handle_place_mark(&state, 99).await;

        let game_state = state.game_state.lock().await;
        assert_eq!(game_state.board().cells()[4], Mark::X);
        assert_eq!(game_state.current_mark(), Mark::O);
    }

    #[tokio::test]
    async fn test_ai_session_never_loses_to_a_naive_player() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut rng = SessionRng::new(7);
        let state = SessionState::create(&settings(GameMode::PlayerVsAi), &mut rng);

        let run_state = state.clone();
        let handle = tokio::spawn(async move {
            GameSession::run(run_state, ChannelBroadcaster { tx }).await
        });

        // The human always grabs the first empty cell; the optimal AI
        // must still at least draw.
        while let Some(snapshot) = rx.recv().await {
            if snapshot.status != GameStatus::InProgress {
                break;
            }
            if snapshot.ai_mark != Some(snapshot.current_mark) {
                let index = snapshot
                    .cells
                    .iter()
                    .position(|&cell| cell == Mark::Empty)
                    .unwrap();
                GameSession::handle_place_mark(&state, index).await;
            }
        }

        let final_snapshot = handle.await.unwrap();
        assert_ne!(final_snapshot.status, GameStatus::InProgress);
        assert_ne!(final_snapshot.status, GameStatus::XWon);
    }
}
