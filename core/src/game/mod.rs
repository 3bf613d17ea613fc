mod board;
mod bot;
mod game_state;
mod types;

pub use board::{Board, CELL_COUNT, LINES};
pub use bot::best_move;
pub use game_state::GameState;
pub use types::{FirstPlayerMode, GameMode, GameStatus, IllegalMoveError, Mark};
