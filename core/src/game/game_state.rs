use super::board::Board;
use super::types::{GameStatus, IllegalMoveError, Mark};

/// The authoritative state of one game: the live board plus turn
/// bookkeeping. X always opens. The search never touches this board
/// directly; it works on its own copy.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<usize>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Places the side-to-move's mark on `index` and flips the turn
    /// unless the move ended the game.
    pub fn place_mark(&mut self, index: usize) -> Result<(), IllegalMoveError> {
        if self.status != GameStatus::InProgress {
            return Err(IllegalMoveError::GameOver);
        }

        self.board.apply(index, self.current_mark)?;
        self.last_move = Some(index);
        self.status = self.board.evaluate();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    fn switch_turn(&mut self) {
        self.current_mark = match self.current_mark {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => unreachable!(),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_alternate_starting_with_x() {
        let mut state = GameState::new();
        assert_eq!(state.current_mark(), Mark::X);

        state.place_mark(0).unwrap();
        assert_eq!(state.board().cells()[0], Mark::X);
        assert_eq!(state.current_mark(), Mark::O);

        state.place_mark(4).unwrap();
        assert_eq!(state.board().cells()[4], Mark::O);
        assert_eq!(state.current_mark(), Mark::X);
    }

    #[test]
    fn test_winning_move_ends_the_game_without_flipping_turn() {
        let mut state = GameState::new();
        for index in [0, 3, 1, 4, 2] {
            state.place_mark(index).unwrap();
        }

        assert_eq!(state.status(), GameStatus::XWon);
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.last_move(), Some(2));
    }

    #[test]
    fn test_move_after_game_over_is_rejected() {
        let mut state = GameState::new();
        for index in [0, 3, 1, 4, 2] {
            state.place_mark(index).unwrap();
        }

        assert_eq!(state.place_mark(5), Err(IllegalMoveError::GameOver));
    }

    #[test]
    fn test_illegal_move_leaves_state_untouched() {
        let mut state = GameState::new();
        state.place_mark(0).unwrap();

        let board_before = *state.board();
        assert_eq!(state.place_mark(0), Err(IllegalMoveError::Occupied(0)));
        assert_eq!(state.place_mark(42), Err(IllegalMoveError::OutOfRange(42)));
        assert_eq!(*state.board(), board_before);
        assert_eq!(state.current_mark(), Mark::O);
    }

    #[test]
    fn test_full_game_to_draw() {
        let mut state = GameState::new();
        // X O X / X O O / O X X, no three-in-a-row
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            state.place_mark(index).unwrap();
        }

        assert_eq!(state.status(), GameStatus::Draw);
        assert!(state.board().is_full());
    }

    #[test]
    fn test_reset_restores_opening_state() {
        let mut state = GameState::new();
        state.place_mark(0).unwrap();
        state.place_mark(1).unwrap();

        state.reset();
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.current_mark(), Mark::X);
        assert_eq!(state.last_move(), None);
        assert_eq!(state.board().empty_cells().count(), 9);
    }
}
