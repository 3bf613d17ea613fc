use super::types::{GameStatus, IllegalMoveError, Mark};

pub const CELL_COUNT: usize = 9;

/// The 8 winning index triples of the 3x3 grid, row-major: rows, columns,
/// then the two diagonals. Evaluation reports the first matching line.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    /// Places `mark` on an empty cell. The board is untouched on failure.
    pub fn apply(&mut self, index: usize, mark: Mark) -> Result<(), IllegalMoveError> {
        if index >= CELL_COUNT {
            return Err(IllegalMoveError::OutOfRange(index));
        }
        if self.cells[index] != Mark::Empty {
            return Err(IllegalMoveError::Occupied(index));
        }
        self.cells[index] = mark;
        Ok(())
    }

    // Unchecked placement and removal, used by the search on its scratch
    // copy where cell emptiness is already established.
    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Mark::Empty;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    /// Empty cell indices in increasing order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
    }

    pub fn evaluate(&self) -> GameStatus {
        for [a, b, c] in LINES {
            let mark = self.cells[a];
            if mark != Mark::Empty && mark == self.cells[b] && mark == self.cells[c] {
                return match mark {
                    Mark::X => GameStatus::XWon,
                    Mark::O => GameStatus::OWon,
                    Mark::Empty => unreachable!(),
                };
            }
        }

        if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}
