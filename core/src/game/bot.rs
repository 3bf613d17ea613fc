use super::board::{Board, CELL_COUNT};
use super::types::{GameStatus, Mark};

/// Picks the cell where `ai_mark` should move, assuming the opponent
/// also plays perfectly. The whole game tree is enumerated; with at most
/// 9 plies that is cheap enough to run synchronously on every AI turn.
///
/// Ties are broken by the lowest cell index. Returns `None` when the
/// position is already decided or the board is full.
pub fn best_move(board: &Board, ai_mark: Mark) -> Option<usize> {
    let opponent = ai_mark.opponent()?;
    if board.evaluate() != GameStatus::InProgress {
        return None;
    }

    let mut scratch = *board;
    let mut best_score = i32::MIN;
    let mut best_index = None;

    for index in board.empty_cells() {
        scratch.set(index, ai_mark);
        let score = minimax(&mut scratch, ai_mark, opponent, false);
        scratch.clear(index);

        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
    }

    best_index
}

// Exhaustive game-tree score of the position from `ai_mark`'s point of
// view. No pruning and no depth discounting: a win scores +1 whether it
// comes in one move or five.
fn minimax(board: &mut Board, ai_mark: Mark, opponent: Mark, maximizing: bool) -> i32 {
    let status = board.evaluate();
    if status != GameStatus::InProgress {
        return payoff(status, ai_mark);
    }

    let mover = if maximizing { ai_mark } else { opponent };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for index in 0..CELL_COUNT {
        if board.cells()[index] != Mark::Empty {
            continue;
        }

        board.set(index, mover);
        let score = minimax(board, ai_mark, opponent, !maximizing);
        board.clear(index);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

fn payoff(status: GameStatus, ai_mark: Mark) -> i32 {
    match status {
        GameStatus::XWon => {
            if ai_mark == Mark::X {
                1
            } else {
                -1
            }
        }
        GameStatus::OWon => {
            if ai_mark == Mark::O {
                1
            } else {
                -1
            }
        }
        GameStatus::Draw => 0,
        GameStatus::InProgress => unreachable!(),
    }
}
