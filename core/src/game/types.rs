use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Mark::Empty => " ",
            Mark::X => "X",
            Mark::O => "O",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::XWon => Some(Mark::X),
            GameStatus::OWon => Some(Mark::O),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMoveError {
    OutOfRange(usize),
    Occupied(usize),
    GameOver,
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMoveError::OutOfRange(index) => {
                write!(f, "Cell index {} is out of range", index)
            }
            IllegalMoveError::Occupied(index) => {
                write!(f, "Cell {} is already marked", index)
            }
            IllegalMoveError::GameOver => write!(f, "Game is already over"),
        }
    }
}

impl std::error::Error for IllegalMoveError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    #[serde(rename = "pva")]
    PlayerVsAi,
}

/// Decides which side the AI plays in a player-vs-AI game. `Host` keeps
/// the human on X, the mark that opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayerMode {
    #[default]
    Host,
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips_marks() {
        assert_eq!(Mark::X.opponent(), Some(Mark::O));
        assert_eq!(Mark::O.opponent(), Some(Mark::X));
        assert_eq!(Mark::Empty.opponent(), None);
    }

    #[test]
    fn test_game_mode_config_spellings() {
        let pvp: GameMode = serde_yaml_ng::from_str("pvp").unwrap();
        let pva: GameMode = serde_yaml_ng::from_str("pva").unwrap();
        assert_eq!(pvp, GameMode::PlayerVsPlayer);
        assert_eq!(pva, GameMode::PlayerVsAi);
    }

    #[test]
    fn test_winner_of_status() {
        assert_eq!(GameStatus::XWon.winner(), Some(Mark::X));
        assert_eq!(GameStatus::OWon.winner(), Some(Mark::O));
        assert_eq!(GameStatus::Draw.winner(), None);
        assert_eq!(GameStatus::InProgress.winner(), None);
    }
}
