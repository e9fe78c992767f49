use serde::{Deserialize, Serialize};
use std::fmt;

use crate::stone::Stone;
use crate::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Play,
    Pass,
    Resign,
}

/// One entry of the game's move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub kind: Move,
    pub stone: Stone,
    pub pos: Option<Point>,
}

impl Turn {
    pub fn play(stone: Stone, point: Point) -> Self {
        Turn {
            kind: Move::Play,
            stone,
            pos: Some(point),
        }
    }

    pub fn pass(stone: Stone) -> Self {
        Turn {
            kind: Move::Pass,
            stone,
            pos: None,
        }
    }

    pub fn resign(stone: Stone) -> Self {
        Turn {
            kind: Move::Resign,
            stone,
            pos: None,
        }
    }
}

/// Turn state machine. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AwaitingMove { to_move: Stone, after_pass: bool },
    GameOver,
}

impl Stage {
    pub fn start() -> Self {
        Stage::AwaitingMove {
            to_move: Stone::Black,
            after_pass: false,
        }
    }

    pub fn to_move(self) -> Option<Stone> {
        match self {
            Stage::AwaitingMove { to_move, .. } => Some(to_move),
            Stage::GameOver => None,
        }
    }

    pub fn is_over(self) -> bool {
        self == Stage::GameOver
    }

    pub fn after_play(self) -> Self {
        match self {
            Stage::AwaitingMove { to_move, .. } => Stage::AwaitingMove {
                to_move: to_move.opp(),
                after_pass: false,
            },
            Stage::GameOver => Stage::GameOver,
        }
    }

    /// A pass straight after a pass ends the game.
    pub fn after_pass(self) -> Self {
        match self {
            Stage::AwaitingMove {
                after_pass: true, ..
            }
            | Stage::GameOver => Stage::GameOver,
            Stage::AwaitingMove { to_move, .. } => Stage::AwaitingMove {
                to_move: to_move.opp(),
                after_pass: true,
            },
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::AwaitingMove { to_move, .. } => write!(f, "{to_move} to play"),
            Stage::GameOver => write!(f, "game over"),
        }
    }
}
