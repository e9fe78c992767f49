use serde::{Deserialize, Serialize};

use crate::error::GoError;
use crate::goban::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

pub const DEFAULT_BOARD_SIZE: u8 = 9;

/// Settings for a new game. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: u8,
    pub black_name: String,
    pub white_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            black_name: "Player 1".to_string(),
            white_name: "Player 2".to_string(),
        }
    }
}

impl GameConfig {
    pub fn with_board_size(board_size: u8) -> Self {
        GameConfig {
            board_size,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), GoError> {
        validate_board_size(self.board_size)
    }
}

pub fn validate_board_size(size: u8) -> Result<(), GoError> {
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(GoError::InvalidBoardSize(size))
    }
}
