pub mod config;
pub mod error;
pub mod game;
pub mod goban;
pub mod group;
pub mod ko;
pub mod player;
pub mod stone;
pub mod territory;
pub mod turn;

/// A board coordinate as `(row, col)`, zero-based from the top-left corner.
pub type Point = (u8, u8);

pub use config::GameConfig;
pub use error::GoError;
pub use game::{Game, MoveOutcome, Outcome, TurnOutcome};
pub use goban::{Goban, Placement};
pub use group::Group;
pub use ko::MoveRecord;
pub use player::Player;
pub use stone::Stone;
pub use territory::{Territory, TerritoryScore};
pub use turn::{Move, Stage, Turn};
