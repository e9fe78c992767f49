use std::fmt;

/// A rejected move or game action. No state is mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    NotOnBoard,
    Overwrite,
    Suicide,
    KoViolation,
    GameOver,
    InvalidBoardSize(u8),
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::NotOnBoard => write!(f, "not on board"),
            GoError::Overwrite => write!(f, "point already occupied"),
            GoError::Suicide => write!(f, "suicide"),
            GoError::KoViolation => write!(f, "ko violation"),
            GoError::GameOver => write!(f, "game is over"),
            GoError::InvalidBoardSize(n) => write!(f, "invalid board size: {n}"),
        }
    }
}

impl std::error::Error for GoError {}
