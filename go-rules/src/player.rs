use serde::Serialize;

use crate::stone::Stone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: String,
    pub color: Stone,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Stone) -> Self {
        Player {
            name: name.into(),
            color,
            score: 0,
        }
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn reset_score(&mut self) {
        self.score = 0;
    }
}
