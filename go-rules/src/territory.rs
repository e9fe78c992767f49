use serde::Serialize;

use crate::goban::Goban;
use crate::stone::Stone;
use crate::Point;

/// Who an empty region belongs to, judged by the stone colors bordering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Territory {
    /// No bordering stones seen (yet).
    Neutral,
    Black,
    White,
    /// Bordered by both colors; dame.
    Contested,
}

impl Territory {
    pub fn combine(self, other: Territory) -> Territory {
        match (self, other) {
            (Territory::Neutral, t) | (t, Territory::Neutral) => t,
            (a, b) if a == b => a,
            _ => Territory::Contested,
        }
    }

    pub fn with_border(self, stone: Stone) -> Territory {
        self.combine(stone.into())
    }

    pub fn owner(self) -> Option<Stone> {
        match self {
            Territory::Black => Some(Stone::Black),
            Territory::White => Some(Stone::White),
            Territory::Neutral | Territory::Contested => None,
        }
    }
}

impl From<Stone> for Territory {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Territory::Black,
            Stone::White => Territory::White,
        }
    }
}

/// A maximal 4-connected set of empty points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<Point>,
    pub territory: Territory,
}

/// Flood-fill every empty region of the board and classify it by its border.
pub fn regions(goban: &Goban) -> Vec<Region> {
    let mut visited = vec![false; goban.board().len()];
    let mut result = Vec::new();

    for start in goban.points() {
        if visited[goban.idx(start)] || goban.stone_at(start).is_some() {
            continue;
        }

        let mut points = Vec::new();
        let mut territory = Territory::Neutral;
        let mut stack = vec![start];
        visited[goban.idx(start)] = true;

        while let Some(p) = stack.pop() {
            points.push(p);
            for n in goban.neighbors(p) {
                match goban.stone_at(n) {
                    Some(s) => territory = territory.with_border(s),
                    None => {
                        let ni = goban.idx(n);
                        if !visited[ni] {
                            visited[ni] = true;
                            stack.push(n);
                        }
                    }
                }
            }
        }

        result.push(Region { points, territory });
    }

    result
}

/// Per-point ownership in row-major order. Occupied points report their own color.
pub fn ownership(goban: &Goban) -> Vec<Territory> {
    let mut owners: Vec<Territory> = goban
        .board()
        .iter()
        .map(|&v| Stone::from_int(v).map_or(Territory::Neutral, Territory::from))
        .collect();

    for region in regions(goban) {
        for &p in &region.points {
            owners[goban.idx(p)] = region.territory;
        }
    }

    owners
}

/// Territory point totals for both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TerritoryScore {
    pub black: u32,
    pub white: u32,
}

impl TerritoryScore {
    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }
}

/// Count the empty points owned exclusively by each color.
pub fn score_territory(goban: &Goban) -> TerritoryScore {
    let mut score = TerritoryScore::default();
    for region in regions(goban) {
        let n = region.points.len() as u32;
        match region.territory.owner() {
            Some(Stone::Black) => score.black += n,
            Some(Stone::White) => score.white += n,
            None => {}
        }
    }
    score
}

/// Format a final result: "B+{diff}", "W+{diff}", or "Draw".
pub fn format_result(black_score: u32, white_score: u32) -> String {
    match black_score.cmp(&white_score) {
        std::cmp::Ordering::Greater => format!("B+{}", black_score - white_score),
        std::cmp::Ordering::Less => format!("W+{}", white_score - black_score),
        std::cmp::Ordering::Equal => "Draw".to_string(),
    }
}
