use serde::{Deserialize, Serialize};

use crate::goban::{Goban, Placement};
use crate::stone::Stone;
use crate::Point;

/// The last applied move and how many stones it captured. Ko is judged against this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub pos: Point,
    pub stones_captured: u32,
}

impl MoveRecord {
    pub fn new(pos: Point, stones_captured: u32) -> Self {
        MoveRecord {
            pos,
            stones_captured,
        }
    }
}

/// Does this placement retake the single stone that `last` just captured with?
///
/// True when the placement captures exactly one stone, sitting where `last`
/// was played while capturing exactly one stone itself.
pub fn retakes(placement: &Placement, last: Option<&MoveRecord>) -> bool {
    match (placement.captured.as_slice(), last) {
        ([captured], Some(last)) => MoveRecord::new(*captured, 1) == *last,
        _ => false,
    }
}

/// Would playing `stone` at `point` break the ko rule? Illegal moves never do.
pub fn repeats_capture(
    goban: &Goban,
    point: Point,
    stone: Stone,
    last: Option<&MoveRecord>,
) -> bool {
    goban
        .resolve_move(point, stone)
        .is_ok_and(|placement| retakes(&placement, last))
}
