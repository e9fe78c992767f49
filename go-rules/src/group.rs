use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::goban::Goban;
use crate::stone::Stone;
use crate::Point;

/// A maximal 4-connected set of same-colored stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub stone: Stone,
    pub stones: Vec<Point>,
    /// Distinct empty points touching the group.
    pub liberties: Vec<Point>,
    /// Distinct opposing stones touching the group.
    pub frontier: Vec<Point>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn is_captured(&self) -> bool {
        self.liberties.is_empty()
    }
}

impl Goban {
    /// Number of on-board neighbor slots: 2 in a corner, 3 on an edge, 4 elsewhere.
    /// Zero for an off-board point.
    pub fn liberty_ceiling(&self, point: Point) -> u8 {
        self.neighbors(point).len() as u8
    }

    /// Occupied neighbors of `point`, of either color.
    pub fn adjacent_stones(&self, point: Point) -> ArrayVec<Point, 4> {
        self.neighbors(point)
            .into_iter()
            .filter(|&n| self.stone_at(n).is_some())
            .collect()
    }

    /// Open slots around a single point, ignoring the rest of its group.
    pub fn stone_liberties(&self, point: Point) -> u8 {
        self.liberty_ceiling(point) - self.adjacent_stones(point).len() as u8
    }

    /// The group containing the stone at `point`, or `None` for an empty point.
    pub fn group(&self, point: Point) -> Option<Group> {
        let mut visited = vec![false; self.board().len()];
        self.group_from(point, &mut visited)
    }

    /// Liberties of the group at `point`; zero for an empty point.
    pub fn group_liberties(&self, point: Point) -> usize {
        self.group(point).map_or(0, |g| g.liberties.len())
    }

    /// Breadth-first group search sharing a visited bitset across calls.
    pub(crate) fn group_from(&self, point: Point, visited: &mut [bool]) -> Option<Group> {
        let stone = self.stone_at(point)?;

        let mut seen = vec![false; self.board().len()];
        let mut stones = Vec::new();
        let mut liberties = Vec::new();
        let mut frontier = Vec::new();
        let mut queue = VecDeque::from([point]);
        visited[self.idx(point)] = true;

        while let Some(p) = queue.pop_front() {
            stones.push(p);
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                match self.stone_at(n) {
                    Some(s) if s == stone => {
                        if !visited[ni] {
                            visited[ni] = true;
                            queue.push_back(n);
                        }
                    }
                    Some(_) => {
                        if !seen[ni] {
                            seen[ni] = true;
                            frontier.push(n);
                        }
                    }
                    None => {
                        if !seen[ni] {
                            seen[ni] = true;
                            liberties.push(n);
                        }
                    }
                }
            }
        }

        Some(Group {
            stone,
            stones,
            liberties,
            frontier,
        })
    }
}
