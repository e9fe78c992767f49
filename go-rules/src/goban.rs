use std::fmt;

use arrayvec::ArrayVec;

use crate::error::GoError;
use crate::stone::Stone;
use crate::Point;

pub const MIN_BOARD_SIZE: u8 = 2;
pub const MAX_BOARD_SIZE: u8 = 19;

/// The board delta a legal placement would produce, computed without touching the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub point: Point,
    pub stone: Stone,
    pub captured: Vec<Point>,
}

impl Placement {
    pub fn captures(&self) -> u32 {
        self.captured.len() as u32
    }
}

/// A square Go board stored as a flat row-major array (`1` Black, `-1` White, `0` empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goban {
    board: Vec<i8>,
    size: u8,
}

impl Goban {
    /// Create an empty `size` x `size` board.
    pub fn with_size(size: u8) -> Self {
        Goban {
            board: vec![0i8; size as usize * size as usize],
            size,
        }
    }

    /// Build a board from an ASCII layout. 'B' = Black, 'W' = White, anything else is empty.
    pub fn from_layout(layout: &[&str]) -> Self {
        let size = layout.len();
        assert!(
            size <= u8::MAX as usize && layout.iter().all(|row| row.chars().count() == size),
            "malformed board layout"
        );

        let board = layout
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| Stone::from_letter(c).map_or(0, Stone::to_int))
            .collect();

        Goban {
            board,
            size: size as u8,
        }
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn board(&self) -> &[i8] {
        &self.board
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_int(self.board[self.idx(point)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|&s| s == 0)
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| (row, col)))
    }

    /// Read-only grid copy for presentation layers.
    pub fn snapshot(&self) -> Vec<Vec<Option<Stone>>> {
        self.board
            .chunks(self.size.max(1) as usize)
            .map(|row| row.iter().map(|&v| Stone::from_int(v)).collect())
            .collect()
    }

    // -- Legality --

    /// Compute what placing `stone` at `point` would do, without mutating the board.
    ///
    /// The move is legal when the new stone's group keeps a liberty, or when it
    /// leaves at least one opposing group without liberties anywhere on the board.
    /// Ko is not checked here; it depends on game history.
    pub fn resolve_move(&self, point: Point, stone: Stone) -> Result<Placement, GoError> {
        if !self.on_board(point) {
            return Err(GoError::NotOnBoard);
        }

        if self.stone_at(point).is_some() {
            return Err(GoError::Overwrite);
        }

        let mut trial = self.clone();
        trial.place_stone(point, stone);

        let captured = trial.dead_groups(stone);
        if captured.is_empty() && trial.group_liberties(point) == 0 {
            return Err(GoError::Suicide);
        }

        Ok(Placement {
            point,
            stone,
            captured,
        })
    }

    pub fn is_valid_move(&self, point: Point, stone: Stone) -> bool {
        self.resolve_move(point, stone).is_ok()
    }

    // -- Mutation --

    /// Validate and apply a move, removing captured stones. Returns the capture count.
    pub fn play(&mut self, point: Point, stone: Stone) -> Result<u32, GoError> {
        let placement = self.resolve_move(point, stone)?;
        self.commit(&placement);
        Ok(placement.captures())
    }

    /// Apply a previously resolved placement.
    pub(crate) fn commit(&mut self, placement: &Placement) {
        self.place_stone(placement.point, placement.stone);
        for &pt in &placement.captured {
            self.remove_stone(pt);
        }
    }

    /// Put a stone on the board with no legality check. Off-board points are ignored.
    pub fn place_stone(&mut self, point: Point, stone: Stone) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.board[i] = stone.to_int();
        }
    }

    pub fn remove_stone(&mut self, point: Point) {
        if self.on_board(point) {
            let i = self.idx(point);
            self.board[i] = 0;
        }
    }

    pub fn clear(&mut self) {
        self.board.fill(0);
    }

    // -- Captures --

    /// Remove every opposing stone whose group has no liberties. Returns the count removed.
    pub fn capture_stones(&mut self, stone: Stone) -> u32 {
        let dead = self.dead_groups(stone);
        for &pt in &dead {
            self.remove_stone(pt);
        }
        dead.len() as u32
    }

    pub fn count_captured_stones(&self, stone: Stone) -> u32 {
        self.dead_groups(stone).len() as u32
    }

    /// The position of the only capturable opposing stone.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one opposing stone is without liberties; callers
    /// check `count_captured_stones` first.
    pub fn single_capture(&self, stone: Stone) -> Point {
        match self.dead_groups(stone).as_slice() {
            [pt] => *pt,
            dead => panic!(
                "single_capture called with {} capturable stones",
                dead.len()
            ),
        }
    }

    /// Opposing stones (relative to `stone`) whose groups have zero liberties.
    ///
    /// Scans the whole board, O(size²) per call.
    pub fn dead_groups(&self, stone: Stone) -> Vec<Point> {
        let opponent = stone.opp();
        let mut visited = vec![false; self.board.len()];
        let mut dead = Vec::new();

        for point in self.points() {
            if visited[self.idx(point)] || self.stone_at(point) != Some(opponent) {
                continue;
            }
            if let Some(group) = self.group_from(point, &mut visited) {
                if group.is_captured() {
                    dead.extend(group.stones);
                }
            }
        }

        dead
    }

    // -- Geometry --

    /// Get the 4-connected neighbors that are on the board, north, east, south, west.
    /// An off-board point has none.
    pub fn neighbors(&self, (row, col): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if !self.on_board((row, col)) {
            return result;
        }
        if row > 0 {
            result.push((row - 1, col));
        }
        if col + 1 < self.size {
            result.push((row, col + 1));
        }
        if row + 1 < self.size {
            result.push((row + 1, col));
        }
        if col > 0 {
            result.push((row, col - 1));
        }
        result
    }

    #[inline]
    pub(crate) fn idx(&self, (row, col): Point) -> usize {
        row as usize * self.size as usize + col as usize
    }
}

impl fmt::Display for Goban {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let c = self.stone_at((row, col)).map_or('+', Stone::letter);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
