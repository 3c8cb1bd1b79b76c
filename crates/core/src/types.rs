use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A cell coordinate on the canvas.
///
/// Fields are declared `y` first so the derived ordering is row-major; every
/// `BTreeSet<Location>` therefore iterates top-to-bottom, left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub y: i32,
    pub x: i32,
}

impl Location {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Up, right, down, left.
    pub fn orthogonal_neighbors(self) -> [Self; 4] {
        [
            self.translate(0, -1),
            self.translate(1, 0),
            self.translate(0, 1),
            self.translate(-1, 0),
        ]
    }

    pub fn surrounding(self) -> [Self; 8] {
        [
            self.translate(-1, -1),
            self.translate(0, -1),
            self.translate(1, -1),
            self.translate(-1, 0),
            self.translate(1, 0),
            self.translate(-1, 1),
            self.translate(0, 1),
            self.translate(1, 1),
        ]
    }
}

impl Add for Location {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.translate(rhs.x, rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Row 0 is the top of the canvas, so `Up` decreases `y`.
    pub fn delta(self) -> Location {
        match self {
            Self::Up => Location::new(0, -1),
            Self::Left => Location::new(-1, 0),
            Self::Down => Location::new(0, 1),
            Self::Right => Location::new(1, 0),
        }
    }
}

/// What a single cell of the projected grid shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Background,
    RoomFloor,
    HallwayFloor,
    Wall,
    Door,
    Player,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Self::Background => ' ',
            Self::RoomFloor => '.',
            Self::HallwayFloor => ',',
            Self::Wall => '#',
            Self::Door => '+',
            Self::Player => '@',
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Background => 0,
            Self::RoomFloor => 1,
            Self::HallwayFloor => 2,
            Self::Wall => 3,
            Self::Door => 4,
            Self::Player => 5,
        }
    }
}
