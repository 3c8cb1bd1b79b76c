//! Terrain shapes and the cell-set queries shared by every feature of a world.
//!
//! Each shape answers the same four questions through [`Region`]: which cells
//! it occupies (`content`), which cells wall it in (`border`), and which cells
//! form the spacing buffer beyond that (`margin`). [`Terrain`] tags a borrowed
//! shape with its kind so callers can dispatch exhaustively.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::types::Location;
use crate::world::World;

/// Smallest footprint side that still leaves a one-cell interior inside the wall ring.
pub const MIN_ROOM_SIDE: i32 = 3;

pub trait Region {
    fn content(&self) -> BTreeSet<Location>;
    fn border(&self) -> BTreeSet<Location>;
    fn margin(&self) -> BTreeSet<Location>;

    fn contains(&self, loc: Location) -> bool {
        self.content().contains(&loc)
    }
}

/// Rectangular room. `x`, `y`, `width` and `height` describe the footprint,
/// wall ring included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width >= MIN_ROOM_SIDE && height >= MIN_ROOM_SIDE);
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(&self) -> Location {
        Location::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn footprint_contains(&self, loc: Location) -> bool {
        loc.x >= self.x && loc.x <= self.right() && loc.y >= self.y && loc.y <= self.bottom()
    }

    /// True when `other`'s footprint reaches into this footprint grown by one
    /// cell, i.e. the two wall rings are not separated by background.
    pub fn crowds(&self, other: &Self) -> bool {
        self.x - 1 <= other.right()
            && self.right() + 1 >= other.x
            && self.y - 1 <= other.bottom()
            && self.bottom() + 1 >= other.y
    }

    pub fn is_overlap(&self, other: &Self) -> bool {
        !self.content().is_disjoint(&other.content())
    }

    pub fn is_margin(&self, other: &Self) -> bool {
        !self.margin().is_disjoint(&other.content())
            || !other.margin().is_disjoint(&self.content())
    }
}

impl Region for Room {
    fn content(&self) -> BTreeSet<Location> {
        let mut cells = BTreeSet::new();
        for y in (self.y + 1)..self.bottom() {
            for x in (self.x + 1)..self.right() {
                cells.insert(Location::new(x, y));
            }
        }
        cells
    }

    fn border(&self) -> BTreeSet<Location> {
        ring(self.x, self.y, self.right(), self.bottom())
    }

    fn margin(&self) -> BTreeSet<Location> {
        ring(self.x - 1, self.y - 1, self.right() + 1, self.bottom() + 1)
    }

    fn contains(&self, loc: Location) -> bool {
        loc.x > self.x && loc.x < self.right() && loc.y > self.y && loc.y < self.bottom()
    }
}

fn ring(left: i32, top: i32, right: i32, bottom: i32) -> BTreeSet<Location> {
    let mut cells = BTreeSet::new();
    for x in left..=right {
        cells.insert(Location::new(x, top));
        cells.insert(Location::new(x, bottom));
    }
    for y in top..=bottom {
        cells.insert(Location::new(left, y));
        cells.insert(Location::new(right, y));
    }
    cells
}

/// One-cell-wide corridor joining two rooms, identified by their indices in
/// the owning world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hallway {
    pub rooms: (usize, usize),
    cells: BTreeSet<Location>,
    walls: BTreeSet<Location>,
}

impl Hallway {
    /// Lays an L-shaped path between the centers of `rooms[from]` and
    /// `rooms[to]`. Path cells inside any room interior are left to the room;
    /// wall cells the path crosses become corridor openings.
    pub fn carve(rooms: &[Room], from: usize, to: usize, horizontal_first: bool) -> Self {
        let path = l_path(rooms[from].center(), rooms[to].center(), horizontal_first);
        let in_any_room = |loc: &Location| rooms.iter().any(|room| room.contains(*loc));

        let cells: BTreeSet<Location> = path.iter().copied().filter(|loc| !in_any_room(loc)).collect();
        let mut walls = BTreeSet::new();
        for cell in &cells {
            for next in cell.surrounding() {
                if !path.contains(&next) && !in_any_room(&next) {
                    walls.insert(next);
                }
            }
        }

        Self { rooms: (from, to), cells, walls }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &BTreeSet<Location> {
        &self.cells
    }
}

impl Region for Hallway {
    fn content(&self) -> BTreeSet<Location> {
        self.cells.clone()
    }

    fn border(&self) -> BTreeSet<Location> {
        self.walls.clone()
    }

    fn margin(&self) -> BTreeSet<Location> {
        self.walls
            .iter()
            .flat_map(|wall| wall.orthogonal_neighbors())
            .filter(|loc| !self.cells.contains(loc) && !self.walls.contains(loc))
            .collect()
    }

    fn contains(&self, loc: Location) -> bool {
        self.cells.contains(&loc)
    }
}

fn l_path(start: Location, end: Location, horizontal_first: bool) -> BTreeSet<Location> {
    let corner =
        if horizontal_first { Location::new(end.x, start.y) } else { Location::new(start.x, end.y) };
    let mut cells = BTreeSet::new();
    for (a, b) in [(start, corner), (corner, end)] {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                cells.insert(Location::new(x, y));
            }
        }
    }
    cells
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    pub location: Location,
}

impl Region for Door {
    fn content(&self) -> BTreeSet<Location> {
        BTreeSet::from([self.location])
    }

    fn border(&self) -> BTreeSet<Location> {
        self.location.orthogonal_neighbors().into_iter().collect()
    }

    fn margin(&self) -> BTreeSet<Location> {
        let border = self.border();
        self.location.surrounding().into_iter().filter(|loc| !border.contains(loc)).collect()
    }

    fn contains(&self, loc: Location) -> bool {
        self.location == loc
    }
}

/// A borrowed terrain feature tagged with its kind.
#[derive(Clone, Copy, Debug)]
pub enum Terrain<'a> {
    Room(&'a Room),
    Hallway(&'a Hallway),
    Door(&'a Door),
    World(&'a World),
    Player(&'a Player),
}

impl Terrain<'_> {
    fn region(&self) -> &dyn Region {
        match *self {
            Self::Room(room) => room,
            Self::Hallway(hallway) => hallway,
            Self::Door(door) => door,
            Self::World(world) => world,
            Self::Player(player) => player,
        }
    }
}

impl Region for Terrain<'_> {
    fn content(&self) -> BTreeSet<Location> {
        self.region().content()
    }

    fn border(&self) -> BTreeSet<Location> {
        self.region().border()
    }

    fn margin(&self) -> BTreeSet<Location> {
        self.region().margin()
    }

    fn contains(&self, loc: Location) -> bool {
        self.region().contains(loc)
    }
}
