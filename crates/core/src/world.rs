//! The generated world: rooms, the hallways joining them, and the single door.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::terrain::{Door, Hallway, Region, Room, Terrain};
use crate::types::Location;

/// Identity of a world, derived from its canonical bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub width: usize,
    pub height: usize,
    rooms: Vec<Room>,
    hallways: Vec<Hallway>,
    door: Option<Door>,
}

impl World {
    pub fn new(
        width: usize,
        height: usize,
        rooms: Vec<Room>,
        hallways: Vec<Hallway>,
        door: Option<Door>,
    ) -> Self {
        Self { width, height, rooms, hallways, door }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    pub fn door(&self) -> Option<Door> {
        self.door
    }

    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.x >= 0 && loc.y >= 0 && (loc.x as usize) < self.width && (loc.y as usize) < self.height
    }

    /// Room or hallway floor. Walls, margins and background are not passable.
    pub fn is_passable(&self, loc: Location) -> bool {
        self.rooms.iter().any(|room| room.contains(loc))
            || self.hallways.iter().any(|hallway| hallway.contains(loc))
    }

    pub fn passable_cells(&self) -> BTreeSet<Location> {
        let mut cells = BTreeSet::new();
        for room in &self.rooms {
            cells.extend(room.content());
        }
        for hallway in &self.hallways {
            cells.extend(hallway.cells().iter().copied());
        }
        cells
    }

    /// Rooms, then hallways, then the door, in insertion order.
    pub fn features(&self) -> impl Iterator<Item = Terrain<'_>> {
        self.rooms
            .iter()
            .map(Terrain::Room)
            .chain(self.hallways.iter().map(Terrain::Hallway))
            .chain(self.door.iter().map(Terrain::Door))
    }

    /// Whether every room can reach every other room through hallways.
    pub fn rooms_connected(&self) -> bool {
        if self.rooms.len() < 2 {
            return true;
        }
        let mut seen = vec![false; self.rooms.len()];
        let mut open = VecDeque::from([0_usize]);
        seen[0] = true;
        while let Some(current) = open.pop_front() {
            for hallway in &self.hallways {
                let (a, b) = hallway.rooms;
                let next = if a == current {
                    b
                } else if b == current {
                    a
                } else {
                    continue;
                };
                if next < seen.len() && !seen[next] {
                    seen[next] = true;
                    open.push_back(next);
                }
            }
        }
        seen.iter().all(|&visited| visited)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        push_len(&mut bytes, self.width);
        push_len(&mut bytes, self.height);

        push_len(&mut bytes, self.rooms.len());
        for room in &self.rooms {
            for value in [room.x, room.y, room.width, room.height] {
                bytes.extend(value.to_le_bytes());
            }
        }

        push_len(&mut bytes, self.hallways.len());
        for hallway in &self.hallways {
            push_len(&mut bytes, hallway.rooms.0);
            push_len(&mut bytes, hallway.rooms.1);
            push_len(&mut bytes, hallway.len());
            for cell in hallway.cells() {
                bytes.extend(cell.y.to_le_bytes());
                bytes.extend(cell.x.to_le_bytes());
            }
        }

        match self.door {
            Some(door) => {
                bytes.push(1);
                bytes.extend(door.location.y.to_le_bytes());
                bytes.extend(door.location.x.to_le_bytes());
            }
            None => bytes.push(0),
        }
        bytes
    }

    pub fn fingerprint(&self) -> WorldId {
        WorldId(xxh3_64(&self.canonical_bytes()))
    }
}

/// Sizes and counts are encoded as little-endian `u64`, wide enough for any `usize`.
pub(crate) fn push_len(bytes: &mut Vec<u8>, value: usize) {
    bytes.extend(u64::try_from(value).unwrap_or(u64::MAX).to_le_bytes());
}

impl Region for World {
    fn content(&self) -> BTreeSet<Location> {
        self.passable_cells()
    }

    fn border(&self) -> BTreeSet<Location> {
        let passable = self.passable_cells();
        let mut walls = BTreeSet::new();
        for room in &self.rooms {
            walls.extend(room.border());
        }
        for hallway in &self.hallways {
            walls.extend(hallway.border());
        }
        walls.retain(|wall| !passable.contains(wall));
        walls
    }

    fn margin(&self) -> BTreeSet<Location> {
        let passable = self.passable_cells();
        let walls = self.border();
        walls
            .iter()
            .flat_map(|wall| wall.orthogonal_neighbors())
            .filter(|loc| !walls.contains(loc) && !passable.contains(loc))
            .collect()
    }

    fn contains(&self, loc: Location) -> bool {
        self.is_passable(loc)
    }
}
