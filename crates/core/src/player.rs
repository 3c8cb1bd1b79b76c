use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::mapgen::GenRng;
use crate::terrain::Region;
use crate::types::{Direction, Location};
use crate::world::{World, WorldId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    location: Location,
    world: WorldId,
}

impl Player {
    pub fn new(location: Location, world: WorldId) -> Self {
        Self { location, world }
    }

    /// Places the player on a passable cell chosen by the generation RNG.
    /// A world without passable cells spawns the player at the origin.
    pub fn spawn(world: &World, rng: &mut GenRng) -> Self {
        let cells: Vec<Location> = world.passable_cells().into_iter().collect();
        let location = if cells.is_empty() {
            Location::new(0, 0)
        } else {
            cells[rng.below(cells.len() as u64) as usize]
        };
        Self { location, world: world.fingerprint() }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn world(&self) -> WorldId {
        self.world
    }

    /// Where a step in `direction` would land, passable or not.
    pub fn step_target(&self, direction: Direction) -> Location {
        self.location + direction.delta()
    }

    pub(crate) fn relocate(&mut self, location: Location) {
        self.location = location;
    }
}

impl Region for Player {
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
