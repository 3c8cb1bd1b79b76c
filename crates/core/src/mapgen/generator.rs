//! World generation orchestration: rooms, then hallways, then the door.

use log::{info, warn};

use crate::config::{EngineConfig, MAX_CANVAS_CELLS, MAX_CANVAS_SIDE};
use crate::world::World;

use super::layout::{PlacementBounds, choose_door, connect_rooms, place_rooms};
use super::seed::GenRng;

pub struct WorldGenerator {
    width: usize,
    height: usize,
    bounds: PlacementBounds,
}

impl WorldGenerator {
    /// Canvases beyond the config limits are shrunk to fit them; the world
    /// reports the canvas it was actually generated on.
    pub fn new(config: &EngineConfig) -> Self {
        let (width, height) = clamp_canvas(config.canvas_width, config.canvas_height);
        if (width, height) != (config.canvas_width, config.canvas_height) {
            warn!(
                "canvas {}x{} exceeds the limits; generating on {width}x{height}",
                config.canvas_width, config.canvas_height
            );
        }
        Self {
            width,
            height,
            bounds: PlacementBounds {
                canvas_width: to_coordinate(width),
                canvas_height: to_coordinate(height),
                max_rooms: config.max_rooms,
                room_width: config.room_width,
                room_height: config.room_height,
                attempts_per_room: config.placement_attempts_per_room,
            },
        }
    }

    pub fn generate(&self, rng: &mut GenRng) -> World {
        let rooms = place_rooms(&self.bounds, rng);
        let hallways = connect_rooms(&rooms, rng);
        let door = choose_door(&rooms, &hallways);
        info!(
            "generated {}x{} world: {} rooms, {} hallways, door {:?}",
            self.width,
            self.height,
            rooms.len(),
            hallways.len(),
            door.map(|door| door.location)
        );
        World::new(self.width, self.height, rooms, hallways, door)
    }
}

fn clamp_canvas(width: usize, height: usize) -> (usize, usize) {
    let width = width.min(MAX_CANVAS_SIDE);
    let height = height.min(MAX_CANVAS_SIDE).min(MAX_CANVAS_CELLS / width.max(1));
    (width, height)
}

fn to_coordinate(side: usize) -> i32 {
    i32::try_from(side).unwrap_or(i32::MAX)
}
