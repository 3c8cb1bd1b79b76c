//! Room placement, hallway connection and door selection.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::config::SizeRange;
use crate::terrain::{Door, Hallway, MIN_ROOM_SIDE, Region, Room};
use crate::types::Location;

use super::seed::GenRng;

pub(super) struct PlacementBounds {
    pub(super) canvas_width: i32,
    pub(super) canvas_height: i32,
    pub(super) max_rooms: usize,
    pub(super) room_width: SizeRange,
    pub(super) room_height: SizeRange,
    pub(super) attempts_per_room: usize,
}

pub(super) fn place_rooms(bounds: &PlacementBounds, rng: &mut GenRng) -> Vec<Room> {
    let min_width = bounds.room_width.min.max(MIN_ROOM_SIDE);
    let min_height = bounds.room_height.min.max(MIN_ROOM_SIDE);
    let max_width = bounds.room_width.max.min(bounds.canvas_width);
    let max_height = bounds.room_height.max.min(bounds.canvas_height);
    if max_width < min_width || max_height < min_height {
        debug!(
            "canvas {}x{} cannot hold a {min_width}x{min_height} room",
            bounds.canvas_width, bounds.canvas_height
        );
        return Vec::new();
    }

    let total_attempts = bounds.max_rooms.saturating_mul(bounds.attempts_per_room);
    let mut rooms: Vec<Room> = Vec::new();
    let mut rejected = 0_usize;
    for _ in 0..total_attempts {
        if rooms.len() >= bounds.max_rooms {
            break;
        }
        let width = rng.range_inclusive(min_width, max_width);
        let height = rng.range_inclusive(min_height, max_height);
        let x = rng.range_inclusive(0, bounds.canvas_width - width);
        let y = rng.range_inclusive(0, bounds.canvas_height - height);
        let candidate = Room::new(x, y, width, height);
        if rooms.iter().any(|existing| existing.crowds(&candidate)) {
            rejected += 1;
            continue;
        }
        rooms.push(candidate);
    }

    if rooms.len() < bounds.max_rooms {
        warn!(
            "placed {} of {} rooms after {total_attempts} attempts ({rejected} rejected)",
            rooms.len(),
            bounds.max_rooms
        );
    } else {
        debug!("placed {} rooms ({rejected} candidates rejected)", rooms.len());
    }
    rooms
}

/// Joins each room, in insertion order, to the nearest earlier room by
/// center distance (lowest index on ties). Every room after the first gets
/// exactly one hallway, so the room graph is a spanning tree.
pub(super) fn connect_rooms(rooms: &[Room], rng: &mut GenRng) -> Vec<Hallway> {
    let mut hallways = Vec::with_capacity(rooms.len().saturating_sub(1));
    for pending in 1..rooms.len() {
        let center = rooms[pending].center();
        let Some(nearest) =
            (0..pending).min_by_key(|&index| (rooms[index].center().manhattan(center), index))
        else {
            continue;
        };
        let horizontal_first = rng.coin();
        let hallway = Hallway::carve(rooms, pending, nearest, horizontal_first);
        debug!("hallway {pending} -> {nearest}: {} cells", hallway.len());
        hallways.push(hallway);
    }
    hallways
}

/// First room border cell, scanning rooms in order and each border in set
/// order, that a hallway runs through and that continues into more hallway.
/// A lone room takes its first wall cell facing the interior instead.
pub(super) fn choose_door(rooms: &[Room], hallways: &[Hallway]) -> Option<Door> {
    if hallways.is_empty() {
        let room = rooms.first()?;
        let interior = room.content();
        return room
            .border()
            .into_iter()
            .find(|cell| touches(*cell, &interior))
            .map(|location| Door { location });
    }

    let corridor: BTreeSet<Location> =
        hallways.iter().flat_map(|hallway| hallway.cells().iter().copied()).collect();
    rooms
        .iter()
        .flat_map(|room| room.border())
        .find(|cell| corridor.contains(cell) && touches(*cell, &corridor))
        .map(|location| Door { location })
}

fn touches(cell: Location, cells: &BTreeSet<Location>) -> bool {
    cell.orthogonal_neighbors().iter().any(|next| cells.contains(next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(canvas_width: i32, canvas_height: i32, max_rooms: usize) -> PlacementBounds {
        PlacementBounds {
            canvas_width,
            canvas_height,
            max_rooms,
            room_width: SizeRange { min: 5, max: 9 },
            room_height: SizeRange { min: 5, max: 7 },
            attempts_per_room: 30,
        }
    }

    #[test]
    fn placement_keeps_rooms_inside_canvas_and_apart() {
        let mut rng = GenRng::from_seed(42);
        let rooms = place_rooms(&bounds(60, 25, 10), &mut rng);
        assert!(rooms.len() >= 4, "expected several rooms, got {}", rooms.len());

        for room in &rooms {
            assert!(room.x >= 0 && room.y >= 0);
            assert!(room.right() < 60 && room.bottom() < 25);
        }
        for (index, left) in rooms.iter().enumerate() {
            for right in &rooms[index + 1..] {
                assert!(!left.crowds(right), "rooms must not touch: {left:?} vs {right:?}");
            }
        }
    }

    #[test]
    fn placement_gives_up_on_canvas_smaller_than_minimum_room() {
        let mut rng = GenRng::from_seed(7);
        assert!(place_rooms(&bounds(4, 40, 5), &mut rng).is_empty());
        assert_eq!(rng.cursor().word_pos, 0);
    }

    #[test]
    fn placement_terminates_when_space_runs_out() {
        let mut rng = GenRng::from_seed(3);
        let rooms = place_rooms(&bounds(12, 12, 50), &mut rng);
        assert!(!rooms.is_empty() && rooms.len() < 50);
        assert!(rng.cursor().word_pos <= 50 * 30 * 4 * 2);
    }

    #[test]
    fn each_room_links_to_nearest_earlier_room() {
        let rooms = [Room::new(0, 0, 5, 5), Room::new(30, 0, 5, 5), Room::new(8, 0, 5, 5)];
        let hallways = connect_rooms(&rooms, &mut GenRng::from_seed(1));
        let links: Vec<(usize, usize)> = hallways.iter().map(|hallway| hallway.rooms).collect();
        assert_eq!(links, vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn door_sits_on_first_wall_opening_in_scan_order() {
        let rooms = [Room::new(0, 0, 5, 5), Room::new(8, 0, 5, 5)];
        let hallways = [Hallway::carve(&rooms, 1, 0, true)];
        let door = choose_door(&rooms, &hallways).expect("door between connected rooms");
        assert_eq!(door.location, Location::new(4, 2));
    }

    #[test]
    fn lone_room_door_faces_its_interior() {
        let rooms = [Room::new(2, 2, 4, 4)];
        let door = choose_door(&rooms, &[]).expect("single room still gets a door");
        assert_eq!(door.location, Location::new(3, 2));
        assert_eq!(choose_door(&[], &[]), None);
    }
}
