//! Tile-grid projection of a world and its player, consumed by renderers.

use crate::player::Player;
use crate::terrain::{Region, Terrain};
use crate::types::{Location, Tile};
use crate::world::{World, push_len};

/// Two layers over the same canvas: `base` shows terrain only, `tiles` adds
/// the player on top. Moving the player restores the vacated cell from `base`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    base: Vec<Tile>,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            base: vec![Tile::Background; width * height],
            tiles: vec![Tile::Background; width * height],
        }
    }

    pub fn project(world: &World, player: &Player) -> Self {
        let mut grid = Self::new(world.width, world.height);
        grid.paint(Terrain::World(world));
        grid.paint(Terrain::Player(player));
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Walls only claim background, floors claim walls, room floor and the
    /// door are never overwritten by later terrain.
    pub fn paint(&mut self, terrain: Terrain<'_>) {
        match terrain {
            Terrain::Room(room) => {
                self.paint_walls(&room.border());
                self.paint_floor(&room.content(), Tile::RoomFloor);
            }
            Terrain::Hallway(hallway) => {
                self.paint_walls(&hallway.border());
                self.paint_floor(hallway.cells(), Tile::HallwayFloor);
            }
            Terrain::Door(door) => self.set_base(door.location, Tile::Door),
            Terrain::World(world) => {
                for feature in world.features() {
                    self.paint(feature);
                }
            }
            Terrain::Player(player) => {
                if let Some(index) = self.index(player.location()) {
                    self.tiles[index] = Tile::Player;
                }
            }
        }
    }

    /// Repaints the two cells touched by a player move and returns them.
    pub fn move_player(&mut self, from: Location, to: Location) -> Vec<Location> {
        if let Some(index) = self.index(from) {
            self.tiles[index] = self.base[index];
        }
        if let Some(index) = self.index(to) {
            self.tiles[index] = Tile::Player;
        }
        vec![from, to]
    }

    pub fn tile_at(&self, loc: Location) -> Tile {
        self.index(loc).map_or(Tile::Background, |index| self.tiles[index])
    }

    pub fn terrain_at(&self, loc: Location) -> Tile {
        self.index(loc).map_or(Tile::Background, |index| self.base[index])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }

    pub fn render_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            text.extend(row.iter().map(|tile| tile.glyph()));
            text.push('\n');
        }
        text
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(16 + self.tiles.len());
        push_len(&mut bytes, self.width);
        push_len(&mut bytes, self.height);
        bytes.extend(self.tiles.iter().map(|tile| tile.code()));
        bytes
    }

    fn paint_walls<'a>(&mut self, cells: impl IntoIterator<Item = &'a Location>) {
        for &cell in cells {
            if self.terrain_at(cell) == Tile::Background {
                self.set_base(cell, Tile::Wall);
            }
        }
    }

    fn paint_floor<'a>(&mut self, cells: impl IntoIterator<Item = &'a Location>, tile: Tile) {
        for &cell in cells {
            if !matches!(self.terrain_at(cell), Tile::RoomFloor | Tile::Door) {
                self.set_base(cell, tile);
            }
        }
    }

    fn set_base(&mut self, loc: Location, tile: Tile) {
        if let Some(index) = self.index(loc) {
            self.base[index] = tile;
            self.tiles[index] = tile;
        }
    }

    fn index(&self, loc: Location) -> Option<usize> {
        if loc.x < 0 || loc.y < 0 {
            return None;
        }
        let (x, y) = (loc.x as usize, loc.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Door, Hallway, Room};

    fn fixture() -> (World, Player) {
        let rooms = vec![Room::new(0, 0, 5, 5), Room::new(8, 0, 5, 5)];
        let hallway = Hallway::carve(&rooms, 1, 0, true);
        let world =
            World::new(13, 5, rooms, vec![hallway], Some(Door { location: Location::new(4, 2) }));
        let player = Player::new(Location::new(2, 2), world.fingerprint());
        (world, player)
    }

    #[test]
    fn projection_layers_terrain_door_and_player() {
        let (world, player) = fixture();
        let grid = TileGrid::project(&world, &player);

        assert_eq!(grid.tile_at(Location::new(2, 2)), Tile::Player);
        assert_eq!(grid.terrain_at(Location::new(2, 2)), Tile::RoomFloor);
        assert_eq!(grid.tile_at(Location::new(0, 0)), Tile::Wall);
        assert_eq!(grid.tile_at(Location::new(4, 2)), Tile::Door);
        assert_eq!(grid.tile_at(Location::new(6, 2)), Tile::HallwayFloor);
        assert_eq!(grid.tile_at(Location::new(8, 2)), Tile::HallwayFloor);
        assert_eq!(grid.tile_at(Location::new(6, 1)), Tile::Wall);
        assert_eq!(grid.tile_at(Location::new(40, 40)), Tile::Background);
    }

    #[test]
    fn render_text_draws_rows_top_to_bottom() {
        let (world, player) = fixture();
        let text = TileGrid::project(&world, &player).render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "#####   #####");
        assert_eq!(lines[1], "#...#####...#");
        assert_eq!(lines[2], "#.@.+,,,,...#");
    }

    #[test]
    fn canonical_bytes_lead_with_full_width_dimensions() {
        let bytes = TileGrid::new(3, 2).canonical_bytes();
        assert_eq!(bytes.len(), 16 + 6);
        assert_eq!(&bytes[..8], &3_u64.to_le_bytes());
        assert_eq!(&bytes[8..16], &2_u64.to_le_bytes());
    }

    #[test]
    fn moving_player_touches_only_two_cells() {
        let (world, player) = fixture();
        let mut grid = TileGrid::project(&world, &player);
        let before = grid.clone();

        let changed = grid.move_player(Location::new(2, 2), Location::new(3, 2));
        assert_eq!(changed, vec![Location::new(2, 2), Location::new(3, 2)]);
        assert_eq!(grid.tile_at(Location::new(2, 2)), Tile::RoomFloor);
        assert_eq!(grid.tile_at(Location::new(3, 2)), Tile::Player);

        let differing = (0..13)
            .flat_map(|x| (0..5).map(move |y| Location::new(x, y)))
            .filter(|&loc| grid.tile_at(loc) != before.tile_at(loc))
            .count();
        assert_eq!(differing, 2);
    }
}
