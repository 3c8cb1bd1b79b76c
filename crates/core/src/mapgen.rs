//! Seeded world generation split into placement, connection and RNG submodules.

mod generator;
mod layout;
mod seed;

pub use generator::WorldGenerator;
pub use seed::{GenRng, RngCursor};

use crate::config::EngineConfig;
use crate::world::World;

/// Generates a world on a `canvas_width` x `canvas_height` canvas with up to
/// `max_rooms` rooms, using default room size bounds.
pub fn generate(
    canvas_width: usize,
    canvas_height: usize,
    max_rooms: usize,
    rng: &mut GenRng,
) -> World {
    let config = EngineConfig { canvas_width, canvas_height, max_rooms, ..EngineConfig::default() };
    WorldGenerator::new(&config).generate(rng)
}

#[cfg(test)]
mod tests {
    use super::{GenRng, WorldGenerator};
    use crate::config::EngineConfig;

    #[test]
    fn generate_matches_world_generator_output() {
        let from_helper = super::generate(50, 20, 6, &mut GenRng::from_seed(123));
        let config =
            EngineConfig { canvas_width: 50, canvas_height: 20, max_rooms: 6, ..Default::default() };
        let from_generator = WorldGenerator::new(&config).generate(&mut GenRng::from_seed(123));

        assert_eq!(from_helper, from_generator);
    }
}
