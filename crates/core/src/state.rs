use serde::{Deserialize, Serialize};

use crate::config::canvas_fits;
use crate::error::LoadError;
use crate::mapgen::RngCursor;
use crate::player::Player;
use crate::world::World;

/// The persisted unit: everything needed to resume a game exactly where it
/// stood, including how far the generation RNG has advanced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub rng: RngCursor,
    pub world: World,
    pub player: Player,
}

impl SessionState {
    /// Cross-field checks a checksum cannot catch, such as a hand-edited
    /// save with a recomputed checksum.
    pub fn validate(&self) -> Result<(), LoadError> {
        let (width, height) = (self.world.width, self.world.height);
        if width == 0 || height == 0 {
            return Err(LoadError::Inconsistent { message: "world canvas is empty".to_string() });
        }
        if !canvas_fits(width, height) {
            return Err(LoadError::Inconsistent {
                message: format!("world canvas {width}x{height} exceeds the canvas limits"),
            });
        }
        if self.player.world() != self.world.fingerprint() {
            return Err(LoadError::Inconsistent {
                message: "player belongs to a different world".to_string(),
            });
        }
        let location = self.player.location();
        if !self.world.passable_cells().is_empty() && !self.world.is_passable(location) {
            return Err(LoadError::Inconsistent {
                message: format!("player at {location:?} is not on a passable cell"),
            });
        }
        Ok(())
    }
}
