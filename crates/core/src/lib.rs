pub mod command;
pub mod config;
pub mod error;
pub mod grid;
pub mod hash;
pub mod mapgen;
pub mod player;
pub mod replay;
pub mod save_file;
pub mod session;
pub mod state;
pub mod terrain;
pub mod types;
pub mod world;

pub use command::{Command, InputState};
pub use config::{ConfigError, EngineConfig, SizeRange};
pub use error::{EngineError, LoadError};
pub use grid::TileGrid;
pub use mapgen::{GenRng, RngCursor, WorldGenerator, generate};
pub use player::Player;
pub use replay::{ReplayResult, replay_input};
pub use save_file::SaveSlot;
pub use session::{Redraw, Session, StepOutcome};
pub use state::SessionState;
pub use terrain::{Door, Hallway, Region, Room, Terrain};
pub use types::*;
pub use world::{World, WorldId};
