//! Session driver: folds keystrokes into world, player and tile-grid effects.
//!
//! The driver exclusively owns the RNG, world, player and grid of the running
//! game. Every step either completes or fails before any of them change; the
//! input state only advances after the step's effect succeeded.

use std::mem;

use log::{debug, info};

use crate::command::{self, Command, InputState};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::TileGrid;
use crate::mapgen::{GenRng, WorldGenerator};
use crate::player::Player;
use crate::save_file::SaveSlot;
use crate::state::SessionState;
use crate::types::{Direction, Location};
use crate::world::World;

/// Which part of the tile grid a step changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Redraw {
    Nothing,
    Full,
    Cells(Vec<Location>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub command: Command,
    pub state: InputState,
    pub redraw: Redraw,
}

pub(crate) struct ActiveGame {
    pub(crate) rng: GenRng,
    pub(crate) world: World,
    pub(crate) player: Player,
    pub(crate) grid: TileGrid,
}

impl ActiveGame {
    fn from_state(state: SessionState) -> Self {
        let grid = TileGrid::project(&state.world, &state.player);
        Self { rng: GenRng::resume(state.rng), world: state.world, player: state.player, grid }
    }

    fn snapshot(&self) -> SessionState {
        SessionState { rng: self.rng.cursor(), world: self.world.clone(), player: self.player }
    }
}

pub struct Session {
    config: EngineConfig,
    slot: SaveSlot,
    input_state: InputState,
    seed_digits: String,
    pub(crate) game: Option<ActiveGame>,
    terminated: bool,
}

impl Session {
    pub fn new(config: EngineConfig, slot: SaveSlot) -> Self {
        Self {
            config,
            slot,
            input_state: InputState::Initial,
            seed_digits: String::new(),
            game: None,
            terminated: false,
        }
    }

    pub fn input_state(&self) -> InputState {
        self.input_state
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn slot(&self) -> &SaveSlot {
        &self.slot
    }

    pub fn world(&self) -> Option<&World> {
        self.game.as_ref().map(|game| &game.world)
    }

    pub fn player(&self) -> Option<&Player> {
        self.game.as_ref().map(|game| &game.player)
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        self.game.as_ref().map(|game| &game.grid)
    }

    /// The persistable state of the running game, if one has started.
    pub fn state(&self) -> Option<SessionState> {
        self.game.as_ref().map(ActiveGame::snapshot)
    }

    /// Feeds every character of `input` in order, stopping at the first error.
    pub fn process_input(&mut self, input: &str) -> Result<(), EngineError> {
        if input.is_empty() {
            return Err(EngineError::EmptyInput);
        }
        for key in input.chars() {
            self.process_char(key)?;
        }
        Ok(())
    }

    pub fn process_char(&mut self, key: char) -> Result<StepOutcome, EngineError> {
        if self.terminated {
            return Err(EngineError::SessionOver);
        }

        let previous = self.input_state;
        let (command, next) = command::step(previous, key);
        let redraw = match command {
            Command::Null => Redraw::Nothing,
            Command::NewGame => {
                self.seed_digits.clear();
                Redraw::Nothing
            }
            Command::Digit(digit) => {
                self.seed_digits.push(char::from(b'0' + digit));
                Redraw::Nothing
            }
            Command::ConfirmSeed => self.start_new_game()?,
            Command::LoadGame => self.load_game()?,
            Command::Move(direction) => self.move_player(direction),
            Command::QuitGame => self.quit(previous)?,
        };

        self.input_state = next;
        Ok(StepOutcome { command, state: next, redraw })
    }

    fn start_new_game(&mut self) -> Result<Redraw, EngineError> {
        // A rejected seed is discarded so the next digits start a fresh one.
        let digits = mem::take(&mut self.seed_digits);
        let seed = digits.parse::<u64>().map_err(|_| EngineError::InvalidSeed { digits })?;

        let mut rng = GenRng::from_seed(seed);
        let world = WorldGenerator::new(&self.config).generate(&mut rng);
        let player = Player::spawn(&world, &mut rng);
        let grid = TileGrid::project(&world, &player);
        info!("new game with seed {seed}; player spawned at {:?}", player.location());

        self.game = Some(ActiveGame { rng, world, player, grid });
        Ok(Redraw::Full)
    }

    fn load_game(&mut self) -> Result<Redraw, EngineError> {
        let state = self.slot.load()?;
        info!("resumed game at {:?}", state.player.location());
        self.game = Some(ActiveGame::from_state(state));
        Ok(Redraw::Full)
    }

    fn move_player(&mut self, direction: Direction) -> Redraw {
        let Some(game) = self.game.as_mut() else {
            return Redraw::Nothing;
        };
        let from = game.player.location();
        let to = game.player.step_target(direction);
        if !game.world.is_passable(to) {
            debug!("blocked move {direction:?} from {from:?}");
            return Redraw::Nothing;
        }
        game.player.relocate(to);
        Redraw::Cells(game.grid.move_player(from, to))
    }

    fn quit(&mut self, previous: InputState) -> Result<Redraw, EngineError> {
        if previous == InputState::WaitForCommand
            && let Some(game) = self.game.as_ref()
        {
            self.slot.save(&game.snapshot())?;
        }
        info!("session terminated from {previous:?}");
        self.terminated = true;
        Ok(Redraw::Nothing)
    }
}

#[cfg(test)]
mod tests;
