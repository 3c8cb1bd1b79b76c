use crate::command::InputState;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::TileGrid;
use crate::save_file::SaveSlot;
use crate::session::Session;
use crate::types::Location;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_snapshot_hash: u64,
    pub final_state: InputState,
    pub player: Option<Location>,
    pub terminated: bool,
    pub grid: Option<TileGrid>,
}

/// Runs `input` through a fresh session and reports where it ended up.
pub fn replay_input(
    config: &EngineConfig,
    slot: &SaveSlot,
    input: &str,
) -> Result<ReplayResult, EngineError> {
    let mut session = Session::new(config.clone(), slot.clone());
    session.process_input(input)?;
    Ok(ReplayResult {
        final_snapshot_hash: session.snapshot_hash(),
        final_state: session.input_state(),
        player: session.player().map(|player| player.location()),
        terminated: session.is_terminated(),
        grid: session.grid().cloned(),
    })
}
