use anyhow::{Result, ensure};
use clap::Parser;
use crawl_core::{EngineConfig, EngineError, InputState, Region, SaveSlot, Session, Tile};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const KEYS: &[char] = &['n', 'l', 'q', ':', 'w', 'a', 's', 'd', '0', '1', '5', '9', 'x'];

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    keys: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn check_invariants(session: &Session) -> Result<()> {
    let (Some(world), Some(player), Some(grid)) = (session.world(), session.player(), session.grid())
    else {
        return Ok(());
    };
    ensure!(player.world() == world.fingerprint(), "player belongs to another world");
    if !world.passable_cells().is_empty() {
        ensure!(world.is_passable(player.location()), "player left the passable cells");
    }
    ensure!(grid.tile_at(player.location()) == Tile::Player, "grid lost the player glyph");
    ensure!(world.rooms_connected(), "rooms are not connected");
    for room in world.rooms() {
        for cell in room.content() {
            if cell != player.location() {
                ensure!(grid.tile_at(cell) == Tile::RoomFloor, "room floor missing at {cell:?}");
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} keys...", args.seed, args.keys);
    let save_dir = tempfile::tempdir()?;
    let slot = SaveSlot::in_dir(save_dir.path());
    let mut session = Session::new(EngineConfig::default(), slot.clone());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut restarts = 0u32;

    for _ in 0..args.keys {
        let key = choose(&mut rng, KEYS);
        match session.process_char(key) {
            Ok(_) => {}
            Err(EngineError::InvalidSeed { .. }) => {
                ensure!(session.input_state() == InputState::WaitForSeed, "seed error moved state");
            }
            Err(EngineError::LoadFailed(_)) => {
                ensure!(session.input_state() == InputState::Initial, "load error moved state");
            }
            Err(EngineError::SessionOver) => {
                session = Session::new(EngineConfig::default(), slot.clone());
                restarts += 1;
                continue;
            }
            Err(other) => return Err(other.into()),
        }
        check_invariants(&session)?;
        if session.is_terminated() {
            session = Session::new(EngineConfig::default(), slot.clone());
            restarts += 1;
        }
    }

    println!("Fuzzing completed successfully after {restarts} restarts.");
    Ok(())
}
