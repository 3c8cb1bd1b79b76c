use tempfile::{TempDir, tempdir};

use super::*;
use crate::error::LoadError;
use crate::types::Tile;

fn fresh_session() -> (TempDir, Session) {
    let dir = tempdir().unwrap();
    let session = Session::new(EngineConfig::default(), SaveSlot::in_dir(dir.path()));
    (dir, session)
}

fn session_in(dir: &TempDir) -> Session {
    Session::new(EngineConfig::default(), SaveSlot::in_dir(dir.path()))
}

#[test]
fn new_game_spawns_player_on_passable_cell() {
    let (_dir, mut session) = fresh_session();
    session.process_input("n123s").unwrap();

    assert_eq!(session.input_state(), InputState::Play);
    let world = session.world().expect("world generated");
    let player = session.player().expect("player spawned");
    assert!(!world.rooms().is_empty());
    assert!(world.is_passable(player.location()));
    assert_eq!(player.world(), world.fingerprint());
}

#[test]
fn same_seed_generates_same_world() {
    let (_a, mut first) = fresh_session();
    let (_b, mut second) = fresh_session();
    first.process_input("n123s").unwrap();
    second.process_input("N123S").unwrap();

    assert_eq!(first.world(), second.world());
    assert_eq!(first.player(), second.player());
    assert_eq!(first.snapshot_hash(), second.snapshot_hash());
}

#[test]
fn moves_in_one_string_match_moves_fed_one_at_a_time() {
    let (_a, mut batched) = fresh_session();
    batched.process_input("n123swwww").unwrap();

    let (_b, mut stepped) = fresh_session();
    stepped.process_input("n123s").unwrap();
    for _ in 0..4 {
        stepped.process_char('w').unwrap();
    }

    assert_eq!(batched.player(), stepped.player());
    assert_eq!(batched.grid(), stepped.grid());
    assert_eq!(batched.snapshot_hash(), stepped.snapshot_hash());
}

#[test]
fn save_then_load_restores_world_and_player() {
    let dir = tempdir().unwrap();
    let mut first = session_in(&dir);
    first.process_input("n123s:q").unwrap();
    assert!(first.is_terminated());
    assert!(first.slot().exists());

    let mut second = session_in(&dir);
    second.process_input("l").unwrap();
    assert_eq!(second.input_state(), InputState::Play);
    assert_eq!(second.world(), first.world());
    assert_eq!(second.player(), first.player());
    assert_eq!(second.state(), first.state());
}

#[test]
fn quitting_and_resuming_matches_an_uninterrupted_run() {
    let dir = tempdir().unwrap();
    let mut interrupted = session_in(&dir);
    interrupted.process_input("n123sww:q").unwrap();
    let mut resumed = session_in(&dir);
    resumed.process_input("ldd").unwrap();

    let (_other, mut straight) = fresh_session();
    straight.process_input("n123swwdd").unwrap();

    assert_eq!(resumed.player(), straight.player());
    assert_eq!(resumed.world(), straight.world());
    assert_eq!(resumed.grid(), straight.grid());
    assert_eq!(resumed.snapshot_hash(), straight.snapshot_hash());
}

#[test]
fn empty_input_is_rejected() {
    let (_dir, mut session) = fresh_session();
    assert!(matches!(session.process_input(""), Err(EngineError::EmptyInput)));
    assert_eq!(session.input_state(), InputState::Initial);
}

#[test]
fn confirming_without_digits_keeps_waiting_for_seed() {
    let (_dir, mut session) = fresh_session();
    let err = session.process_input("ns").unwrap_err();
    assert!(matches!(err, EngineError::InvalidSeed { ref digits } if digits.is_empty()));
    assert_eq!(session.input_state(), InputState::WaitForSeed);
    assert!(session.world().is_none());

    session.process_input("7s").unwrap();
    assert_eq!(session.input_state(), InputState::Play);
}

#[test]
fn seed_beyond_u64_is_rejected() {
    let (_dir, mut session) = fresh_session();
    let err = session.process_input("n99999999999999999999s").unwrap_err();
    assert!(matches!(err, EngineError::InvalidSeed { .. }));
    assert_eq!(session.input_state(), InputState::WaitForSeed);

    session.process_input("12s").unwrap();
    assert_eq!(session.state().unwrap().rng.seed, 12);
}

#[test]
fn leading_zeros_name_the_same_seed() {
    let (_a, mut padded) = fresh_session();
    let (_b, mut plain) = fresh_session();
    padded.process_input("n007s").unwrap();
    plain.process_input("n7s").unwrap();
    assert_eq!(padded.world(), plain.world());
}

#[test]
fn blocked_moves_leave_the_session_untouched() {
    let (_dir, mut session) = fresh_session();
    session.process_input("n123s").unwrap();

    // Walk far enough in one direction that the last steps must hit a wall.
    for _ in 0..100 {
        session.process_char('a').unwrap();
    }
    let before = session.snapshot_hash();
    let player = *session.player().unwrap();

    let outcome = session.process_char('a').unwrap();
    assert_eq!(outcome.command, Command::Move(Direction::Left));
    assert_eq!(outcome.redraw, Redraw::Nothing);
    assert_eq!(session.player(), Some(&player));
    assert_eq!(session.snapshot_hash(), before);
}

#[test]
fn successful_move_redraws_two_cells() {
    let (_dir, mut session) = fresh_session();
    session.process_input("n123s").unwrap();

    let from = session.player().unwrap().location();
    let world = session.world().unwrap().clone();
    let key = [('w', Direction::Up), ('a', Direction::Left), ('s', Direction::Down), ('d', Direction::Right)]
        .into_iter()
        .find(|(_, dir)| world.is_passable(from + dir.delta()));
    let Some((key, direction)) = key else {
        return;
    };

    let outcome = session.process_char(key).unwrap();
    let to = from + direction.delta();
    assert_eq!(outcome.redraw, Redraw::Cells(vec![from, to]));
    assert_eq!(session.player().unwrap().location(), to);
    let grid = session.grid().unwrap();
    assert_eq!(grid.tile_at(to), Tile::Player);
    assert_ne!(grid.tile_at(from), Tile::Player);
}

#[test]
fn quit_from_initial_terminates_without_saving() {
    let (_dir, mut session) = fresh_session();
    let outcome = session.process_char('q').unwrap();
    assert_eq!(outcome.command, Command::QuitGame);
    assert!(session.is_terminated());
    assert!(!session.slot().exists());
}

#[test]
fn input_after_quit_is_refused() {
    let (_dir, mut session) = fresh_session();
    let err = session.process_input("qn1s").unwrap_err();
    assert!(matches!(err, EngineError::SessionOver));
    assert!(session.world().is_none());
}

#[test]
fn loading_without_a_save_fails() {
    let (_dir, mut session) = fresh_session();
    let err = session.process_input("l").unwrap_err();
    assert!(matches!(err, EngineError::LoadFailed(LoadError::NoSave { .. })));
    assert_eq!(session.input_state(), InputState::Initial);
    assert!(session.world().is_none());
}

#[test]
fn colon_without_q_returns_to_play() {
    let (_dir, mut session) = fresh_session();
    session.process_input("n5s:").unwrap();
    assert_eq!(session.input_state(), InputState::WaitForCommand);
    let outcome = session.process_char('x').unwrap();
    assert_eq!(outcome.command, Command::Null);
    assert_eq!(session.input_state(), InputState::Play);
    assert!(!session.is_terminated());
}

#[test]
fn new_game_and_load_request_full_redraw() {
    let dir = tempdir().unwrap();
    let mut session = session_in(&dir);
    session.process_input("n9").unwrap();
    assert_eq!(session.process_char('s').unwrap().redraw, Redraw::Full);
    session.process_input(":q").unwrap();

    let mut resumed = session_in(&dir);
    assert_eq!(resumed.process_char('l').unwrap().redraw, Redraw::Full);
}
