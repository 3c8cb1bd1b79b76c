//! Snapshot hash over everything a session exposes: input state, RNG
//! position, world identity, player and the projected grid.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::command::InputState;
use crate::session::Session;

impl Session {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u8(match self.input_state() {
            InputState::Initial => 0,
            InputState::WaitForSeed => 1,
            InputState::Play => 2,
            InputState::WaitForCommand => 3,
        });
        hasher.write_u8(u8::from(self.is_terminated()));
        if let Some(game) = &self.game {
            let cursor = game.rng.cursor();
            hasher.write_u64(cursor.seed);
            hasher.write_u128(cursor.word_pos);
            hasher.write_u64(game.world.fingerprint().0);
            hasher.write_i32(game.player.location().x);
            hasher.write_i32(game.player.location().y);
            hasher.write(&game.grid.canonical_bytes());
        }
        hasher.finish()
    }
}
