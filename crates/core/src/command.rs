//! Keystroke classification: a pure `(state, char) -> (command, state)` table.
//!
//! The machine never touches the world. Seed digits are reported one at a
//! time and accumulated by the session.

use serde::{Deserialize, Serialize};

use crate::types::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputState {
    #[default]
    Initial,
    WaitForSeed,
    Play,
    WaitForCommand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Null,
    NewGame,
    LoadGame,
    QuitGame,
    Digit(u8),
    ConfirmSeed,
    Move(Direction),
}

pub fn step(state: InputState, input: char) -> (Command, InputState) {
    let key = input.to_ascii_lowercase();
    match state {
        InputState::Initial => match key {
            'n' => (Command::NewGame, InputState::WaitForSeed),
            'l' => (Command::LoadGame, InputState::Play),
            'q' => (Command::QuitGame, InputState::Initial),
            _ => (Command::Null, InputState::Initial),
        },
        InputState::WaitForSeed => match key {
            's' => (Command::ConfirmSeed, InputState::Play),
            digit @ '0'..='9' => (Command::Digit(digit as u8 - b'0'), InputState::WaitForSeed),
            _ => (Command::Null, InputState::WaitForSeed),
        },
        InputState::Play => match (key, movement(key)) {
            (_, Some(direction)) => (Command::Move(direction), InputState::Play),
            (':', None) => (Command::Null, InputState::WaitForCommand),
            _ => (Command::Null, InputState::Play),
        },
        InputState::WaitForCommand => match (key, movement(key)) {
            (_, Some(direction)) => (Command::Move(direction), InputState::Play),
            ('q', None) => (Command::QuitGame, InputState::Play),
            _ => (Command::Null, InputState::Play),
        },
    }
}

fn movement(key: char) -> Option<Direction> {
    match key {
        'w' => Some(Direction::Up),
        'a' => Some(Direction::Left),
        's' => Some(Direction::Down),
        'd' => Some(Direction::Right),
        _ => None,
    }
}
