//! Keypad input reader.
//!
//! One poll is an exhaustive electrical scan of all 16 cells. Debounce and
//! edge semantics deliberately do not live here: the menu wants a fresh
//! press while the game-over screen accepts a held key, so the phase
//! handlers own that policy (see `game.rs`).

use crate::hal::Keypad;

/// No key pressed.
pub const KEY_NONE: u8 = 0;
/// Starts a game from the menu; restarts from the game-over screen.
pub const KEY_START: u8 = 1;
pub const KEY_UP: u8 = 3;
pub const KEY_LEFT: u8 = 6;
pub const KEY_DOWN: u8 = 7;
pub const KEY_RIGHT: u8 = 8;

/// Scan the 4x4 matrix and return the 1-based code of the first pressed
/// key in row-major order, or `KEY_NONE`.
pub fn poll_key(keypad: &mut impl Keypad) -> u8 {
    for row in 0..4 {
        for col in 0..4 {
            if keypad.is_pressed(row, col) {
                return row * 4 + col + 1;
            }
        }
    }
    KEY_NONE
}
