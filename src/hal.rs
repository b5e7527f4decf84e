//! Hardware abstraction seams.
//!
//! The simulation core only ever talks to the character display, the matrix
//! keypad, and the noise source through these traits, so the whole game can
//! run against scripted doubles in tests and against a terminal emulation
//! in the shipped binary.

use std::collections::VecDeque;
use std::io;

use crate::entities::{BLANK_GLYPH, GRID_HEIGHT, GRID_WIDTH};

// ── Traits ────────────────────────────────────────────────────────────────────

/// 16x2 character display, HD44780 style: a cursor plus raw glyph writes.
/// Writes advance the cursor one column; past-the-edge writes are dropped.
pub trait Display {
    fn clear(&mut self) -> io::Result<()>;
    fn set_cursor(&mut self, row: u8, col: u8) -> io::Result<()>;
    fn write_glyph(&mut self, code: u8) -> io::Result<()>;

    /// ASCII convenience wrapper over `write_glyph`.
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        for byte in text.bytes() {
            self.write_glyph(byte)?;
        }
        Ok(())
    }
}

/// One electrical probe of a 4x4 keypad cell.
pub trait Keypad {
    /// True while the key at (`row`, `col`) is held down. The electrical
    /// settle delay of the real scan lives behind this call.
    fn is_pressed(&mut self, row: u8, col: u8) -> bool;
}

/// Source of noisy samples used to reseed the game's PRNG (a floating ADC
/// pin on the original hardware).
pub trait EntropySource {
    fn sample_noise(&mut self) -> u16;
}

// ── In-memory display ─────────────────────────────────────────────────────────

/// In-memory 16x2 glyph buffer implementing `Display`.
///
/// Serves two roles: the terminal front-end's back buffer, and the render
/// recorder for tests (every cell is inspectable after a tick).
#[derive(Clone, Copy, Debug)]
pub struct FrameBuffer {
    cells: [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    cursor_row: usize,
    cursor_col: usize,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: [[BLANK_GLYPH; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    /// Glyph code at (`row`, `col`); blank for out-of-range coordinates.
    pub fn glyph_at(&self, row: u8, col: u8) -> u8 {
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(BLANK_GLYPH)
    }

    /// One display row as raw glyph codes.
    pub fn row(&self, row: u8) -> &[u8; GRID_WIDTH as usize] {
        &self.cells[row as usize]
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        FrameBuffer::new()
    }
}

impl Display for FrameBuffer {
    fn clear(&mut self) -> io::Result<()> {
        self.cells = [[BLANK_GLYPH; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.cursor_row = 0;
        self.cursor_col = 0;
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> io::Result<()> {
        self.cursor_row = row as usize;
        self.cursor_col = col as usize;
        Ok(())
    }

    fn write_glyph(&mut self, code: u8) -> io::Result<()> {
        if self.cursor_row < GRID_HEIGHT as usize && self.cursor_col < GRID_WIDTH as usize {
            self.cells[self.cursor_row][self.cursor_col] = code;
        }
        self.cursor_col += 1;
        Ok(())
    }
}

// ── Scripted doubles for tests ────────────────────────────────────────────────

/// Keypad double scripted with one logical key code per poll.
///
/// Each queued code answers one full 4x4 scan: the cell matching the code
/// reads as pressed, every other cell as released. An exhausted script (or
/// a queued 0) reads as "no key".
#[derive(Debug, Default)]
pub struct ScriptedKeypad {
    script: VecDeque<u8>,
    current: u8,
    probes_left: u8,
}

impl ScriptedKeypad {
    pub fn new() -> Self {
        ScriptedKeypad::default()
    }

    /// Queue the key code the next poll will observe (0 for none).
    pub fn press(&mut self, key: u8) {
        self.script.push_back(key);
    }

    /// Queue the same key code for `ticks` consecutive polls.
    pub fn hold(&mut self, key: u8, ticks: usize) {
        for _ in 0..ticks {
            self.press(key);
        }
    }
}

impl Keypad for ScriptedKeypad {
    fn is_pressed(&mut self, row: u8, col: u8) -> bool {
        // A full poll probes cells in scan order, stopping early on a hit.
        // Refill the per-poll budget whenever the previous poll finished.
        if self.probes_left == 0 {
            self.current = self.script.pop_front().unwrap_or(0);
            self.probes_left = 16;
        }
        let code = row * 4 + col + 1;
        let hit = self.current == code;
        if hit || (row == 3 && col == 3) {
            self.probes_left = 0;
        } else {
            self.probes_left -= 1;
        }
        hit
    }
}

/// Entropy double: scripted samples, then a fixed fallback.
#[derive(Debug)]
pub struct ScriptedEntropy {
    script: VecDeque<u16>,
    fallback: u16,
    /// Total samples drawn, for asserting reseed cadence.
    pub samples_taken: usize,
}

impl ScriptedEntropy {
    pub fn constant(fallback: u16) -> Self {
        ScriptedEntropy {
            script: VecDeque::new(),
            fallback,
            samples_taken: 0,
        }
    }

    pub fn queue(&mut self, sample: u16) {
        self.script.push_back(sample);
    }
}

impl EntropySource for ScriptedEntropy {
    fn sample_noise(&mut self) -> u16 {
        self.samples_taken += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }
}
