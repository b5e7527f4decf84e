//! Terminal front-end: emulates the 16x2 character display, the 4x4 matrix
//! keypad, and the noise source on a desktop terminal so the simulation
//! core runs unmodified.

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::{rngs::ThreadRng, thread_rng, Rng};

use coin_dodge::entities::GRID_WIDTH;
use coin_dodge::game::Game;
use coin_dodge::hal::{Display, EntropySource, FrameBuffer, Keypad};
use coin_dodge::input::{KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_START, KEY_UP};

/// Fixed tick pacing, matching the firmware's 50 ms delay.
const TICK: Duration = Duration::from_millis(50);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks. Covers terminals that don't emit key-release events:
/// the OS key-repeat keeps refreshing the timestamp while the key is down.
const HOLD_WINDOW: u64 = 4;

/// Top-left corner of the emulated display inside the terminal.
const LCD_ORIGIN: (u16, u16) = (2, 1);

const C_FRAME: Color = Color::DarkBlue;
const C_LCD: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Keypad emulation ──────────────────────────────────────────────────────────

/// Maps a terminal key to the keypad code it stands in for.
fn keypad_code(code: &KeyCode) -> Option<u8> {
    match code {
        KeyCode::Char('1') | KeyCode::Enter => Some(KEY_START),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(KEY_UP),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(KEY_DOWN),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(KEY_LEFT),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(KEY_RIGHT),
        _ => None,
    }
}

/// Matrix-keypad double driven by terminal key events.
///
/// A real matrix key reads as pressed on every scan while held; terminals
/// only deliver events. Bridged with a code -> last-seen-tick map: a key
/// reads as pressed while its timestamp is within `HOLD_WINDOW` ticks,
/// refreshed by press/repeat events and dropped on release where the
/// terminal reports releases.
struct TerminalKeypad {
    last_seen: HashMap<u8, u64>,
    tick: u64,
}

impl TerminalKeypad {
    fn new() -> Self {
        TerminalKeypad {
            last_seen: HashMap::new(),
            tick: 0,
        }
    }

    fn advance_tick(&mut self) {
        self.tick += 1;
    }

    fn key_down(&mut self, code: &KeyCode) {
        if let Some(key) = keypad_code(code) {
            let _ = self.last_seen.insert(key, self.tick);
        }
    }

    fn key_up(&mut self, code: &KeyCode) {
        if let Some(key) = keypad_code(code) {
            let _ = self.last_seen.remove(&key);
        }
    }
}

impl Keypad for TerminalKeypad {
    fn is_pressed(&mut self, row: u8, col: u8) -> bool {
        let key = row * 4 + col + 1;
        self.last_seen
            .get(&key)
            .map(|&seen| self.tick.saturating_sub(seen) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

// ── Entropy emulation ─────────────────────────────────────────────────────────

/// Stands in for the floating ADC pin: OS randomness narrowed to the
/// 10-bit range the real converter produces.
struct OsEntropy(ThreadRng);

impl OsEntropy {
    fn new() -> Self {
        OsEntropy(thread_rng())
    }
}

impl EntropySource for OsEntropy {
    fn sample_noise(&mut self) -> u16 {
        self.0.gen::<u16>() & 0x03FF
    }
}

// ── Display emulation ─────────────────────────────────────────────────────────

/// Close Unicode stand-in for an HD44780 glyph code.
fn glyph_to_char(code: u8) -> char {
    match code {
        0x20..=0x7d => code as char,
        0x7e => '→',
        0x7f => '←',
        0xa0 => ' ',
        0xff => '█',
        // CGRAM and katakana pages have no clean ASCII mapping
        0x00..=0x1f => ' ',
        _ => '▒',
    }
}

/// The emulated LCD: glyph writes land in an in-memory frame buffer, and
/// `present` paints the buffer into a bordered box once per tick.
struct TerminalDisplay {
    frame: FrameBuffer,
    out: BufWriter<Stdout>,
}

impl TerminalDisplay {
    fn new() -> Self {
        TerminalDisplay {
            frame: FrameBuffer::new(),
            out: BufWriter::new(stdout()),
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        let (ox, oy) = LCD_ORIGIN;
        let bar = "─".repeat(GRID_WIDTH as usize);

        self.out.queue(style::SetForegroundColor(C_FRAME))?;
        self.out.queue(cursor::MoveTo(ox, oy))?;
        self.out.queue(Print(format!("┌{bar}┐")))?;
        for row in 0..2u8 {
            let text: String = self.frame.row(row).iter().copied().map(glyph_to_char).collect();
            self.out.queue(cursor::MoveTo(ox, oy + 1 + u16::from(row)))?;
            self.out.queue(style::SetForegroundColor(C_FRAME))?;
            self.out.queue(Print("│"))?;
            self.out.queue(style::SetForegroundColor(C_LCD))?;
            self.out.queue(Print(text))?;
            self.out.queue(style::SetForegroundColor(C_FRAME))?;
            self.out.queue(Print("│"))?;
        }
        self.out.queue(cursor::MoveTo(ox, oy + 3))?;
        self.out.queue(Print(format!("└{bar}┘")))?;

        self.out.queue(cursor::MoveTo(ox, oy + 5))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out
            .queue(Print("←↑↓→ / WASD : move   1 : start   Q : quit"))?;

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

impl Display for TerminalDisplay {
    fn clear(&mut self) -> std::io::Result<()> {
        self.frame.clear()
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> std::io::Result<()> {
        self.frame.set_cursor(row, col)
    }

    fn write_glyph(&mut self, code: u8) -> std::io::Result<()> {
        self.frame.write_glyph(code)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let mut setup = stdout();
    terminal::enable_raw_mode()?;
    setup.execute(terminal::EnterAlternateScreen)?;
    setup.execute(cursor::Hide)?;
    setup.execute(terminal::Clear(terminal::ClearType::All))?;

    // Request key-release events where the terminal supports them; classic
    // terminals fall back to the hold-window expiry in TerminalKeypad.
    let keyboard_enhanced = setup
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicated thread for blocking event reads; the tick loop never
    // blocks on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&rx);

    if keyboard_enhanced {
        let _ = setup.execute(PopKeyboardEnhancementFlags);
    }
    let _ = setup.execute(cursor::Show);
    let _ = setup.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run(rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut display = TerminalDisplay::new();
    let mut keypad = TerminalKeypad::new();
    let mut entropy = OsEntropy::new();
    let mut game = Game::new(&mut entropy);

    loop {
        let tick_start = Instant::now();
        keypad.advance_tick();

        // Drain pending terminal events into the keypad emulation.
        while let Ok(ev) = rx.try_recv() {
            if let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            {
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            _ => {}
                        }
                        keypad.key_down(&code);
                    }
                    KeyEventKind::Release => keypad.key_up(&code),
                }
            }
        }

        game.tick(&mut display, &mut keypad, &mut entropy)?;
        display.present()?;

        let elapsed = tick_start.elapsed();
        if elapsed < TICK {
            thread::sleep(TICK - elapsed);
        }
    }
}
