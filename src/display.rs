//! Render layer: translates game state into display-trait calls.
//!
//! No game logic is performed here; each screen is a clear followed by
//! cursor-positioned glyph writes. Whatever implements `hal::Display`
//! (terminal box, in-memory frame buffer) receives the same sequence.

use std::io;

use crate::entities::{Enemy, GameState, ENEMY_GLYPH, MONEY_GLYPH};
use crate::hal::Display;
use crate::rng::GameRng;

// ── Playfield ─────────────────────────────────────────────────────────────────

/// Render one play frame: money, then player, then enemies, so an enemy
/// sitting on the player shows the collision.
pub fn draw_objects(display: &mut impl Display, state: &GameState) -> io::Result<()> {
    display.clear()?;
    draw_money(display, state)?;
    draw_player(display, state)?;
    for enemy in state.enemies.iter() {
        draw_enemy(display, enemy)?;
    }
    Ok(())
}

fn draw_money(display: &mut impl Display, state: &GameState) -> io::Result<()> {
    display.set_cursor(state.money.y as u8, state.money.x as u8)?;
    display.write_glyph(MONEY_GLYPH)
}

fn draw_player(display: &mut impl Display, state: &GameState) -> io::Result<()> {
    display.set_cursor(state.player.loc.y as u8, state.player.loc.x as u8)?;
    display.write_glyph(state.player.glyph)
}

fn draw_enemy(display: &mut impl Display, enemy: &Enemy) -> io::Result<()> {
    display.set_cursor(enemy.loc.y as u8, enemy.loc.x as u8)?;
    display.write_glyph(ENEMY_GLYPH)
}

// ── Menu screen ───────────────────────────────────────────────────────────────

/// Title row is the fixed face framed by four random glyphs on each side,
/// redrawn every tick so the frame shimmers.
pub fn draw_menu(display: &mut impl Display, rng: &mut GameRng) -> io::Result<()> {
    let side: [u8; 4] = [
        rng.decor_glyph_solid(),
        rng.decor_glyph_solid(),
        rng.decor_glyph_solid(),
        rng.decor_glyph_solid(),
    ];

    display.clear()?;
    display.set_cursor(0, 0)?;
    for glyph in side {
        display.write_glyph(glyph)?;
    }
    display.write_str("  :^ )  ")?;
    for glyph in side {
        display.write_glyph(glyph)?;
    }
    display.set_cursor(1, 0)?;
    display.write_str("Press 1 to start")
}

// ── Game-over screen ──────────────────────────────────────────────────────────

pub fn draw_game_over(display: &mut impl Display, rng: &mut GameRng) -> io::Result<()> {
    let side: [u8; 2] = [rng.decor_glyph_solid(), rng.decor_glyph_solid()];

    display.clear()?;
    display.set_cursor(0, 0)?;
    for glyph in side {
        display.write_glyph(glyph)?;
    }
    display.write_str(" Game Over  ")?;
    for glyph in side {
        display.write_glyph(glyph)?;
    }
    display.set_cursor(1, 0)?;
    display.write_str("Press 1")
}
