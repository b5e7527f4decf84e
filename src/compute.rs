//! Simulation-step logic.
//!
//! Every function here mutates the single `GameState` aggregate handed in
//! by the controller; randomness comes through the injected `GameRng` so
//! tests control determinism with scripted entropy. No I/O happens in this
//! module.

use log::debug;

use crate::entities::{
    Enemy, GameState, Heading, Phase, Player, Point, ALT_BLANK_GLYPH, BLANK_GLYPH, ENEMY_GLYPH,
    GRID_HEIGHT, GRID_WIDTH, MONEY_GLYPH, PLAYER_START_GLYPH, ROW_CAPACITY, SPAWN_INTERVAL,
};
use crate::hal::EntropySource;
use crate::input::{KEY_DOWN, KEY_LEFT, KEY_NONE, KEY_RIGHT, KEY_UP};
use crate::rng::GameRng;

/// One unit of player movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Apply a unit step and clamp to the grid. Clamping (not wrap-around, not
/// rejection) is the edge policy: pushing against a wall is a valid input
/// that goes nowhere.
pub fn move_player(state: &mut GameState, dir: Move) {
    let loc = &mut state.player.loc;
    match dir {
        Move::Up => loc.y -= 1,
        Move::Down => loc.y += 1,
        Move::Left => loc.x -= 1,
        Move::Right => loc.x += 1,
    }
    loc.x = loc.x.clamp(0, GRID_WIDTH - 1);
    loc.y = loc.y.clamp(0, GRID_HEIGHT - 1);
}

/// Edge-triggered movement: a key only acts on the tick its code differs
/// from the latched one; a key held across ticks moves the player once.
pub fn handle_player_input(state: &mut GameState, key: u8) {
    if key == state.last_key {
        return;
    }
    match key {
        KEY_UP => move_player(state, Move::Up),
        KEY_DOWN => move_player(state, Move::Down),
        KEY_LEFT => move_player(state, Move::Left),
        KEY_RIGHT => move_player(state, Move::Right),
        _ => {}
    }
    state.last_key = key;
}

// ── Money ─────────────────────────────────────────────────────────────────────

/// Relocate the money once the player has collected it. The new cell sits
/// in the central column band so the pickup never hugs an edge.
pub fn spawn_money(state: &mut GameState, rng: &mut GameRng) {
    if state.player.carrying {
        state.money = Point::new(rng.money_x(), rng.money_y());
        state.player.carrying = false;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Throttled, capacity-constrained spawner.
///
/// A spawn needs spare pool capacity and more than `SPAWN_INTERVAL` ticks
/// since the previous spawn. If the drawn row is already at `ROW_CAPACITY`
/// the spawner flips to the other row outright; no re-roll, so spawn
/// latency stays bounded under any randomness.
pub fn spawn_enemies(state: &mut GameState, rng: &mut GameRng) {
    if !state.enemies.is_full() && state.ticks_since_spawn > SPAWN_INTERVAL {
        let mut row = rng.row();
        if state.enemies.row_count(row) >= ROW_CAPACITY {
            row = 1 - row;
        }
        let tier = rng.speed_tier();
        let heading = rng.heading();
        let enemy = Enemy::spawn(row, heading, tier);
        debug!("spawn enemy at ({}, {}) {:?} {:?}", enemy.loc.x, enemy.loc.y, heading, tier);
        state.enemies.push(enemy);
        state.ticks_since_spawn = 0;
    }
    state.ticks_since_spawn = state.ticks_since_spawn.saturating_add(1);
}

/// Advance every live enemy one tick: count its move timer down, step its
/// column when the timer expires, and remove it the moment the column
/// leaves the grid. Removal compacts the pool synchronously, so the index
/// stays put after a removal to not skip the slot just compacted into.
pub fn advance_enemies(state: &mut GameState) {
    let mut i = 0;
    while i < state.enemies.len() {
        let mut gone = false;
        if let Some(enemy) = state.enemies.get_mut(i) {
            enemy.move_timer -= 1;
            if enemy.move_timer <= 0 {
                enemy.loc.x += match enemy.heading {
                    Heading::Left => -1,
                    Heading::Right => 1,
                };
                enemy.move_timer = enemy.tier.interval();
            }
            gone = enemy.loc.x < 0 || enemy.loc.x >= GRID_WIDTH;
        }
        if gone {
            debug!("enemy {} left the grid", i);
            state.enemies.remove(i);
        } else {
            i += 1;
        }
    }
}

// ── Collisions ────────────────────────────────────────────────────────────────

/// True iff any live enemy occupies exactly the player's cell.
pub fn detect_enemy_collision(state: &GameState) -> bool {
    state.enemies.iter().any(|e| e.loc == state.player.loc)
}

/// True iff the money occupies exactly the player's cell.
pub fn detect_money_collision(state: &GameState) -> bool {
    state.money == state.player.loc
}

/// Evaluate both collision kinds for this tick. An enemy hit ends the run;
/// a money hit marks the pickup collected and mutates the player's glyph.
pub fn handle_collisions(state: &mut GameState) {
    if detect_enemy_collision(state) {
        debug!("enemy collision at ({}, {})", state.player.loc.x, state.player.loc.y);
        state.phase = Phase::GameOverTransition;
    }
    if detect_money_collision(state) {
        state.player.carrying = true;
        advance_player_glyph(&mut state.player);
    }
}

/// Step the player's glyph to the next code, skipping the two blank cells
/// and the reserved enemy/money glyphs so the player stays visually
/// distinct, and wrapping past the top of the table back to the start.
pub fn advance_player_glyph(player: &mut Player) {
    player.glyph = player.glyph.wrapping_add(1);
    if matches!(
        player.glyph,
        BLANK_GLYPH | ALT_BLANK_GLYPH | ENEMY_GLYPH | MONEY_GLYPH
    ) {
        player.glyph = player.glyph.wrapping_add(1);
    }
    if player.glyph == 0 {
        player.glyph = PLAYER_START_GLYPH;
    }
}

// ── Reset ─────────────────────────────────────────────────────────────────────

/// Reinitialize for a fresh run: player centered on the top row, fresh
/// seed, empty pool, cleared latch and throttle, back to the menu. The
/// money is left where it was; `carrying` starts true so the first Playing
/// tick relocates it immediately.
pub fn reset(state: &mut GameState, rng: &mut GameRng, entropy: &mut impl EntropySource) {
    state.player.loc = Point::new(GRID_WIDTH / 2, 0);
    rng.reseed(entropy);
    state.player.carrying = true;
    state.player.glyph = PLAYER_START_GLYPH;
    state.enemies.clear();
    state.last_key = KEY_NONE;
    state.ticks_since_spawn = 0;
    state.phase = Phase::Menu;
}
