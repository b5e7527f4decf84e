//! All game entity types and gameplay constants. Pure data, no logic
//! beyond the enemy-pool bookkeeping.

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Display columns. Positions live in `0..=GRID_WIDTH - 1`.
pub const GRID_WIDTH: i8 = 16;
/// Display rows.
pub const GRID_HEIGHT: i8 = 2;

// ── Tuning constants ──────────────────────────────────────────────────────────

/// Hard cap on simultaneous live enemies.
pub const MAX_ENEMIES: usize = 3;
/// Max simultaneous live enemies in a single row.
pub const ROW_CAPACITY: u8 = 2;
/// Ticks that must elapse between enemy spawns.
pub const SPAWN_INTERVAL: u8 = 4;
/// Width of the money spawn band; money lands in the central
/// `(16 - MONEY_SPAWN_AREA) ..= MONEY_SPAWN_AREA - 1` columns.
pub const MONEY_SPAWN_AREA: i8 = 14;
/// Ticks the final frame stays on screen before the game-over screen.
pub const GAME_OVER_TRANSITION_TICKS: u8 = 50;
/// Per-tier ticks between column steps, indexed by `SpeedTier`.
pub const SPEED_INTERVALS: [i8; 3] = [6, 5, 4];

// ── Glyph codes (HD44780-style character set) ─────────────────────────────────

/// Player's glyph after a reset ('@'); cycles upward on each pickup.
pub const PLAYER_START_GLYPH: u8 = 0x40;
/// Solid block.
pub const ENEMY_GLYPH: u8 = 0xFF;
/// Dollar sign.
pub const MONEY_GLYPH: u8 = 0x24;
/// ASCII space, excluded from all visible-glyph draws.
pub const BLANK_GLYPH: u8 = 0x20;
/// The character ROM's second blank cell, also excluded.
pub const ALT_BLANK_GLYPH: u8 = 0xA0;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    pub const fn new(x: i8, y: i8) -> Self {
        Point { x, y }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Direction of travel; fixed for an enemy's whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

/// One of three discrete movement rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedTier {
    Slow,
    Mid,
    Fast,
}

impl SpeedTier {
    /// Ticks between column steps for this tier.
    pub const fn interval(self) -> i8 {
        SPEED_INTERVALS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub loc: Point,
    pub tier: SpeedTier,
    pub heading: Heading,
    /// Countdown to the next column step; reloaded from `tier.interval()`.
    pub move_timer: i8,
}

impl Enemy {
    /// A new enemy at the edge matching its heading, timer preloaded.
    pub fn spawn(row: i8, heading: Heading, tier: SpeedTier) -> Self {
        let x = match heading {
            Heading::Right => 0,
            Heading::Left => GRID_WIDTH - 1,
        };
        Enemy {
            loc: Point::new(x, row),
            tier,
            heading,
            move_timer: tier.interval(),
        }
    }
}

// ── Enemy pool ────────────────────────────────────────────────────────────────

/// Fixed-capacity enemy arena with per-row occupancy counters.
///
/// Removal compacts the live slots in place, preserving relative order, so
/// the pool is always dense: slots `0..len` are live, the rest are junk.
/// No heap allocation, matching the embedded target's constraints.
#[derive(Clone, Copy, Debug)]
pub struct EnemyPool {
    slots: [Enemy; MAX_ENEMIES],
    len: usize,
    row_counts: [u8; GRID_HEIGHT as usize],
}

impl EnemyPool {
    pub fn new() -> Self {
        // Placeholder filler for the dead slots; never observable.
        let filler = Enemy::spawn(0, Heading::Right, SpeedTier::Slow);
        EnemyPool {
            slots: [filler; MAX_ENEMIES],
            len: 0,
            row_counts: [0; GRID_HEIGHT as usize],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == MAX_ENEMIES
    }

    /// Live enemies in `row`; out-of-range rows answer 0.
    pub fn row_count(&self, row: i8) -> u8 {
        match row {
            0..=1 => self.row_counts[row as usize],
            _ => 0,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Enemy> {
        self.slots[..self.len].get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.slots[..self.len].get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.slots[..self.len].iter()
    }

    /// Insert an enemy; a push into a full pool is a no-op.
    pub fn push(&mut self, enemy: Enemy) {
        if self.len == MAX_ENEMIES {
            return;
        }
        self.slots[self.len] = enemy;
        self.len += 1;
        if matches!(enemy.loc.y, 0..=1) {
            self.row_counts[enemy.loc.y as usize] += 1;
        }
    }

    /// Remove the enemy at `index`, shifting later entries one slot earlier.
    pub fn remove(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        let row = self.slots[index].loc.y;
        if matches!(row, 0..=1) {
            self.row_counts[row as usize] -= 1;
        }
        for i in index..self.len - 1 {
            self.slots[i] = self.slots[i + 1];
        }
        self.len -= 1;
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.row_counts = [0; GRID_HEIGHT as usize];
    }
}

impl Default for EnemyPool {
    fn default() -> Self {
        EnemyPool::new()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub loc: Point,
    /// Glyph shown for the player; advances on every pickup.
    pub glyph: u8,
    /// Money collected, pending the money entity's relocation.
    pub carrying: bool,
}

// ── Game phase ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    /// Freeze on the collision frame before showing the game-over screen.
    GameOverTransition,
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole simulation state, owned by the tick loop and passed into the
/// phase handlers. No ambient globals.
#[derive(Clone, Copy, Debug)]
pub struct GameState {
    pub player: Player,
    pub money: Point,
    pub enemies: EnemyPool,
    pub phase: Phase,
    /// Most recently observed key code, for edge-triggered input.
    pub last_key: u8,
    /// Spawn throttle; an enemy may spawn once this exceeds `SPAWN_INTERVAL`.
    pub ticks_since_spawn: u8,
    /// Counter used only in `GameOverTransition`.
    pub transition_timer: u8,
}

impl GameState {
    /// Fresh boot state. The money sits at the origin until the first
    /// Playing tick relocates it (`carrying` starts true).
    pub fn new() -> Self {
        GameState {
            player: Player {
                loc: Point::new(GRID_WIDTH / 2, 0),
                glyph: PLAYER_START_GLYPH,
                carrying: true,
            },
            money: Point::new(0, 0),
            enemies: EnemyPool::new(),
            phase: Phase::Menu,
            last_key: 0,
            ticks_since_spawn: 0,
            transition_timer: 0,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
