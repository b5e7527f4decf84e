//! Randomness service.
//!
//! A deterministic PCG generator periodically reseeded from the hardware
//! noise source, so enemy generation stays unpredictable even though every
//! draw between reseeds is reproducible (which is what the tests rely on).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::entities::{Heading, SpeedTier, ALT_BLANK_GLYPH, BLANK_GLYPH, MONEY_SPAWN_AREA};
use crate::hal::EntropySource;

/// Ticks between entropy reseeds; counted in every phase, menus included.
pub const SEED_REFRESH_TICKS: u8 = 10;

pub struct GameRng {
    rng: Pcg32,
    seed: u16,
    ticks_since_reseed: u8,
}

impl GameRng {
    /// Build a service already seeded from one entropy sample.
    pub fn new(entropy: &mut impl EntropySource) -> Self {
        let mut this = GameRng {
            rng: Pcg32::seed_from_u64(1),
            seed: 1,
            ticks_since_reseed: 0,
        };
        this.reseed(entropy);
        this
    }

    /// Current seed; never 0.
    pub fn seed(&self) -> u16 {
        self.seed
    }

    /// Draw one noise sample and restart the generator from it. A reading
    /// of exactly 0 is corrected to 1, since a zero seed would collapse
    /// the sequence.
    pub fn reseed(&mut self, entropy: &mut impl EntropySource) {
        let reading = entropy.sample_noise();
        self.seed = if reading > 0 { reading } else { 1 };
        self.rng = Pcg32::seed_from_u64(u64::from(self.seed));
    }

    /// Per-tick bookkeeping: reseed every `SEED_REFRESH_TICKS` ticks.
    pub fn tick(&mut self, entropy: &mut impl EntropySource) {
        self.ticks_since_reseed += 1;
        if self.ticks_since_reseed >= SEED_REFRESH_TICKS {
            self.reseed(entropy);
            self.ticks_since_reseed = 0;
        }
    }

    // ── Bounded draws ─────────────────────────────────────────────────────────

    pub fn speed_tier(&mut self) -> SpeedTier {
        match self.rng.gen_range(0..3) {
            0 => SpeedTier::Slow,
            1 => SpeedTier::Mid,
            _ => SpeedTier::Fast,
        }
    }

    pub fn heading(&mut self) -> Heading {
        if self.rng.gen_range(0..2) == 0 {
            Heading::Left
        } else {
            Heading::Right
        }
    }

    /// Uniform row in {0, 1}.
    pub fn row(&mut self) -> i8 {
        self.rng.gen_range(0..2)
    }

    /// Money column, restricted to the central band away from both edges.
    pub fn money_x(&mut self) -> i8 {
        let margin = 16 - MONEY_SPAWN_AREA;
        self.rng.gen_range(margin..MONEY_SPAWN_AREA)
    }

    pub fn money_y(&mut self) -> i8 {
        self.rng.gen_range(0..2)
    }

    /// Uniform draw over the display ROM's printable pages (0x20..=0xFF),
    /// assembled nibble-wise like the glyph table is laid out.
    pub fn decor_glyph(&mut self) -> u8 {
        let page: u8 = self.rng.gen_range(2..16);
        let cell: u8 = self.rng.gen_range(0..16);
        (page << 4) | cell
    }

    /// Like `decor_glyph`, but never one of the two blank cells.
    pub fn decor_glyph_solid(&mut self) -> u8 {
        let glyph = self.decor_glyph();
        if glyph == BLANK_GLYPH || glyph == ALT_BLANK_GLYPH {
            glyph + 1
        } else {
            glyph
        }
    }
}
