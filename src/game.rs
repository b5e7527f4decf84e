//! Game controller: the per-tick state machine.
//!
//! One handler per phase, each returning the next phase, so the transition
//! table is an exhaustive `match`. Every tick starts with the randomness
//! service's reseed check, whatever the phase, to keep entropy fresh while
//! idling in a menu.

use std::io;

use log::{debug, info};

use crate::compute;
use crate::display::{draw_game_over, draw_menu, draw_objects};
use crate::entities::{GameState, Phase, GAME_OVER_TRANSITION_TICKS};
use crate::hal::{Display, EntropySource, Keypad};
use crate::input::{poll_key, KEY_START};
use crate::rng::GameRng;

pub struct Game {
    pub state: GameState,
    pub rng: GameRng,
}

impl Game {
    /// Boot a game: seed the randomness service and land in the menu.
    pub fn new(entropy: &mut impl EntropySource) -> Self {
        Game {
            state: GameState::new(),
            rng: GameRng::new(entropy),
        }
    }

    /// Run one tick of the active phase. The caller owns the pacing delay.
    pub fn tick(
        &mut self,
        display: &mut impl Display,
        keypad: &mut impl Keypad,
        entropy: &mut impl EntropySource,
    ) -> io::Result<()> {
        self.rng.tick(entropy);
        let next = match self.state.phase {
            Phase::Menu => self.menu_tick(display, keypad)?,
            Phase::Playing => self.playing_tick(display, keypad)?,
            Phase::GameOverTransition => self.transition_tick(display)?,
            Phase::GameOver => self.game_over_tick(display, keypad, entropy)?,
        };
        if next != self.state.phase {
            debug!("phase {:?} -> {:?}", self.state.phase, next);
        }
        self.state.phase = next;
        Ok(())
    }

    /// Menu: edge-triggered start. A key held over from a previous tick
    /// does not trigger; the latch is updated whether we transition or not.
    fn menu_tick(
        &mut self,
        display: &mut impl Display,
        keypad: &mut impl Keypad,
    ) -> io::Result<Phase> {
        let key = poll_key(keypad);
        let next = if key == KEY_START && key != self.state.last_key {
            info!("game started");
            Phase::Playing
        } else {
            Phase::Menu
        };
        self.state.last_key = key;
        draw_menu(display, &mut self.rng)?;
        Ok(next)
    }

    /// Active play, in fixed order: input, money respawn, enemy spawn,
    /// enemy advance, render, collisions. The render happens before the
    /// collision check so the collision frame is the one left on screen
    /// when the phase flips.
    fn playing_tick(
        &mut self,
        display: &mut impl Display,
        keypad: &mut impl Keypad,
    ) -> io::Result<Phase> {
        let key = poll_key(keypad);
        compute::handle_player_input(&mut self.state, key);
        compute::spawn_money(&mut self.state, &mut self.rng);
        compute::spawn_enemies(&mut self.state, &mut self.rng);
        compute::advance_enemies(&mut self.state);
        draw_objects(display, &self.state)?;
        compute::handle_collisions(&mut self.state);
        Ok(self.state.phase)
    }

    /// Frozen final frame: no input, no movement, just a counter toward
    /// the game-over screen.
    fn transition_tick(&mut self, display: &mut impl Display) -> io::Result<Phase> {
        draw_objects(display, &self.state)?;
        self.state.transition_timer += 1;
        if self.state.transition_timer >= GAME_OVER_TRANSITION_TICKS {
            self.state.transition_timer = 0;
            Ok(Phase::GameOver)
        } else {
            Ok(Phase::GameOverTransition)
        }
    }

    /// Game over: level-triggered restart. Unlike the menu there is no
    /// edge check, so a held start key restarts on every tick it is seen.
    /// Observed behavior of the original firmware, kept as is.
    fn game_over_tick(
        &mut self,
        display: &mut impl Display,
        keypad: &mut impl Keypad,
        entropy: &mut impl EntropySource,
    ) -> io::Result<Phase> {
        let key = poll_key(keypad);
        if key == KEY_START {
            compute::reset(&mut self.state, &mut self.rng, entropy);
            info!("game reset");
        }
        self.state.last_key = key;
        draw_game_over(display, &mut self.rng)?;
        Ok(self.state.phase)
    }
}
