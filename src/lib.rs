//! coin-dodge: the simulation core of a dodge/collect arcade game for a
//! 16x2 character display and a 4x4 matrix keypad.
//!
//! Everything hardware-shaped sits behind the traits in [`hal`]; the
//! shipped binary implements them on a desktop terminal, the tests with
//! scripted doubles.

pub mod compute;
pub mod display;
pub mod entities;
pub mod game;
pub mod hal;
pub mod input;
pub mod rng;
