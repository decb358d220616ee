//! Platform abstraction layer
//!
//! Host back-ends the game runs against when there is no window:
//! - `headless`: logging renderer and audio output
//! - `autopilot`: demo input that plays the game

pub mod autopilot;
pub mod headless;

pub use autopilot::Autopilot;
pub use headless::{HeadlessRenderer, LogAudio};
