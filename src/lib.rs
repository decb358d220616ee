//! Skullamanjaro - an arcade skull-bouncing game
//!
//! Core modules:
//! - `sim`: Physics-driven entities, simulation stepping and collision dispatch
//! - `states`: Intro, menu, play and help game states
//! - `game`: State machine driving the current game state
//! - `renderer`: Renderer abstraction and draw-command recording
//! - `audio`: Sound cue queue and audio back-end abstraction
//! - `platform`: Headless back-ends and autopilot input
//! - `input`: Per-frame keyboard snapshot
//! - `settings`: Persisted player preferences

pub mod audio;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod states;

pub use game::{Game, GameContext, SceneSnapshot};
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (one physics step per frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Density of every entity's box collider
    pub const BODY_DENSITY: f32 = 1.0;
    /// Depth (z half extent) of generated box meshes
    pub const BOX_MESH_HALF_DEPTH: f32 = 0.25;

    /// Gravity in the play state
    pub const PLAY_GRAVITY: f32 = -3.0;
    /// Gravity in the menu and help states
    pub const CALM_GRAVITY: f32 = -1.0;

    /// Side walls keep skulls in the arena
    pub const WALL_X: f32 = 7.6;
    pub const WALL_SIZE: Vec2 = Vec2::new(1.0, 200.0);

    /// Player pillow
    pub const PLAYER_START: Vec2 = Vec2::new(0.0, 0.5);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(2.5, 0.8);
    /// Horizontal distance the pillow moves per frame while a key is held
    pub const PLAYER_STEP: f32 = 0.25;
    /// The pillow stops moving once it reaches this |x|
    pub const PLAYER_LIMIT_X: f32 = 6.0;
    /// Control velocity passed on to bounced skulls
    pub const PLAYER_CONTROL_SPEED: f32 = 10.0;

    /// Skull body size
    pub const SKULL_SIZE: Vec2 = Vec2::new(0.4, 0.5);

    /// Skulls below this height have fallen off the screen
    pub const FALL_THRESHOLD: f32 = -1.0;

    /// Force applied by a side wall to a skull touching it
    pub const WALL_PUSH: f32 = 10.0;
    /// Upward force from the pillow in the play state
    pub const PLAY_BOUNCE: f32 = 70.0;
    /// Upward force from the pillow in the help state
    pub const HELP_BOUNCE: f32 = 40.0;

    /// Points for bouncing a skull
    pub const BOUNCE_POINTS: i32 = 1;
    /// Points lost when a skull falls off the screen
    pub const FALL_PENALTY: i32 = -5;

    /// Length of a play round in seconds
    pub const ROUND_TIME: f32 = 50.0;
    /// How long the splash screen stays up
    pub const INTRO_TIME: f32 = 1.5;

    /// Number of skulls falling behind the menu
    pub const MENU_SKULLS: usize = 20;
    /// Height the first menu skull starts at, and the gap to the next one
    pub const MENU_SKULL_BASE_Y: f32 = 10.0;
    pub const MENU_SKULL_GAP_Y: f32 = 5.0;

    /// Where the help state drops its only skull
    pub const HELP_SKULL_START: Vec2 = Vec2::new(0.0, 10.0);

    /// Splash logo size in pixels
    pub const SPLASH_SIZE: Vec2 = Vec2::new(512.0, 256.0);

    /// Default viewport size in pixels
    pub const SCREEN_WIDTH: f32 = 960.0;
    pub const SCREEN_HEIGHT: f32 = 544.0;
}
