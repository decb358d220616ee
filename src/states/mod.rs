//! Game states
//!
//! Each state owns its simulation and per-state variables. States never switch
//! themselves; `update` returns a [`Transition`] and the game driver tears the
//! old state down before entering the next one.

pub mod help;
pub mod intro;
pub mod menu;
pub mod play;
pub mod rules;

pub use help::HelpState;
pub use intro::IntroState;
pub use menu::{MenuAction, MenuOption, MenuState};
pub use play::PlayState;
pub use rules::SkullRules;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{
    PLAYER_CONTROL_SPEED, PLAYER_LIMIT_X, PLAYER_SIZE, PLAYER_START, PLAYER_STEP, WALL_SIZE, WALL_X,
};
use crate::input::FrameInput;
use crate::renderer::Mesh;
use crate::sim::{EntityDesc, EntityId, EntityKind, PhysicsWorld, Simulation};

/// Which state the game is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    Intro,
    Menu,
    Play,
    Help,
}

impl StateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateId::Intro => "intro",
            StateId::Menu => "menu",
            StateId::Play => "play",
            StateId::Help => "help",
        }
    }
}

/// What a state asks the driver to do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Change(StateId),
    Quit,
}

/// Player score with the game-over freeze
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: i32,
    frozen: bool,
}

impl Scoreboard {
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Stop accepting points
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Add (or take away) points and play the matching cue
    ///
    /// Returns false when the board is frozen.
    pub fn add(&mut self, points: i32, audio: &mut AudioManager) -> bool {
        if self.frozen {
            return false;
        }
        audio.play(if points > 0 {
            SoundEffect::Good
        } else {
            SoundEffect::Bad
        });
        self.score += points;
        log::debug!("Score {:+} -> {}", points, self.score);
        true
    }
}

/// The player-controlled pillow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pillow {
    id: EntityId,
    /// -10, 0 or 10 depending on the key held last frame
    control_velocity: f32,
}

impl Pillow {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn control_velocity(&self) -> f32 {
        self.control_velocity
    }

    /// Move along the floor from held keys, within the arena limits
    pub fn steer<W: PhysicsWorld>(&mut self, sim: &mut Simulation<W>, input: &FrameInput) {
        self.control_velocity = 0.0;
        let x = sim.position(self.id).map_or(0.0, |p| p.x);
        match input.steer() {
            -1 => {
                if x > -PLAYER_LIMIT_X {
                    sim.move_by(self.id, Vec2::new(-PLAYER_STEP, 0.0));
                }
                self.control_velocity = -PLAYER_CONTROL_SPEED;
            }
            1 => {
                if x < PLAYER_LIMIT_X {
                    sim.move_by(self.id, Vec2::new(PLAYER_STEP, 0.0));
                }
                self.control_velocity = PLAYER_CONTROL_SPEED;
            }
            _ => {}
        }
    }
}

/// Invisible side walls plus the pillow
pub fn spawn_arena<W: PhysicsWorld>(sim: &mut Simulation<W>) -> Option<Pillow> {
    for (x, kind) in [(-WALL_X, EntityKind::LeftWall), (WALL_X, EntityKind::RightWall)] {
        let wall = sim.spawn(&EntityDesc::new(Vec2::new(x, 0.0), WALL_SIZE, false, kind))?;
        sim.set_visible(wall, false);
    }

    let id = sim.spawn(
        &EntityDesc::new(PLAYER_START, PLAYER_SIZE, false, EntityKind::Player)
            .with_mesh(Mesh::Pillow),
    )?;
    Some(Pillow {
        id,
        control_velocity: 0.0,
    })
}
