//! Splash screen

use super::{StateId, Transition};
use crate::consts::{INTRO_TIME, SPLASH_SIZE};
use crate::game::GameContext;
use crate::input::FrameInput;
use crate::renderer::{Renderer, Sprite, SpriteKind};

/// Shows the studio logo, then moves on to the menu
#[derive(Debug, Clone)]
pub struct IntroState {
    timer: f32,
    splash: Sprite,
}

impl IntroState {
    pub fn enter(ctx: &mut GameContext) -> Self {
        Self {
            timer: 0.0,
            splash: Sprite {
                kind: SpriteKind::Splash,
                position: ctx.viewport / 2.0,
                size: SPLASH_SIZE,
            },
        }
    }

    pub fn update(&mut self, _input: &FrameInput, frame_time: f32) -> Option<Transition> {
        self.timer += frame_time;
        (self.timer > INTRO_TIME).then_some(Transition::Change(StateId::Menu))
    }

    pub fn elapsed(&self) -> f32 {
        self.timer
    }

    pub fn render_hud(&self, renderer: &mut dyn Renderer) {
        renderer.draw_sprite(&self.splash);
    }
}
