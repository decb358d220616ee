//! Practice mode: one skull, no clock, instructions on screen

use glam::Vec2;

use super::rules::{SkullRules, fallen_enemies, respawn};
use super::{Pillow, Scoreboard, StateId, Transition, spawn_arena};
use crate::consts::{CALM_GRAVITY, FALL_PENALTY, HELP_BOUNCE, HELP_SKULL_START, SKULL_SIZE};
use crate::game::GameContext;
use crate::input::FrameInput;
use crate::renderer::{Font, Mesh, Renderer, TextAlign};
use crate::sim::{EntityDesc, EntityKind, PhysicsWorld, Simulation};

const INSTRUCTIONS: [&str; 3] = [
    "Score points by bouncing skulls off the pillow before time runs out.",
    "You lose 5 points if a skull falls below the screen.",
    "Move the pillow left and right using the arrow keys.",
];

pub struct HelpState<W: PhysicsWorld> {
    sim: Simulation<W>,
    pillow: Option<Pillow>,
    scoreboard: Scoreboard,
    viewport: Vec2,
}

impl<W: PhysicsWorld> HelpState<W> {
    pub fn enter(ctx: &mut GameContext) -> Self {
        let mut sim = Simulation::new();
        sim.initialize(CALM_GRAVITY);
        let pillow = spawn_arena(&mut sim);
        sim.spawn(
            &EntityDesc::new(HELP_SKULL_START, SKULL_SIZE, true, EntityKind::Enemy)
                .with_mesh(Mesh::Skull),
        );

        Self {
            sim,
            pillow,
            scoreboard: Scoreboard::default(),
            viewport: ctx.viewport,
        }
    }

    pub fn update(&mut self, ctx: &mut GameContext, input: &FrameInput) -> Option<Transition> {
        let control_velocity = self.pillow.map_or(0.0, |p| p.control_velocity());
        let mut rules = SkullRules {
            bounce_force: HELP_BOUNCE,
            control_velocity,
            scoreboard: &mut self.scoreboard,
            audio: &mut ctx.audio,
            rng: &mut ctx.rng,
        };
        self.sim.update_with(&mut rules);

        for id in fallen_enemies(&self.sim) {
            self.scoreboard.add(FALL_PENALTY, &mut ctx.audio);
            respawn(&mut self.sim, id, HELP_SKULL_START);
        }

        if let Some(pillow) = self.pillow.as_mut() {
            pillow.steer(&mut self.sim, input);
        }

        input
            .escape_pressed
            .then_some(Transition::Change(StateId::Menu))
    }

    pub fn score(&self) -> i32 {
        self.scoreboard.score()
    }

    pub fn pillow(&self) -> Option<&Pillow> {
        self.pillow.as_ref()
    }

    pub fn simulation(&self) -> &Simulation<W> {
        &self.sim
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.sim.render(renderer);
    }

    pub fn render_hud(&self, renderer: &mut dyn Renderer) {
        let centre = self.viewport / 2.0;
        renderer.draw_text(
            &format!("SCORE: {}", self.scoreboard.score()),
            Vec2::ZERO,
            TextAlign::Left,
            Font::Small,
        );
        for (i, line) in INSTRUCTIONS.iter().enumerate() {
            let y = centre.y + 25.0 * (i as f32 - 1.0);
            renderer.draw_text(line, Vec2::new(centre.x, y), TextAlign::Centre, Font::Small);
        }
        renderer.draw_text(
            "'ESC' - Return to menu.",
            Vec2::new(0.0, self.viewport.y - 25.0),
            TextAlign::Left,
            Font::Small,
        );
    }

    pub fn clean(&mut self) {
        self.sim.clean();
        self.pillow = None;
    }

    #[cfg(test)]
    pub(crate) fn simulation_mut(&mut self) -> &mut Simulation<W> {
        &mut self.sim
    }
}
