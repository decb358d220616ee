//! Timed round: keep the skulls bouncing for as long as the clock runs

use glam::Vec2;

use super::rules::{SkullRules, fallen_enemies, play_spawn, play_spin, respawn};
use super::{Pillow, Scoreboard, StateId, Transition, spawn_arena};
use crate::consts::{FALL_PENALTY, PLAY_BOUNCE, PLAY_GRAVITY, ROUND_TIME, SKULL_SIZE};
use crate::game::GameContext;
use crate::input::FrameInput;
use crate::renderer::{Font, Mesh, Renderer, TextAlign};
use crate::sim::{EntityDesc, EntityKind, PhysicsWorld, Simulation};

pub struct PlayState<W: PhysicsWorld> {
    sim: Simulation<W>,
    pillow: Option<Pillow>,
    scoreboard: Scoreboard,
    remaining_time: f32,
    game_over: bool,
    centre: Vec2,
}

impl<W: PhysicsWorld> PlayState<W> {
    pub fn enter(ctx: &mut GameContext) -> Self {
        let mut sim = Simulation::new();
        sim.initialize(PLAY_GRAVITY);
        let pillow = spawn_arena(&mut sim);

        let skulls = ctx.settings.difficulty.skull_count();
        for _ in 0..skulls {
            let desc = EntityDesc::new(
                play_spawn(&mut ctx.rng),
                SKULL_SIZE,
                true,
                EntityKind::Enemy,
            )
            .with_mesh(Mesh::Skull);
            if let Some(id) = sim.spawn(&desc) {
                sim.set_angular_velocity(id, play_spin(&mut ctx.rng));
            }
        }

        ctx.audio.play_music();
        log::info!("Round started: {} skulls, {}s", skulls, ROUND_TIME);

        Self {
            sim,
            pillow,
            scoreboard: Scoreboard::default(),
            remaining_time: ROUND_TIME,
            game_over: false,
            centre: ctx.viewport / 2.0,
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut GameContext,
        input: &FrameInput,
        frame_time: f32,
    ) -> Option<Transition> {
        if !self.game_over {
            self.remaining_time -= frame_time;
            if self.remaining_time <= 0.0 {
                self.game_over = true;
                self.scoreboard.freeze();
                ctx.audio.stop_music();
                log::info!("Game over, final score {}", self.scoreboard.score());
            }
        }

        let control_velocity = self.pillow.map_or(0.0, |p| p.control_velocity());
        let mut rules = SkullRules {
            bounce_force: PLAY_BOUNCE,
            control_velocity,
            scoreboard: &mut self.scoreboard,
            audio: &mut ctx.audio,
            rng: &mut ctx.rng,
        };
        self.sim.update_with(&mut rules);

        for id in fallen_enemies(&self.sim) {
            self.scoreboard.add(FALL_PENALTY, &mut ctx.audio);
            let at = play_spawn(&mut ctx.rng);
            respawn(&mut self.sim, id, at);
        }

        if let Some(pillow) = self.pillow.as_mut() {
            pillow.steer(&mut self.sim, input);
        }

        if input.escape_held {
            ctx.audio.stop_music();
            return Some(Transition::Change(StateId::Menu));
        }
        None
    }

    pub fn score(&self) -> i32 {
        self.scoreboard.score()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn remaining_time(&self) -> f32 {
        self.remaining_time
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
        renderer.draw_text(
            &format!(
                "SCORE: {}  TIME: {}",
                self.scoreboard.score(),
                self.remaining_time as i32
            ),
            Vec2::ZERO,
            TextAlign::Left,
            Font::Small,
        );

        if self.game_over {
            renderer.draw_text(
                "GAME OVER",
                self.centre - Vec2::new(0.0, 50.0),
                TextAlign::Centre,
                Font::Large,
            );
            renderer.draw_text(
                "'ESC' - Return to menu.",
                self.centre,
                TextAlign::Centre,
                Font::Small,
            );
        }
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
