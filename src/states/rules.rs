//! Skull game rules shared by the play and help states

use glam::Vec2;
use rand::Rng;

use super::Scoreboard;
use crate::audio::{AudioManager, IMPACT_VARIANTS, SoundEffect};
use crate::consts::{BOUNCE_POINTS, FALL_THRESHOLD};
use crate::sim::{
    CollisionHandler, CollisionOutcome, Contact, Effect, EntityId, EntityKind, PhysicsWorld,
    Simulation, classify,
};

/// Collision handler applying wall pushes, pillow bounces, score and cues
pub struct SkullRules<'a, R: Rng> {
    /// Upward force of a pillow bounce
    pub bounce_force: f32,
    /// Horizontal part of a pillow bounce (the pillow's current velocity)
    pub control_velocity: f32,
    pub scoreboard: &'a mut Scoreboard,
    pub audio: &'a mut AudioManager,
    pub rng: &'a mut R,
}

impl<W: PhysicsWorld, R: Rng> CollisionHandler<W> for SkullRules<'_, R> {
    fn on_collide(&mut self, contact: &mut Contact<'_, W>) {
        let (a, b) = contact.entities_mut();
        let CollisionOutcome::Impact(effect) = classify(a, b) else {
            return;
        };

        match effect {
            Some(Effect::WallPush { enemy, force }) => contact.apply_force(enemy, force),
            Some(Effect::PlayerBounce { enemy }) => {
                contact.apply_force(enemy, Vec2::new(self.control_velocity, self.bounce_force));
                self.scoreboard.add(BOUNCE_POINTS, self.audio);
            }
            None => {}
        }

        self.audio.play(random_impact(&mut *self.rng));
    }
}

/// One of the interchangeable impact cues
pub fn random_impact<R: Rng>(rng: &mut R) -> SoundEffect {
    SoundEffect::Impact(rng.random_range(0..IMPACT_VARIANTS))
}

/// Enemies whose body has dropped below the screen
pub fn fallen_enemies<W: PhysicsWorld>(sim: &Simulation<W>) -> Vec<EntityId> {
    sim.entities()
        .iter()
        .filter(|e| e.kind() == EntityKind::Enemy)
        .map(|e| e.id())
        .filter(|&id| sim.position(id).is_some_and(|p| p.y < FALL_THRESHOLD))
        .collect()
}

/// Teleport an entity to `position` and stop it
pub fn respawn<W: PhysicsWorld>(sim: &mut Simulation<W>, id: EntityId, position: Vec2) {
    sim.set_position(id, position);
    sim.set_velocity(id, Vec2::ZERO);
}

/// Random skull start above the play arena
pub fn play_spawn<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(-3..=3) as f32,
        rng.random_range(10..=20) as f32,
    )
}

/// Random skull start above the menu, at height `y`
pub fn menu_spawn<R: Rng>(rng: &mut R, y: f32) -> Vec2 {
    Vec2::new(rng.random_range(-10..=10) as f32, y)
}

/// Random spin in [-10, 10] rad/s, in 0.01 steps
pub fn play_spin<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(-1000..=1000) as f32 / 100.0
}

/// Random spin in [-10, 10] rad/s, in 0.1 steps
pub fn menu_spin<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(-100..=100) as f32 / 10.0
}
