//! Scripted physics world for unit tests
//!
//! Bodies integrate gravity and pending forces with unit mass and never
//! collide on their own; contacts are whatever the test scripts.

use glam::Vec2;

use super::entity::EntityId;
use super::physics::{BodyDesc, BodyHandle, PhysicsWorld, Pose};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeBody {
    pub pose: Pose,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub dynamic: bool,
    pub entity: Option<EntityId>,
    pub can_sleep: bool,
    pub density: f32,
    pub half_extents: Vec2,
    /// Every force ever applied, in order
    pub forces: Vec<Vec2>,
    /// Force waiting for the next step
    pub pending: Vec2,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedWorld {
    pub gravity: Vec2,
    pub bodies: Vec<FakeBody>,
    /// (a, b, touching)
    pub contacts: Vec<(BodyHandle, BodyHandle, bool)>,
}

impl ScriptedWorld {
    pub fn script_contact(&mut self, a: BodyHandle, b: BodyHandle, touching: bool) {
        self.contacts.push((a, b, touching));
    }

    /// A static body with no entity attached
    pub fn add_foreign_body(&mut self, position: Vec2) -> BodyHandle {
        self.create_body(&BodyDesc {
            position,
            half_extents: Vec2::splat(0.5),
            dynamic: false,
            density: 1.0,
            can_sleep: true,
            entity: None,
        })
    }

    pub fn forces(&self, body: BodyHandle) -> &[Vec2] {
        self.bodies
            .get(body.0 as usize)
            .map(|b| b.forces.as_slice())
            .unwrap_or(&[])
    }

    fn body_mut(&mut self, body: BodyHandle) -> Option<&mut FakeBody> {
        self.bodies.get_mut(body.0 as usize)
    }
}

impl PhysicsWorld for ScriptedWorld {
    fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            ..Self::default()
        }
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(FakeBody {
            pose: Pose {
                position: desc.position,
                angle: 0.0,
            },
            dynamic: desc.dynamic,
            entity: desc.entity,
            can_sleep: desc.can_sleep,
            density: desc.density,
            half_extents: desc.half_extents,
            ..FakeBody::default()
        });
        handle
    }

    fn step(&mut self, dt: f32) {
        let gravity = self.gravity;
        for body in self.bodies.iter_mut().filter(|b| b.dynamic) {
            body.velocity += (gravity + body.pending) * dt;
            body.pose.position += body.velocity * dt;
            body.pose.angle += body.angular_velocity * dt;
            body.pending = Vec2::ZERO;
        }
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        self.bodies.get(body.0 as usize).map(|b| b.pose)
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(body.0 as usize).map(|b| b.velocity)
    }

    fn set_pose(&mut self, body: BodyHandle, pose: Pose) {
        if let Some(b) = self.body_mut(body) {
            b.pose = pose;
        }
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.velocity = velocity;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: f32) {
        if let Some(b) = self.body_mut(body) {
            b.angular_velocity = velocity;
        }
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.forces.push(force);
            if b.dynamic {
                b.pending += force;
            }
        }
    }

    fn is_dynamic(&self, body: BodyHandle) -> bool {
        self.bodies.get(body.0 as usize).is_some_and(|b| b.dynamic)
    }

    fn entity_of(&self, body: BodyHandle) -> Option<EntityId> {
        self.bodies.get(body.0 as usize).and_then(|b| b.entity)
    }

    fn touching_pairs(&self) -> Vec<(BodyHandle, BodyHandle)> {
        self.contacts
            .iter()
            .filter(|(_, _, touching)| *touching)
            .map(|&(a, b, _)| (a, b))
            .collect()
    }
}
