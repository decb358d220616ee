//! Physics world abstraction
//!
//! The simulation only needs a narrow slice of a rigid-body engine: box bodies,
//! a fixed step, pose and velocity access, one-step forces and the list of
//! touching body pairs. [`PhysicsWorld`] captures that slice so the rapier
//! backend can be swapped for a scripted world in tests.

use glam::Vec2;

use super::entity::EntityId;

/// Opaque handle to a body owned by a [`PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

/// Position and orientation of a body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec2,
    /// Rotation about the Z axis (radians)
    pub angle: f32,
}

/// Everything needed to create a box body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Centre of the body
    pub position: Vec2,
    /// Half width and half height of the box collider
    pub half_extents: Vec2,
    /// Dynamic bodies are moved by the solver, static ones only by game code
    pub dynamic: bool,
    pub density: f32,
    /// Sleeping bodies stop producing contacts; the game keeps them awake
    pub can_sleep: bool,
    /// Entity that owns this body, stored on the body for collision lookup
    pub entity: Option<EntityId>,
}

/// A rigid-body world as seen by the simulation
///
/// Dropping the world destroys every body it owns.
pub trait PhysicsWorld {
    /// Create an empty world with the given gravity vector
    fn new(gravity: Vec2) -> Self
    where
        Self: Sized;

    /// Create a body with a single box collider
    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle;

    /// Advance the world by one fixed step
    fn step(&mut self, dt: f32);

    /// Current pose of a body
    fn pose(&self, body: BodyHandle) -> Option<Pose>;

    /// Current linear velocity of a body
    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec2>;

    /// Teleport a body
    fn set_pose(&mut self, body: BodyHandle, pose: Pose);

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2);

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: f32);

    /// Apply a force at the centre of mass for the next step only
    ///
    /// Has no effect on static bodies.
    fn apply_force(&mut self, body: BodyHandle, force: Vec2);

    fn is_dynamic(&self, body: BodyHandle) -> bool;

    /// Entity stored on the body, if any
    fn entity_of(&self, body: BodyHandle) -> Option<EntityId>;

    /// Body pairs whose shapes are touching after the last step
    ///
    /// Pairs that only overlap in the broad phase are not reported.
    fn touching_pairs(&self) -> Vec<(BodyHandle, BodyHandle)>;
}
