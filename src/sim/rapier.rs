//! rapier2d backend for [`PhysicsWorld`]
//!
//! Bodies carry their owning entity id in rapier's `user_data` slot (0 means
//! no owner). Entity ids start at 1 so the two never collide.

use std::collections::HashMap;

use glam::Vec2;
use rapier2d::prelude::*;

use super::entity::EntityId;
use super::physics::{BodyDesc, BodyHandle, PhysicsWorld, Pose};

/// A rapier2d simulation with the game's body conventions
pub struct RapierWorld {
    pipeline: PhysicsPipeline,
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// BodyHandle index -> rapier handle
    bodies: Vec<RigidBodyHandle>,
    /// rapier handle -> BodyHandle, for contact lookup
    reverse: HashMap<RigidBodyHandle, BodyHandle>,
}

impl RapierWorld {
    fn body(&self, body: BodyHandle) -> Option<&RigidBody> {
        let handle = self.bodies.get(body.0 as usize)?;
        self.rigid_body_set.get(*handle)
    }

    fn body_mut(&mut self, body: BodyHandle) -> Option<&mut RigidBody> {
        let handle = self.bodies.get(body.0 as usize)?;
        self.rigid_body_set.get_mut(*handle)
    }

    /// Map a collider to the game handle of its parent body
    fn collider_body(&self, collider: ColliderHandle) -> Option<BodyHandle> {
        let parent = self.collider_set.get(collider)?.parent()?;
        self.reverse.get(&parent).copied()
    }
}

impl PhysicsWorld for RapierWorld {
    fn new(gravity: Vec2) -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            gravity: vector![gravity.x, gravity.y],
            integration_params: IntegrationParameters::default(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            bodies: Vec::new(),
            reverse: HashMap::new(),
        }
    }

    fn create_body(&mut self, desc: &BodyDesc) -> BodyHandle {
        let builder = if desc.dynamic {
            RigidBodyBuilder::dynamic()
        } else {
            RigidBodyBuilder::fixed()
        };
        let rb = builder
            .translation(vector![desc.position.x, desc.position.y])
            .can_sleep(desc.can_sleep)
            .user_data(desc.entity.map_or(0, |id| u128::from(id.0)))
            .build();
        let rapier_handle = self.rigid_body_set.insert(rb);

        let collider = ColliderBuilder::cuboid(desc.half_extents.x, desc.half_extents.y)
            .density(desc.density)
            .build();
        self.collider_set
            .insert_with_parent(collider, rapier_handle, &mut self.rigid_body_set);

        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(rapier_handle);
        self.reverse.insert(rapier_handle, handle);
        handle
    }

    fn step(&mut self, dt: f32) {
        self.integration_params.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None, // query pipeline (unused)
            &(),  // physics hooks
            &(),  // event handler
        );
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        let rb = self.body(body)?;
        let t = rb.translation();
        Some(Pose {
            position: Vec2::new(t.x, t.y),
            angle: rb.rotation().angle(),
        })
    }

    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec2> {
        let v = self.body(body)?.linvel();
        Some(Vec2::new(v.x, v.y))
    }

    fn set_pose(&mut self, body: BodyHandle, pose: Pose) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_position(
                Isometry::new(vector![pose.position.x, pose.position.y], pose.angle),
                true,
            );
        }
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: f32) {
        if let Some(rb) = self.body_mut(body) {
            rb.set_angvel(velocity, true);
        }
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec2) {
        // rapier keeps user forces until reset; a one-step force is the
        // impulse force * dt
        let dt = self.integration_params.dt;
        if let Some(rb) = self.body_mut(body) {
            if rb.is_dynamic() {
                rb.apply_impulse(vector![force.x * dt, force.y * dt], true);
            }
        }
    }

    fn is_dynamic(&self, body: BodyHandle) -> bool {
        self.body(body).is_some_and(|rb| rb.is_dynamic())
    }

    fn entity_of(&self, body: BodyHandle) -> Option<EntityId> {
        let raw = self.body(body)?.user_data;
        if raw == 0 {
            return None;
        }
        u32::try_from(raw).ok().map(EntityId)
    }

    fn touching_pairs(&self) -> Vec<(BodyHandle, BodyHandle)> {
        self.narrow_phase
            .contact_pairs()
            .filter(|pair| pair.has_any_active_contact)
            .filter_map(|pair| {
                let a = self.collider_body(pair.collider1)?;
                let b = self.collider_body(pair.collider2)?;
                Some((a, b))
            })
            .collect()
    }
}
