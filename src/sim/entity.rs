//! Game entities: a mesh, a physics body and a type tag

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::physics::{BodyHandle, Pose};
use crate::consts::BOX_MESH_HALF_DEPTH;
use crate::renderer::{Colour, Mesh, Transform};

/// Stable entity identifier (never reused within a simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What an entity is, for collision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    LeftWall,
    RightWall,
}

/// Creation parameters for an entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDesc {
    /// Centre of the body
    pub position: Vec2,
    /// Full width and height of the body
    pub size: Vec2,
    pub dynamic: bool,
    pub kind: EntityKind,
    /// Visual; a box matching `size` when absent
    pub mesh: Option<Mesh>,
}

impl EntityDesc {
    pub fn new(position: Vec2, size: Vec2, dynamic: bool, kind: EntityKind) -> Self {
        Self {
            position,
            size,
            dynamic,
            kind,
            mesh: None,
        }
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// The mesh to use, generating a box when none was given
    pub(crate) fn resolved_mesh(&self) -> Mesh {
        self.mesh.clone().unwrap_or(Mesh::Box {
            half_extents: Vec3::new(self.size.x / 2.0, self.size.y / 2.0, BOX_MESH_HALF_DEPTH),
        })
    }
}

/// A game object pairing a mesh with a physics body
///
/// The body belongs to the simulation's world; the entity only keeps its
/// handle. The render transform is a copy of the body pose taken once per
/// tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    body: BodyHandle,
    mesh: Option<Mesh>,
    transform: Transform,
    /// Ticks since this entity last took part in a dispatched collision
    collide_cooldown: u32,
    visible: bool,
    colour: Option<Colour>,
}

impl Entity {
    pub(crate) fn new(id: EntityId, kind: EntityKind, body: BodyHandle, mesh: Mesh) -> Self {
        Self {
            id,
            kind,
            body,
            mesh: Some(mesh),
            transform: Transform::default(),
            collide_cooldown: 0,
            visible: true,
            colour: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Position as of the last refresh
    pub fn position(&self) -> Vec2 {
        self.transform.translation.truncate()
    }

    pub fn cooldown(&self) -> u32 {
        self.collide_cooldown
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn colour(&self) -> Option<Colour> {
        self.colour
    }

    /// Copy the body pose into the render transform
    pub fn update_from_simulation(&mut self, pose: Pose) {
        self.transform = Transform::from_2d(pose.position, pose.angle);
    }

    /// Called once per simulation tick
    pub(crate) fn tick_cooldown(&mut self) {
        self.collide_cooldown = self.collide_cooldown.saturating_add(1);
    }

    /// Called when a collision involving this entity is dispatched
    pub fn reset_cooldown(&mut self) {
        self.collide_cooldown = 0;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Override the mesh material colour
    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = Some(colour);
    }

    /// Release visual resources
    pub fn clean(&mut self) {
        self.mesh = None;
    }

    #[cfg(test)]
    pub(crate) fn set_cooldown(&mut self, ticks: u32) {
        self.collide_cooldown = ticks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_simulation_copies_pose() {
        let mut e = Entity::new(EntityId(1), EntityKind::Enemy, BodyHandle(0), Mesh::Skull);
        e.update_from_simulation(Pose {
            position: Vec2::new(-2.0, 7.5),
            angle: 0.3,
        });
        assert_eq!(e.position(), Vec2::new(-2.0, 7.5));
        assert_eq!(e.transform().rotation_z, 0.3);
        assert_eq!(e.transform().translation.z, 0.0);
    }

    #[test]
    fn test_cooldown_ticks_and_resets() {
        let mut e = Entity::new(EntityId(1), EntityKind::Player, BodyHandle(0), Mesh::Pillow);
        e.tick_cooldown();
        e.tick_cooldown();
        assert_eq!(e.cooldown(), 2);
        e.reset_cooldown();
        assert_eq!(e.cooldown(), 0);

        e.set_cooldown(u32::MAX);
        e.tick_cooldown();
        assert_eq!(e.cooldown(), u32::MAX);
    }

    #[test]
    fn test_default_mesh_is_box_of_size() {
        let desc = EntityDesc::new(Vec2::ZERO, Vec2::new(1.0, 200.0), false, EntityKind::LeftWall);
        assert_eq!(
            desc.resolved_mesh(),
            Mesh::Box {
                half_extents: Vec3::new(0.5, 100.0, 0.25)
            }
        );
        let desc = desc.with_mesh(Mesh::Skull);
        assert_eq!(desc.resolved_mesh(), Mesh::Skull);
    }

    #[test]
    fn test_clean_releases_mesh() {
        let mut e = Entity::new(EntityId(3), EntityKind::Enemy, BodyHandle(2), Mesh::Skull);
        assert!(e.is_visible());
        e.clean();
        assert!(e.mesh().is_none());
    }
}
