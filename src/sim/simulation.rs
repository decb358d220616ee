//! The simulation: one physics world plus the entities living in it
//!
//! Each tick:
//! 1. The world advances by one fixed step.
//! 2. Every registered entity copies its body pose and bumps its cooldown.
//! 3. If a [`CollisionHandler`] was given, it sees every touching pair whose
//!    bodies resolve to registered entities.
//!
//! Operations on a simulation without a world (before `initialize` or after
//! `clean`) do nothing.

use std::collections::HashMap;

use glam::Vec2;

use super::dispatch::Side;
use super::entity::{Entity, EntityDesc, EntityId};
use super::physics::{BodyDesc, BodyHandle, PhysicsWorld, Pose};
use crate::consts::{BODY_DENSITY, SIM_DT};
use crate::renderer::{Colour, Renderer};

/// A touching pair resolved to its two entities
pub struct Contact<'a, W: PhysicsWorld> {
    world: &'a mut W,
    a: &'a mut Entity,
    b: &'a mut Entity,
}

impl<W: PhysicsWorld> Contact<'_, W> {
    pub fn entity(&self, side: Side) -> &Entity {
        match side {
            Side::A => &*self.a,
            Side::B => &*self.b,
        }
    }

    /// Mutable access to both entities at once
    pub fn entities_mut(&mut self) -> (&mut Entity, &mut Entity) {
        (&mut *self.a, &mut *self.b)
    }

    /// Apply a one-step force to one side's body
    pub fn apply_force(&mut self, side: Side, force: Vec2) {
        let body = self.entity(side).body();
        self.world.apply_force(body, force);
    }
}

/// Game rules run for each touching pair during [`Simulation::update_with`]
pub trait CollisionHandler<W: PhysicsWorld> {
    fn on_collide(&mut self, contact: &mut Contact<'_, W>);
}

impl<W, F> CollisionHandler<W> for F
where
    W: PhysicsWorld,
    F: FnMut(&mut Contact<'_, W>),
{
    fn on_collide(&mut self, contact: &mut Contact<'_, W>) {
        self(contact)
    }
}

/// Owner of a physics world and its registered entities
pub struct Simulation<W: PhysicsWorld> {
    world: Option<W>,
    /// Registered entities in insertion order
    entities: Vec<Entity>,
    /// EntityId -> slot in `entities`
    index: HashMap<EntityId, usize>,
    next_id: u32,
    gravity: Vec2,
}

impl<W: PhysicsWorld> Default for Simulation<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: PhysicsWorld> Simulation<W> {
    /// An empty simulation with no world
    pub fn new() -> Self {
        Self {
            world: None,
            entities: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
            gravity: Vec2::ZERO,
        }
    }

    /// Create a fresh world with downward gravity `gravity_y`
    ///
    /// Any previous world is replaced; call [`Simulation::clean`] first.
    /// Entity ids restart at 1, so an [`Entity`] from `create_entity` that
    /// was never registered must not outlive the old world: its id may be
    /// handed out again.
    pub fn initialize(&mut self, gravity_y: f32) {
        self.gravity = Vec2::new(0.0, gravity_y);
        self.world = Some(W::new(self.gravity));
        self.entities.clear();
        self.index.clear();
        self.next_id = 1;
        log::debug!("Simulation initialized (gravity {})", gravity_y);
    }

    pub fn is_initialized(&self) -> bool {
        self.world.is_some()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Create an entity and its body without registering it
    pub fn create_entity(&mut self, desc: &EntityDesc) -> Option<Entity> {
        let world = self.world.as_mut()?;

        let id = EntityId(self.next_id);
        self.next_id += 1;

        let body = world.create_body(&BodyDesc {
            position: desc.position,
            half_extents: desc.size / 2.0,
            dynamic: desc.dynamic,
            density: BODY_DENSITY,
            can_sleep: false,
            entity: Some(id),
        });

        let mut entity = Entity::new(id, desc.kind, body, desc.resolved_mesh());
        if let Some(pose) = world.pose(body) {
            entity.update_from_simulation(pose);
        }
        Some(entity)
    }

    /// Register an entity; it is refreshed, dispatched and rendered from now on
    pub fn add_entity(&mut self, entity: Entity) -> Option<EntityId> {
        if self.world.is_none() {
            log::warn!("Entity {:?} added without a world; ignored", entity.id());
            return None;
        }
        let id = entity.id();
        if self.index.contains_key(&id) {
            return Some(id);
        }
        self.index.insert(id, self.entities.len());
        self.entities.push(entity);
        Some(id)
    }

    /// Create and register an entity
    pub fn spawn(&mut self, desc: &EntityDesc) -> Option<EntityId> {
        let entity = self.create_entity(desc)?;
        self.add_entity(entity)
    }

    /// Step and refresh without collision dispatch
    pub fn update(&mut self) {
        self.advance(None);
    }

    /// Step, refresh, then hand every touching pair to `handler`
    pub fn update_with(&mut self, handler: &mut dyn CollisionHandler<W>) {
        self.advance(Some(handler));
    }

    fn advance(&mut self, handler: Option<&mut dyn CollisionHandler<W>>) {
        let Self {
            world,
            entities,
            index,
            ..
        } = self;
        let Some(world) = world.as_mut() else {
            return;
        };

        world.step(SIM_DT);

        for entity in entities.iter_mut() {
            if let Some(pose) = world.pose(entity.body()) {
                entity.update_from_simulation(pose);
            }
            entity.tick_cooldown();
        }

        let Some(handler) = handler else {
            return;
        };

        for (body_a, body_b) in world.touching_pairs() {
            let slot_a = resolve(world, index, body_a);
            let slot_b = resolve(world, index, body_b);
            let (Some(slot_a), Some(slot_b)) = (slot_a, slot_b) else {
                log::trace!("Skipping contact {:?}/{:?}: no entity", body_a, body_b);
                continue;
            };
            if slot_a == slot_b {
                continue;
            }

            let (a, b) = pair_mut(entities, slot_a, slot_b);
            handler.on_collide(&mut Contact {
                world: &mut *world,
                a,
                b,
            });
        }
    }

    /// Submit every visible entity to the renderer, in insertion order
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for entity in &self.entities {
            if !entity.is_visible() {
                continue;
            }
            if let Some(mesh) = entity.mesh() {
                renderer.draw_mesh(mesh, entity.transform(), entity.colour());
            }
        }
    }

    /// Destroy the world and every entity
    pub fn clean(&mut self) {
        self.world = None;
        for entity in &mut self.entities {
            entity.clean();
        }
        log::debug!("Simulation cleaned ({} entities)", self.entities.len());
        self.entities.clear();
        self.index.clear();
    }

    /// Snapshot of the registered entities
    pub fn entities(&self) -> Vec<Entity> {
        self.entities.clone()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    fn body_of(&self, id: EntityId) -> Option<BodyHandle> {
        self.entity(id).map(Entity::body)
    }

    /// Live body position (not the last refreshed transform)
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        let body = self.body_of(id)?;
        self.world.as_ref()?.pose(body).map(|p| p.position)
    }

    pub fn velocity(&self, id: EntityId) -> Option<Vec2> {
        let body = self.body_of(id)?;
        self.world.as_ref()?.linear_velocity(body)
    }

    pub fn is_dynamic(&self, id: EntityId) -> bool {
        match (self.body_of(id), self.world.as_ref()) {
            (Some(body), Some(world)) => world.is_dynamic(body),
            _ => false,
        }
    }

    /// Teleport an entity's body; rotation is reset
    pub fn set_position(&mut self, id: EntityId, position: Vec2) {
        if let (Some(body), Some(world)) = (self.body_of(id), self.world.as_mut()) {
            world.set_pose(
                body,
                Pose {
                    position,
                    angle: 0.0,
                },
            );
        }
    }

    pub fn set_velocity(&mut self, id: EntityId, velocity: Vec2) {
        if let (Some(body), Some(world)) = (self.body_of(id), self.world.as_mut()) {
            world.set_linear_velocity(body, velocity);
        }
    }

    pub fn set_angular_velocity(&mut self, id: EntityId, velocity: f32) {
        if let (Some(body), Some(world)) = (self.body_of(id), self.world.as_mut()) {
            world.set_angular_velocity(body, velocity);
        }
    }

    /// Move an entity's body by `delta`
    pub fn move_by(&mut self, id: EntityId, delta: Vec2) {
        if let Some(position) = self.position(id) {
            self.set_position(id, position + delta);
        }
    }

    pub fn apply_force(&mut self, id: EntityId, force: Vec2) {
        if let (Some(body), Some(world)) = (self.body_of(id), self.world.as_mut()) {
            world.apply_force(body, force);
        }
    }

    pub fn set_visible(&mut self, id: EntityId, visible: bool) {
        if let Some(&slot) = self.index.get(&id) {
            self.entities[slot].set_visible(visible);
        }
    }

    pub fn set_colour(&mut self, id: EntityId, colour: Colour) {
        if let Some(&slot) = self.index.get(&id) {
            self.entities[slot].set_colour(colour);
        }
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> Option<&W> {
        self.world.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> Option<&mut W> {
        self.world.as_mut()
    }
}

/// Slot of the registered entity owning `body`
fn resolve<W: PhysicsWorld>(
    world: &W,
    index: &HashMap<EntityId, usize>,
    body: BodyHandle,
) -> Option<usize> {
    let id = world.entity_of(body)?;
    index.get(&id).copied()
}

/// Two distinct mutable elements of a slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawList, Mesh};
    use crate::sim::entity::EntityKind;
    use crate::sim::testing::ScriptedWorld;
    use proptest::prelude::*;

    fn skull_at(x: f32, y: f32) -> EntityDesc {
        EntityDesc::new(Vec2::new(x, y), Vec2::new(0.4, 0.5), true, EntityKind::Enemy)
            .with_mesh(Mesh::Skull)
    }

    fn wall_at(x: f32, kind: EntityKind) -> EntityDesc {
        EntityDesc::new(Vec2::new(x, 0.0), Vec2::new(1.0, 200.0), false, kind)
    }

    #[test]
    fn test_operations_without_world_are_noops() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        assert!(sim.create_entity(&skull_at(0.0, 5.0)).is_none());
        assert!(sim.spawn(&skull_at(0.0, 5.0)).is_none());
        sim.update();
        let mut calls = 0;
        sim.update_with(&mut |_: &mut Contact<'_, ScriptedWorld>| calls += 1);
        assert_eq!(calls, 0);
        sim.set_position(EntityId(1), Vec2::ZERO);
        assert!(sim.position(EntityId(1)).is_none());
        assert!(sim.entities().is_empty());
    }

    #[test]
    fn test_create_entity_builds_matching_body() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-3.0);

        let skull = sim.create_entity(&skull_at(1.0, 5.0)).unwrap();
        assert_eq!(skull.position(), Vec2::new(1.0, 5.0));
        assert_eq!(skull.cooldown(), 0);

        let world = sim.world().unwrap();
        assert_eq!(world.gravity, Vec2::new(0.0, -3.0));
        let body = &world.bodies[skull.body().0 as usize];
        assert!(body.dynamic);
        assert!(!body.can_sleep);
        assert_eq!(body.density, 1.0);
        assert_eq!(body.half_extents, Vec2::new(0.2, 0.25));
        assert_eq!(body.entity, Some(skull.id()));
    }

    #[test]
    fn test_create_does_not_register() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-1.0);

        let entity = sim.create_entity(&skull_at(0.0, 5.0)).unwrap();
        assert_eq!(sim.entity_count(), 0);

        let id = sim.add_entity(entity).unwrap();
        assert_eq!(sim.entity_count(), 1);
        assert_eq!(sim.entity(id).unwrap().kind(), EntityKind::Enemy);
    }

    #[test]
    fn test_initialize_restarts_ids() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-1.0);
        let stale = sim.create_entity(&skull_at(0.0, 5.0)).unwrap();

        sim.clean();
        sim.initialize(-1.0);
        let fresh = sim.spawn(&skull_at(0.0, 5.0)).unwrap();

        assert_eq!(stale.id(), EntityId(1));
        assert_eq!(fresh, stale.id());
    }

    #[test]
    fn test_update_refreshes_transforms() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-3.0);
        let id = sim.spawn(&skull_at(0.0, 5.0)).unwrap();

        sim.update();

        let entity = sim.entity(id).unwrap();
        let live = sim.position(id).unwrap();
        assert!(live.y < 5.0);
        assert_eq!(entity.position(), live);
    }

    #[test]
    fn test_touching_pairs_dispatched_once_each() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(0.0);
        let a = sim.spawn(&skull_at(0.0, 0.0)).unwrap();
        let b = sim.spawn(&skull_at(0.3, 0.0)).unwrap();
        let c = sim.spawn(&skull_at(5.0, 0.0)).unwrap();
        let (ba, bb, bc) = (
            sim.entity(a).unwrap().body(),
            sim.entity(b).unwrap().body(),
            sim.entity(c).unwrap().body(),
        );
        let world = sim.world_mut().unwrap();
        world.script_contact(ba, bb, true);
        world.script_contact(bb, bc, false);

        let mut seen = Vec::new();
        sim.update_with(&mut |contact: &mut Contact<'_, ScriptedWorld>| {
            seen.push((contact.entity(Side::A).id(), contact.entity(Side::B).id()));
        });

        assert_eq!(seen, vec![(a, b)]);
    }

    #[test]
    fn test_unresolved_bodies_are_skipped() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(0.0);
        let skull = sim.spawn(&skull_at(0.0, 0.0)).unwrap();
        let unregistered = sim.create_entity(&skull_at(0.1, 0.0)).unwrap();
        let skull_body = sim.entity(skull).unwrap().body();

        let world = sim.world_mut().unwrap();
        let foreign = world.add_foreign_body(Vec2::new(0.2, 0.0));
        world.script_contact(skull_body, foreign, true);
        world.script_contact(skull_body, unregistered.body(), true);

        let mut calls = 0;
        sim.update_with(&mut |_: &mut Contact<'_, ScriptedWorld>| calls += 1);
        assert_eq!(calls, 0);
        assert_eq!(sim.entity(skull).unwrap().cooldown(), 1);
    }

    #[test]
    fn test_render_skips_invisible_and_is_idempotent() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-1.0);
        let wall = sim.spawn(&wall_at(-7.6, EntityKind::LeftWall)).unwrap();
        let skull = sim.spawn(&skull_at(0.0, 5.0)).unwrap();
        sim.set_visible(wall, false);
        sim.set_colour(skull, Colour::rgb(200, 10, 10));

        let mut first = DrawList::new();
        let mut second = DrawList::new();
        sim.render(&mut first);
        sim.render(&mut second);

        assert_eq!(first.mesh_count(), 1);
        assert_eq!(first.commands, second.commands);
        match &first.commands[0] {
            crate::renderer::DrawCommand::Mesh { mesh, colour, .. } => {
                assert_eq!(*mesh, Mesh::Skull);
                assert_eq!(*colour, Some(Colour::rgb(200, 10, 10)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_render_order_is_insertion_order() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-1.0);
        let first = sim.create_entity(&skull_at(1.0, 1.0)).unwrap();
        let second = sim.create_entity(&skull_at(2.0, 2.0)).unwrap();
        sim.add_entity(second);
        sim.add_entity(first);

        let mut list = DrawList::new();
        sim.render(&mut list);
        let xs: Vec<f32> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                crate::renderer::DrawCommand::Mesh { transform, .. } => {
                    Some(transform.translation.x)
                }
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![2.0, 1.0]);
    }

    #[test]
    fn test_clean_empties_registry() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-3.0);
        sim.spawn(&skull_at(0.0, 5.0));
        sim.spawn(&wall_at(7.6, EntityKind::RightWall));

        sim.clean();

        assert!(sim.entities().is_empty());
        assert!(!sim.is_initialized());
        let mut list = DrawList::new();
        sim.render(&mut list);
        assert!(list.commands.is_empty());
    }

    #[test]
    fn test_body_accessors() {
        let mut sim: Simulation<ScriptedWorld> = Simulation::new();
        sim.initialize(-3.0);
        let skull = sim.spawn(&skull_at(0.0, 5.0)).unwrap();
        let wall = sim.spawn(&wall_at(-7.6, EntityKind::LeftWall)).unwrap();

        assert!(sim.is_dynamic(skull));
        assert!(!sim.is_dynamic(wall));

        sim.set_velocity(skull, Vec2::new(1.0, 2.0));
        assert_eq!(sim.velocity(skull), Some(Vec2::new(1.0, 2.0)));

        sim.move_by(skull, Vec2::new(0.25, 0.0));
        assert_eq!(sim.position(skull), Some(Vec2::new(0.25, 5.0)));

        sim.set_angular_velocity(skull, 4.0);
        sim.apply_force(skull, Vec2::new(0.0, 70.0));
        let world = sim.world().unwrap();
        let body = sim.entity(skull).unwrap().body();
        assert_eq!(world.bodies[body.0 as usize].angular_velocity, 4.0);
        assert_eq!(world.forces(body), &[Vec2::new(0.0, 70.0)]);
    }

    proptest! {
        #[test]
        fn prop_cooldown_counts_ticks(ticks in 0u32..200) {
            let mut sim: Simulation<ScriptedWorld> = Simulation::new();
            sim.initialize(-3.0);
            let skull = sim.spawn(&skull_at(0.0, 5.0)).unwrap();
            let wall = sim.spawn(&wall_at(7.6, EntityKind::RightWall)).unwrap();

            for _ in 0..ticks {
                sim.update_with(&mut |_: &mut Contact<'_, ScriptedWorld>| {});
            }

            prop_assert_eq!(sim.entity(skull).unwrap().cooldown(), ticks);
            prop_assert_eq!(sim.entity(wall).unwrap().cooldown(), ticks);
        }
    }
}
