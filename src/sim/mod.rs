//! Physics-driven entities and the simulation that owns them
//!
//! This module must stay free of game-state and platform concerns:
//! - Fixed timestep only
//! - Stable iteration order (entity insertion order)
//! - Physics engine reached only through [`PhysicsWorld`]

pub mod dispatch;
pub mod entity;
pub mod physics;
pub mod rapier;
pub mod simulation;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{CollisionOutcome, Effect, RECENT_COLLISION_TICKS, Side, classify, effect_for};
pub use entity::{Entity, EntityDesc, EntityId, EntityKind};
pub use physics::{BodyDesc, BodyHandle, PhysicsWorld, Pose};
pub use rapier::RapierWorld;
pub use simulation::{CollisionHandler, Contact, Simulation};
