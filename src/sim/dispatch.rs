//! Collision classification
//!
//! Decides what a touching pair means for gameplay. The result is pure data;
//! game states turn it into forces, score and sound (see
//! `states::rules::SkullRules`).
//!
//! Debounce is keyed on each entity's time since *any* dispatched collision,
//! not on the pair. An entity touching two things at once can therefore have
//! the second contact suppressed.

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use crate::consts::WALL_PUSH;

/// Both entities at or under this many ticks since their last collision means
/// the contact was already handled
pub const RECENT_COLLISION_TICKS: u32 = 1;

/// Which entity of a contact an effect targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Gameplay effect of a new collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// A wall shoves a skull back into the arena
    WallPush { enemy: Side, force: Vec2 },
    /// The pillow bounces a skull
    PlayerBounce { enemy: Side },
}

impl Effect {
    /// The side the effect acts on
    pub fn target(&self) -> Side {
        match *self {
            Effect::WallPush { enemy, .. } | Effect::PlayerBounce { enemy } => enemy,
        }
    }
}

/// Result of dispatching one touching pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// Both entities collided within the last tick or so
    Debounced,
    /// Two entities of the same kind; nothing to do
    SameKind,
    /// A new collision between different kinds, with its effect if any
    Impact(Option<Effect>),
}

/// Classify a touching pair and reset both cooldowns
pub fn classify(a: &mut Entity, b: &mut Entity) -> CollisionOutcome {
    let recent =
        a.cooldown() <= RECENT_COLLISION_TICKS && b.cooldown() <= RECENT_COLLISION_TICKS;

    let outcome = if recent {
        CollisionOutcome::Debounced
    } else if a.kind() == b.kind() {
        CollisionOutcome::SameKind
    } else {
        CollisionOutcome::Impact(effect_for(a.kind(), b.kind()))
    };

    a.reset_cooldown();
    b.reset_cooldown();
    outcome
}

/// Effect of a collision between two kinds, independent of argument order
pub fn effect_for(a: EntityKind, b: EntityKind) -> Option<Effect> {
    use EntityKind::*;

    let push_right = Vec2::new(WALL_PUSH, 0.0);
    let push_left = Vec2::new(-WALL_PUSH, 0.0);

    match (a, b) {
        (LeftWall, Enemy) => Some(Effect::WallPush {
            enemy: Side::B,
            force: push_right,
        }),
        (Enemy, LeftWall) => Some(Effect::WallPush {
            enemy: Side::A,
            force: push_right,
        }),
        (RightWall, Enemy) => Some(Effect::WallPush {
            enemy: Side::B,
            force: push_left,
        }),
        (Enemy, RightWall) => Some(Effect::WallPush {
            enemy: Side::A,
            force: push_left,
        }),
        (Player, Enemy) => Some(Effect::PlayerBounce { enemy: Side::B }),
        (Enemy, Player) => Some(Effect::PlayerBounce { enemy: Side::A }),
        (Enemy, Enemy)
        | (Player, Player | LeftWall | RightWall)
        | (LeftWall | RightWall, Player | LeftWall | RightWall) => None,
    }
}
