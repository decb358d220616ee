//! Rendering abstraction
//!
//! Game code submits meshes, text and sprites through [`Renderer`]; the host
//! decides how to rasterise them. [`DrawList`] records submissions and backs
//! both the headless renderer and the tests.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Visual representation of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mesh {
    /// Skull model
    Skull,
    /// Pillow model
    Pillow,
    /// Generated box with the given half extents
    Box { half_extents: Vec3 },
}

/// RGBA colour, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// World transform of a rendered mesh (translation plus rotation about Z)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation_z: f32,
}

impl Transform {
    pub fn from_2d(position: Vec2, angle: f32) -> Self {
        Self {
            translation: position.extend(0.0),
            rotation_z: angle,
        }
    }
}

/// Horizontal text justification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Centre,
}

/// Font sizes the HUD uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Small,
    Large,
}

/// What a sprite shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    /// Studio logo shown by the intro
    Splash,
    /// Flat coloured rectangle
    Solid(Colour),
}

/// A screen-space sprite (centre position and size in pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub position: Vec2,
    pub size: Vec2,
}

/// Host renderer
pub trait Renderer {
    /// Draw a mesh in the 3D pass, optionally overriding its material colour
    fn draw_mesh(&mut self, mesh: &Mesh, transform: &Transform, colour: Option<Colour>);

    /// Draw a line of HUD text in screen space
    fn draw_text(&mut self, text: &str, position: Vec2, align: TextAlign, font: Font);

    /// Draw a HUD sprite in screen space
    fn draw_sprite(&mut self, sprite: &Sprite);
}
