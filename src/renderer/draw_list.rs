//! Recorded draw submissions

use glam::Vec2;

use super::{Colour, Font, Mesh, Renderer, Sprite, TextAlign, Transform};

/// One recorded submission
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Mesh {
        mesh: Mesh,
        transform: Transform,
        colour: Option<Colour>,
    },
    Text {
        text: String,
        position: Vec2,
        align: TextAlign,
        font: Font,
    },
    Sprite(Sprite),
}

/// A renderer that only records what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn mesh_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Mesh { .. }))
            .count()
    }

    /// All recorded text lines, in submission order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(sprite) => Some(sprite),
            _ => None,
        })
    }
}

impl Renderer for DrawList {
    fn draw_mesh(&mut self, mesh: &Mesh, transform: &Transform, colour: Option<Colour>) {
        self.commands.push(DrawCommand::Mesh {
            mesh: mesh.clone(),
            transform: *transform,
            colour,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, align: TextAlign, font: Font) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            align,
            font,
        });
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.commands.push(DrawCommand::Sprite(*sprite));
    }
}
