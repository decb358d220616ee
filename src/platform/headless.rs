//! Headless back-ends: draw and play nothing, log what would have happened

use glam::Vec2;

use crate::audio::{AudioBackend, AudioCommand};
use crate::renderer::{Colour, DrawList, Font, Mesh, Renderer, Sprite, TextAlign, Transform};

/// Records one frame at a time and logs a summary of it
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frame: DrawList,
    frames: u64,
    /// HUD text of the last finished frame
    last_texts: Vec<String>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    pub fn end_frame(&mut self) {
        self.frames += 1;
        let texts: Vec<String> = self.frame.texts().map(str::to_string).collect();
        if texts != self.last_texts {
            log::debug!("HUD: {}", texts.join(" | "));
        }
        log::trace!(
            "Frame {}: {} meshes, {} draw calls",
            self.frames,
            self.frame.mesh_count(),
            self.frame.commands.len()
        );
        self.last_texts = texts;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_texts(&self) -> &[String] {
        &self.last_texts
    }
}

impl Renderer for HeadlessRenderer {
    fn draw_mesh(&mut self, mesh: &Mesh, transform: &Transform, colour: Option<Colour>) {
        self.frame.draw_mesh(mesh, transform, colour);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, align: TextAlign, font: Font) {
        self.frame.draw_text(text, position, align, font);
    }

    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.frame.draw_sprite(sprite);
    }
}

/// Audio output that logs every command
#[derive(Debug, Default)]
pub struct LogAudio {
    samples_played: u64,
    music: bool,
    volume: u8,
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            volume: 100,
            ..Self::default()
        }
    }

    pub fn samples_played(&self) -> u64 {
        self.samples_played
    }

    pub fn is_music_playing(&self) -> bool {
        self.music
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }
}

impl AudioBackend for LogAudio {
    fn execute(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Play(effect) => {
                self.samples_played += 1;
                log::debug!("Sample {}", effect.sample_name());
            }
            AudioCommand::StartMusic => {
                self.music = true;
                log::info!("Music started");
            }
            AudioCommand::StopMusic => {
                self.music = false;
                log::info!("Music stopped");
            }
            AudioCommand::SetVolume(volume) => {
                self.volume = volume;
                log::debug!("Volume {}", volume);
            }
        }
    }
}
