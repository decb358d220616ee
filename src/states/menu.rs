//! Main menu with skulls falling in the background

use glam::Vec2;

use super::rules::{fallen_enemies, menu_spawn, menu_spin, respawn};
use super::{StateId, Transition};
use crate::audio::SoundEffect;
use crate::consts::{CALM_GRAVITY, MENU_SKULL_BASE_Y, MENU_SKULL_GAP_Y, MENU_SKULLS, SKULL_SIZE};
use crate::game::GameContext;
use crate::input::FrameInput;
use crate::renderer::{Colour, Font, Mesh, Renderer, Sprite, SpriteKind, TextAlign};
use crate::sim::{EntityDesc, EntityKind, PhysicsWorld, Simulation};

/// Selection bar size in pixels
const SELECTION_SIZE: Vec2 = Vec2::new(250.0, 30.0);
const SELECTION_COLOUR: Colour = Colour::rgb(100, 0, 0);

/// What a menu entry does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    HowToPlay,
    Difficulty,
    Volume,
    Quit,
}

/// Key that activated an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuKey {
    Enter,
    Left,
    Right,
}

/// One line of the menu
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuOption {
    pub action: MenuAction,
    /// Screen y of the label
    pub y: f32,
}

impl MenuOption {
    pub fn label(&self, ctx: &GameContext) -> String {
        match self.action {
            MenuAction::Start => "Start".to_string(),
            MenuAction::HowToPlay => "How To Play".to_string(),
            MenuAction::Difficulty => format!("Difficulty: {}", ctx.settings.difficulty.as_str()),
            MenuAction::Volume => format!("Volume: {}", ctx.settings.volume),
            MenuAction::Quit => "Quit".to_string(),
        }
    }
}

pub struct MenuState<W: PhysicsWorld> {
    sim: Simulation<W>,
    options: Vec<MenuOption>,
    selection: usize,
    labels: Vec<String>,
    centre: Vec2,
    title_y: f32,
}

impl<W: PhysicsWorld> MenuState<W> {
    pub fn enter(ctx: &mut GameContext) -> Self {
        let centre = ctx.viewport / 2.0;
        let options: Vec<MenuOption> = [
            MenuAction::Start,
            MenuAction::HowToPlay,
            MenuAction::Difficulty,
            MenuAction::Volume,
            MenuAction::Quit,
        ]
        .into_iter()
        .enumerate()
        .map(|(i, action)| MenuOption {
            action,
            y: centre.y - 50.0 + 50.0 * i as f32,
        })
        .collect();

        let mut sim = Simulation::new();
        sim.initialize(CALM_GRAVITY);
        for i in 0..MENU_SKULLS {
            let y = MENU_SKULL_BASE_Y + MENU_SKULL_GAP_Y * i as f32;
            let desc = EntityDesc::new(
                menu_spawn(&mut ctx.rng, y),
                SKULL_SIZE,
                true,
                EntityKind::Enemy,
            )
            .with_mesh(Mesh::Skull);
            if let Some(id) = sim.spawn(&desc) {
                sim.set_angular_velocity(id, menu_spin(&mut ctx.rng));
            }
        }

        let selection = ctx.menu_selection.min(options.len() - 1);
        let labels = options.iter().map(|o| o.label(ctx)).collect();
        Self {
            sim,
            options,
            selection,
            labels,
            centre,
            title_y: centre.y - 200.0,
        }
    }

    pub fn update(&mut self, ctx: &mut GameContext, input: &FrameInput) -> Option<Transition> {
        let mut transition = None;
        if input.down_pressed {
            if self.selection < self.options.len() - 1 {
                self.selection += 1;
            }
            ctx.audio.play(SoundEffect::Menu0);
        } else if input.up_pressed {
            self.selection = self.selection.saturating_sub(1);
            ctx.audio.play(SoundEffect::Menu0);
        } else if input.enter_pressed {
            transition = self.activate(ctx, MenuKey::Enter);
        } else if input.left_pressed {
            transition = self.activate(ctx, MenuKey::Left);
        } else if input.right_pressed {
            transition = self.activate(ctx, MenuKey::Right);
        }
        ctx.menu_selection = self.selection;
        self.labels = self.options.iter().map(|o| o.label(ctx)).collect();

        self.sim.update();
        for id in fallen_enemies(&self.sim) {
            let at = menu_spawn(&mut ctx.rng, MENU_SKULL_BASE_Y);
            respawn(&mut self.sim, id, at);
        }

        transition
    }

    fn activate(&mut self, ctx: &mut GameContext, key: MenuKey) -> Option<Transition> {
        let action = self.options[self.selection].action;
        match (action, key) {
            (MenuAction::Start, MenuKey::Enter) => {
                ctx.audio.play(SoundEffect::Menu2);
                log::info!("Starting game ({})", ctx.settings.difficulty.as_str());
                Some(Transition::Change(StateId::Play))
            }
            (MenuAction::HowToPlay, MenuKey::Enter) => Some(Transition::Change(StateId::Help)),
            (MenuAction::Difficulty, MenuKey::Enter | MenuKey::Right) => {
                ctx.settings.difficulty = ctx.settings.difficulty.next();
                ctx.audio.play(SoundEffect::Menu1);
                None
            }
            (MenuAction::Difficulty, MenuKey::Left) => {
                ctx.settings.difficulty = ctx.settings.difficulty.prev();
                ctx.audio.play(SoundEffect::Menu1);
                None
            }
            (MenuAction::Volume, MenuKey::Enter | MenuKey::Right) => {
                let volume = ctx.settings.volume;
                ctx.settings.volume = if volume >= 100 { 0 } else { volume + 1 };
                ctx.audio.set_master_volume(i32::from(ctx.settings.volume));
                ctx.audio.play(SoundEffect::Menu1);
                None
            }
            (MenuAction::Volume, MenuKey::Left) => {
                let volume = ctx.settings.volume;
                ctx.settings.volume = if volume == 0 { 100 } else { volume - 1 };
                ctx.audio.set_master_volume(i32::from(ctx.settings.volume));
                ctx.audio.play(SoundEffect::Menu1);
                None
            }
            (MenuAction::Quit, MenuKey::Enter) => Some(Transition::Quit),
            _ => None,
        }
    }

    pub fn selected(&self) -> MenuAction {
        self.options[self.selection].action
    }

    /// Labels as of the last update
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn simulation(&self) -> &Simulation<W> {
        &self.sim
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        self.sim.render(renderer);
    }

    pub fn render_hud(&self, renderer: &mut dyn Renderer) {
        renderer.draw_text(
            "SKULLAMANJARO",
            Vec2::new(self.centre.x, self.title_y),
            TextAlign::Centre,
            Font::Large,
        );

        let selected = &self.options[self.selection];
        renderer.draw_sprite(&Sprite {
            kind: SpriteKind::Solid(SELECTION_COLOUR),
            position: Vec2::new(self.centre.x, selected.y + 15.0),
            size: SELECTION_SIZE,
        });

        for (option, label) in self.options.iter().zip(&self.labels) {
            renderer.draw_text(
                label,
                Vec2::new(self.centre.x, option.y),
                TextAlign::Centre,
                Font::Small,
            );
        }
    }

    pub fn clean(&mut self) {
        self.sim.clean();
    }
}
