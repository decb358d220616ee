//! Game driver: owns the shared context and the current state
//!
//! A transition always cleans the old state (dropping its physics world)
//! before the new one is entered.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::audio::AudioManager;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::FrameInput;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{EntityKind, PhysicsWorld};
use crate::states::{
    HelpState, IntroState, MenuAction, MenuState, PlayState, StateId, Transition,
};

/// State shared by every game state
pub struct GameContext {
    pub settings: Settings,
    pub audio: AudioManager,
    /// Spawn positions, spins and impact cues
    pub rng: Pcg32,
    /// Screen size in pixels
    pub viewport: Vec2,
    /// Menu entry highlighted when the menu was last left
    pub menu_selection: usize,
}

impl GameContext {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let audio = AudioManager::new(settings.volume);
        Self {
            settings,
            audio,
            rng: Pcg32::seed_from_u64(seed),
            viewport: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            menu_selection: 0,
        }
    }
}

/// The active state with its data
pub enum Scene<W: PhysicsWorld> {
    Intro(IntroState),
    Menu(MenuState<W>),
    Play(PlayState<W>),
    Help(HelpState<W>),
}

impl<W: PhysicsWorld> Scene<W> {
    fn enter(id: StateId, ctx: &mut GameContext) -> Self {
        match id {
            StateId::Intro => Scene::Intro(IntroState::enter(ctx)),
            StateId::Menu => Scene::Menu(MenuState::enter(ctx)),
            StateId::Play => Scene::Play(PlayState::enter(ctx)),
            StateId::Help => Scene::Help(HelpState::enter(ctx)),
        }
    }

    pub fn id(&self) -> StateId {
        match self {
            Scene::Intro(_) => StateId::Intro,
            Scene::Menu(_) => StateId::Menu,
            Scene::Play(_) => StateId::Play,
            Scene::Help(_) => StateId::Help,
        }
    }

    fn clean(&mut self) {
        match self {
            Scene::Intro(_) => {}
            Scene::Menu(menu) => menu.clean(),
            Scene::Play(play) => play.clean(),
            Scene::Help(help) => help.clean(),
        }
    }
}

/// Read-only view of the current state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub state: StateId,
    pub score: Option<i32>,
    pub game_over: bool,
    pub remaining_time: Option<f32>,
    pub player_x: Option<f32>,
    /// Positions of every skull
    pub skulls: Vec<Vec2>,
    #[serde(skip)]
    pub menu_selection: Option<MenuAction>,
}

pub struct Game<W: PhysicsWorld> {
    ctx: GameContext,
    scene: Scene<W>,
    running: bool,
    /// Frames updated since start
    frame: u64,
}

impl<W: PhysicsWorld> Game<W> {
    pub fn new(mut ctx: GameContext, start: StateId) -> Self {
        log::info!("Entering {}", start.as_str());
        let scene = Scene::enter(start, &mut ctx);
        Self {
            ctx,
            scene,
            running: true,
            frame: 0,
        }
    }

    /// Update the current state and apply any transition it asks for
    pub fn update(&mut self, input: &FrameInput, frame_time: f32) {
        if !self.running {
            return;
        }
        self.frame += 1;

        let ctx = &mut self.ctx;
        let transition = match &mut self.scene {
            Scene::Intro(intro) => intro.update(input, frame_time),
            Scene::Menu(menu) => menu.update(ctx, input),
            Scene::Play(play) => play.update(ctx, input, frame_time),
            Scene::Help(help) => help.update(ctx, input),
        };

        match transition {
            Some(Transition::Change(next)) => self.change_state(next),
            Some(Transition::Quit) => {
                log::info!("Quit requested");
                self.running = false;
            }
            None => {}
        }
    }

    fn change_state(&mut self, next: StateId) {
        log::info!("{} -> {}", self.scene.id().as_str(), next.as_str());
        self.scene.clean();
        self.scene = Scene::enter(next, &mut self.ctx);
    }

    /// 3D pass then HUD pass
    pub fn render(&self, renderer: &mut dyn Renderer) {
        match &self.scene {
            Scene::Intro(_) => {}
            Scene::Menu(menu) => menu.render(renderer),
            Scene::Play(play) => play.render(renderer),
            Scene::Help(help) => help.render(renderer),
        }

        match &self.scene {
            Scene::Intro(intro) => intro.render_hud(renderer),
            Scene::Menu(menu) => menu.render_hud(renderer),
            Scene::Play(play) => play.render_hud(renderer),
            Scene::Help(help) => help.render_hud(renderer),
        }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let mut snapshot = SceneSnapshot {
            state: self.scene.id(),
            score: None,
            game_over: false,
            remaining_time: None,
            player_x: None,
            skulls: Vec::new(),
            menu_selection: None,
        };

        let sim = match &self.scene {
            Scene::Intro(_) => return snapshot,
            Scene::Menu(menu) => {
                snapshot.menu_selection = Some(menu.selected());
                menu.simulation()
            }
            Scene::Play(play) => {
                snapshot.score = Some(play.score());
                snapshot.game_over = play.is_game_over();
                snapshot.remaining_time = Some(play.remaining_time());
                snapshot.player_x = play
                    .pillow()
                    .and_then(|p| play.simulation().position(p.id()))
                    .map(|p| p.x);
                play.simulation()
            }
            Scene::Help(help) => {
                snapshot.score = Some(help.score());
                snapshot.player_x = help
                    .pillow()
                    .and_then(|p| help.simulation().position(p.id()))
                    .map(|p| p.x);
                help.simulation()
            }
        };

        snapshot.skulls = sim
            .entities()
            .iter()
            .filter(|e| e.kind() == EntityKind::Enemy)
            .filter_map(|e| sim.position(e.id()))
            .collect();
        snapshot
    }

    pub fn state(&self) -> StateId {
        self.scene.id()
    }

    pub fn scene(&self) -> &Scene<W> {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }

    /// Clean the current state and stop the music
    pub fn shutdown(&mut self) {
        self.scene.clean();
        self.ctx.audio.stop_music();
        self.running = false;
        log::info!("Shut down after {} frames", self.frame);
    }
}
