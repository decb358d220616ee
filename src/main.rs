//! Skullamanjaro entry point
//!
//! Runs the game headlessly: logging renderer and audio, autopilot input.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use skullamanjaro::consts::SIM_DT;
use skullamanjaro::input::FrameInput;
use skullamanjaro::platform::{Autopilot, HeadlessRenderer, LogAudio};
use skullamanjaro::sim::RapierWorld;
use skullamanjaro::states::StateId;
use skullamanjaro::{Difficulty, Game, GameContext, Settings};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartState {
    Intro,
    Menu,
    Play,
    Help,
}

impl From<StartState> for StateId {
    fn from(start: StartState) -> Self {
        match start {
            StartState::Intro => StateId::Intro,
            StartState::Menu => StateId::Menu,
            StartState::Play => StateId::Play,
            StartState::Help => StateId::Help,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "skullamanjaro", about = "Bounce the skulls before time runs out")]
struct Cli {
    /// Number of frames to run
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// State to start in
    #[arg(long, value_enum, default_value_t = StartState::Intro)]
    start: StartState,

    /// Override the saved difficulty (peon, hero, legend)
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Settings file
    #[arg(long, default_value = Settings::FILE_NAME)]
    settings: PathBuf,

    /// Feed no input instead of playing automatically
    #[arg(long)]
    no_autopilot: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{}'", s))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = Settings::load_from(&cli.settings);
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!(
        "Skullamanjaro starting (seed {}, difficulty {}, volume {})",
        seed,
        settings.difficulty.as_str(),
        settings.volume
    );

    let mut game: Game<RapierWorld> = Game::new(GameContext::new(settings, seed), cli.start.into());
    let mut renderer = HeadlessRenderer::new();
    let mut audio = LogAudio::new();
    let mut autopilot = Autopilot::new();

    while game.is_running() && game.frame() < cli.frames {
        let input = if cli.no_autopilot {
            FrameInput::none()
        } else {
            autopilot.next_input(&game.snapshot())
        };
        game.update(&input, SIM_DT);

        renderer.begin_frame();
        game.render(&mut renderer);
        renderer.end_frame();

        game.context_mut().audio.drain_into(&mut audio);
    }

    let snapshot = game.snapshot();
    match serde_json::to_string(&snapshot) {
        Ok(json) => log::info!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialise final state: {}", e),
    }
    log::info!(
        "Ran {} frames, {} samples played",
        renderer.frames(),
        audio.samples_played()
    );

    game.shutdown();
    game.context_mut().audio.drain_into(&mut audio);

    if let Err(e) = game.context().settings.save_to(&cli.settings) {
        log::error!("Failed to save settings to {}: {}", cli.settings.display(), e);
    }
}
