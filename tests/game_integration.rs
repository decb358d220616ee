//! Full game runs with the rapier world and the headless back-ends.

use skullamanjaro::consts::{FALL_THRESHOLD, SIM_DT};
use skullamanjaro::input::FrameInput;
use skullamanjaro::platform::{Autopilot, HeadlessRenderer, LogAudio};
use skullamanjaro::sim::RapierWorld;
use skullamanjaro::states::StateId;
use skullamanjaro::{Difficulty, Game, GameContext, SceneSnapshot, Settings};

fn new_game(seed: u64, start: StateId, difficulty: Difficulty) -> Game<RapierWorld> {
    let settings = Settings {
        difficulty,
        ..Settings::default()
    };
    Game::new(GameContext::new(settings, seed), start)
}

/// Run `frames` autopilot frames, checking every snapshot
fn run(game: &mut Game<RapierWorld>, frames: u32, mut check: impl FnMut(&SceneSnapshot)) {
    let mut autopilot = Autopilot::new();
    let mut renderer = HeadlessRenderer::new();
    let mut audio = LogAudio::new();
    for _ in 0..frames {
        let input = autopilot.next_input(&game.snapshot());
        game.update(&input, SIM_DT);
        renderer.begin_frame();
        game.render(&mut renderer);
        renderer.end_frame();
        game.context_mut().audio.drain_into(&mut audio);
        check(&game.snapshot());
    }
}

#[test]
fn test_skulls_never_stay_below_the_screen() {
    let mut game = new_game(9, StateId::Play, Difficulty::Legend);
    run(&mut game, 600, |snapshot| {
        if snapshot.state == StateId::Play {
            for skull in &snapshot.skulls {
                assert!(skull.y >= FALL_THRESHOLD, "skull left at {:?}", skull);
            }
        }
    });
}

#[test]
fn test_full_round_then_back_to_menu() {
    let mut game = new_game(3, StateId::Intro, Difficulty::Hero);
    let mut seen = Vec::new();
    let mut saw_game_over = false;

    // Intro (90 frames) + one 50 s round (3000 frames) + a little slack
    run(&mut game, 3300, |snapshot| {
        if seen.last() != Some(&snapshot.state) {
            seen.push(snapshot.state);
        }
        saw_game_over |= snapshot.game_over;
    });

    assert!(game.is_running());
    assert!(saw_game_over);
    assert_eq!(
        &seen[..4],
        &[StateId::Intro, StateId::Menu, StateId::Play, StateId::Menu]
    );
}

#[test]
fn test_help_mode_keeps_one_skull() {
    let mut game = new_game(5, StateId::Help, Difficulty::Peon);
    run(&mut game, 600, |snapshot| {
        assert_eq!(snapshot.state, StateId::Help);
        assert_eq!(snapshot.skulls.len(), 1);
    });
}

#[test]
fn test_same_seed_same_game() {
    let mut a = new_game(77, StateId::Play, Difficulty::Hero);
    let mut b = new_game(77, StateId::Play, Difficulty::Hero);
    run(&mut a, 300, |_| {});
    run(&mut b, 300, |_| {});
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_shutdown_tears_down() {
    let mut game = new_game(1, StateId::Play, Difficulty::Peon);
    game.update(&FrameInput::none(), SIM_DT);
    game.shutdown();
    assert!(!game.is_running());
    assert!(game.snapshot().skulls.is_empty());
    assert!(!game.context().audio.is_music_playing());
}
