//! Demo mode - the autopilot plays the game
//!
//! Starts a round from the menu, chases the lowest skull with the pillow and
//! returns to the menu once the round is over.

use crate::game::SceneSnapshot;
use crate::input::FrameInput;
use crate::states::{MenuAction, StateId};

/// Closest the pillow gets before it stops chasing
const DEAD_ZONE: f32 = 0.3;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Input sent last frame, so presses are released in between
    last: FrameInput,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next frame given the current state
    pub fn next_input(&mut self, snapshot: &SceneSnapshot) -> FrameInput {
        let wanted = match snapshot.state {
            StateId::Intro => FrameInput::none(),
            StateId::Menu => match snapshot.menu_selection {
                Some(MenuAction::Start) => FrameInput::enter(),
                Some(_) => FrameInput::up(),
                None => FrameInput::none(),
            },
            StateId::Play if snapshot.game_over => FrameInput::escape(),
            StateId::Play | StateId::Help => Self::chase(snapshot),
        };

        // A key has to come up before it can be pressed again
        let input = if Self::is_press(&wanted) && Self::is_press(&self.last) {
            FrameInput::none()
        } else {
            wanted
        };
        self.last = input;
        input
    }

    fn is_press(input: &FrameInput) -> bool {
        input.up_pressed || input.down_pressed || input.enter_pressed || input.escape_pressed
    }

    /// Steer under the lowest skull
    fn chase(snapshot: &SceneSnapshot) -> FrameInput {
        let Some(player_x) = snapshot.player_x else {
            return FrameInput::none();
        };
        let target = snapshot
            .skulls
            .iter()
            .min_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
        let Some(target) = target else {
            return FrameInput::none();
        };

        let dx = target.x - player_x;
        if dx < -DEAD_ZONE {
            FrameInput {
                left_held: true,
                ..FrameInput::default()
            }
        } else if dx > DEAD_ZONE {
            FrameInput {
                right_held: true,
                ..FrameInput::default()
            }
        } else {
            FrameInput::none()
        }
    }
}
