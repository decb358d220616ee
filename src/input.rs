//! Per-frame input snapshot

/// Keyboard state for one frame
///
/// `*_held` is true for every frame the key is down; `*_pressed` only for the
/// frame it went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub left_held: bool,
    pub right_held: bool,
    pub escape_held: bool,

    pub up_pressed: bool,
    pub down_pressed: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
    pub enter_pressed: bool,
    pub escape_pressed: bool,
}

impl FrameInput {
    /// No keys down
    pub fn none() -> Self {
        Self::default()
    }

    /// Enter pressed this frame
    pub fn enter() -> Self {
        Self {
            enter_pressed: true,
            ..Self::default()
        }
    }

    /// Escape pressed (and held) this frame
    pub fn escape() -> Self {
        Self {
            escape_pressed: true,
            escape_held: true,
            ..Self::default()
        }
    }

    pub fn up() -> Self {
        Self {
            up_pressed: true,
            ..Self::default()
        }
    }

    pub fn down() -> Self {
        Self {
            down_pressed: true,
            ..Self::default()
        }
    }

    /// Left pressed and held
    pub fn left() -> Self {
        Self {
            left_pressed: true,
            left_held: true,
            ..Self::default()
        }
    }

    /// Right pressed and held
    pub fn right() -> Self {
        Self {
            right_pressed: true,
            right_held: true,
            ..Self::default()
        }
    }

    /// Horizontal steering from held keys: -1, 0 or 1 (left wins ties)
    pub fn steer(&self) -> i8 {
        if self.left_held {
            -1
        } else if self.right_held {
            1
        } else {
            0
        }
    }
}
