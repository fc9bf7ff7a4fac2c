use serde::{Deserialize, Serialize};

use super::LayoutId;
use crate::Color;

/// What happens when a pad is pressed
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    None,
    /// Advance the pad to the next palette color
    NextColor,
    SetColor(Color),
    /// Treat the pad's column as a level fader lit in the given color. Pressing a pad sets the
    /// level up to and including it; pressing the topmost lit pad again lowers the level by one.
    Fader(Color),
    /// Make another layout the current one
    SwitchLayout(LayoutId),
}

impl Default for Action {
    fn default() -> Self {
        Action::None
    }
}
