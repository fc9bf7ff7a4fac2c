use serde::{Deserialize, Serialize};

use super::{Action, Layout};
use crate::{Color, LightMode, Pad};

/// A single pad of a [`Layout`]. The coordinates are fixed at construction; color, action and
/// light mode can be changed through a [`ButtonMut`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Button {
    pad: Pad,
    color: Color,
    action: Action,
    light_mode: LightMode,
}

impl Button {
    pub(crate) fn new(pad: Pad) -> Self {
        Self {
            pad,
            ..Default::default()
        }
    }

    pub fn pad(&self) -> Pad {
        self.pad
    }
    pub fn x(&self) -> u8 {
        self.pad.x
    }
    pub fn y(&self) -> u8 {
        self.pad.y
    }
    pub fn color(&self) -> Color {
        self.color
    }
    pub fn action(&self) -> Action {
        self.action
    }
    pub fn light_mode(&self) -> LightMode {
        self.light_mode
    }

    pub(super) fn replace_color(&mut self, color: Color) -> bool {
        if self.color == color {
            return false;
        }
        self.color = color;
        true
    }

    pub(super) fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub(super) fn set_light_mode(&mut self, light_mode: LightMode) {
        self.light_mode = light_mode;
    }
}

/// Mutable view on one button of a layout. Obtained via [`Layout::button_mut`] or
/// [`Layout::for_all`].
pub struct ButtonMut<'a> {
    pub(super) layout: &'a mut Layout,
    pub(super) pad: Pad,
}

impl ButtonMut<'_> {
    pub fn button(&self) -> &Button {
        &self.layout[self.pad]
    }

    pub fn pad(&self) -> Pad {
        self.pad
    }

    pub fn color(&self) -> Color {
        self.button().color()
    }

    /// Change the color of this button. Setting the color it already has does nothing;
    /// otherwise an update is emitted, if the layout is active.
    ///
    /// Returns whether the color changed.
    pub fn set_color(&mut self, color: Color) -> bool {
        self.layout.set_color(self.pad, color)
    }

    /// Emit an update with the current color of this button, unless the layout is inactive.
    pub fn send_update(&mut self) {
        self.layout.send_update(self.pad);
    }

    pub fn set_action(&mut self, action: Action) {
        self.layout.button_entry(self.pad).set_action(action);
    }

    /// Change how this button is lit. Takes effect with the next update.
    pub fn set_light_mode(&mut self, light_mode: LightMode) {
        self.layout.button_entry(self.pad).set_light_mode(light_mode);
    }
}

/// The persistable state of one button
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ButtonMapping {
    pub pad: Pad,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub action: Action,
    #[serde(default)]
    pub light_mode: LightMode,
}

impl From<&Button> for ButtonMapping {
    fn from(button: &Button) -> Self {
        Self {
            pad: button.pad,
            color: button.color,
            action: button.action,
            light_mode: button.light_mode,
        }
    }
}
