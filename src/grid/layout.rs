use super::{Button, ButtonMapping, ButtonMut};
use crate::util::Array2d;
use crate::{Action, Color, Pad, PadUpdate};

/// A named, fixed-size arrangement of buttons covering the whole grid.
///
/// Button writes on an active layout are collected as [`PadUpdate`]s, which the owning
/// [`Grid`](super::Grid) flushes to the device. Inactive layouts only remember the new state.
#[derive(Debug, Clone)]
pub struct Layout {
    name: String,
    columns: u8,
    rows: u8,
    buttons: Array2d<Button>,
    active: bool,
    pending: Vec<PadUpdate>,
}

impl Layout {
    /// Create an inactive layout with all buttons black and without actions
    pub fn new(name: impl Into<String>, columns: u8, rows: u8) -> Self {
        let buttons = Array2d::from_fn(columns as usize, rows as usize, |x, y| {
            Button::new(Pad::new(x as u8, y as u8))
        });

        Self {
            name: name.into(),
            columns,
            rows,
            buttons,
            active: false,
            pending: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn columns(&self) -> u8 {
        self.columns
    }
    pub fn rows(&self) -> u8 {
        self.rows
    }
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn contains(&self, pad: Pad) -> bool {
        pad.x < self.columns && pad.y < self.rows
    }

    /// Returns the button at the given position, or None if out of bounds
    pub fn get(&self, x: u8, y: u8) -> Option<&Button> {
        self.buttons.get(x as usize, y as usize)
    }

    /// Returns the button at the given position. Panics if out of bounds
    pub fn button(&self, x: u8, y: u8) -> &Button {
        &self[(x, y)]
    }

    /// Returns a mutable view on the button at the given position. Panics if out of bounds
    pub fn button_mut(&mut self, x: u8, y: u8) -> ButtonMut<'_> {
        let pad = Pad::new(x, y);
        assert!(self.contains(pad), "Pad {:?} is out of bounds", pad);
        ButtonMut { layout: self, pad }
    }

    /// Returns a mutable view on the button at the given position, or None if out of bounds
    pub fn get_mut(&mut self, x: u8, y: u8) -> Option<ButtonMut<'_>> {
        let pad = Pad::new(x, y);
        if self.contains(pad) {
            Some(ButtonMut { layout: self, pad })
        } else {
            None
        }
    }

    /// Set the color of the button at `pad`, see [`ButtonMut::set_color`]. Panics if out of
    /// bounds.
    pub fn set_color(&mut self, pad: Pad, color: Color) -> bool {
        if !self.button_entry(pad).replace_color(color) {
            return false;
        }
        self.send_update(pad);
        true
    }

    /// Emit an update for the button at `pad`, unless this layout is inactive. Panics if out of
    /// bounds.
    pub fn send_update(&mut self, pad: Pad) {
        let button = &self[pad];
        if !self.active {
            return;
        }

        let update = PadUpdate {
            light_mode: button.light_mode(),
            note_index: pad.note_index(self.rows),
            color: button.color(),
        };
        self.pending.push(update);
    }

    /// Paint every button with the same color, e.g. to clear the layout before an animation
    pub fn set_solid_color(&mut self, color: Color) {
        self.for_all(|mut button| {
            button.set_color(color);
        });
    }

    /// Apply `f` to every button, column by column
    pub fn for_all(&mut self, mut f: impl FnMut(ButtonMut<'_>)) {
        for x in 0..self.columns {
            for y in 0..self.rows {
                f(ButtonMut {
                    layout: &mut *self,
                    pad: Pad::new(x, y),
                });
            }
        }
    }

    /// Bind every pad of `column` to [`Action::Fader`] and clear it
    pub fn make_fader(&mut self, column: u8, color: Color) {
        assert!(column < self.columns, "Column {} is out of bounds", column);
        for y in 0..self.rows {
            self.button_mut(column, y).set_action(Action::Fader(color));
        }
        self.set_fader(column, 0, color);
    }

    /// Light the bottom `level` pads of `column` in `color` and paint the rest black. Levels
    /// above the row count light the whole column.
    ///
    /// # Panics
    ///
    /// If `column` is outside of the layout.
    pub fn set_fader(&mut self, column: u8, level: u8, color: Color) {
        assert!(column < self.columns, "Column {} is out of bounds", column);
        for y in 0..self.rows {
            let color = if y < level { color } else { Color::Black };
            self.set_color(Pad::new(column, y), color);
        }
    }

    /// Number of lit pads in `column`, counted from the bottom up to the first black one
    pub fn fader_level(&self, column: u8) -> u8 {
        (0..self.rows)
            .take_while(|&y| self[(column, y)].color() != Color::Black)
            .count() as u8
    }

    /// Emit an update for every button, regardless of whether it changed. Used to bring the
    /// device in sync after the layout was activated.
    pub fn force_apply(&mut self) {
        self.for_all(|mut button| button.send_update());
    }

    /// Iterate over all buttons, column by column
    pub fn buttons(&self) -> impl Iterator<Item = &Button> + '_ {
        (0..self.columns)
            .flat_map(move |x| (0..self.rows).map(move |y| &self[(x, y)]))
    }

    /// Take the updates emitted since the last call
    pub fn take_updates(&mut self) -> Vec<PadUpdate> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_updates(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Snapshot of the color, action and light mode of every button
    pub fn mapping(&self) -> Vec<ButtonMapping> {
        self.buttons().map(ButtonMapping::from).collect()
    }

    /// Restore a snapshot taken with [`Layout::mapping`]. Entries outside of this layout are
    /// skipped.
    pub fn apply_mapping(&mut self, mapping: &[ButtonMapping]) {
        for entry in mapping {
            if !self.contains(entry.pad) {
                log::debug!("Skipping mapping for {:?} outside of {}", entry.pad, self.name);
                continue;
            }

            let mut button = self.button_mut(entry.pad.x, entry.pad.y);
            button.set_action(entry.action);
            button.set_light_mode(entry.light_mode);
            button.set_color(entry.color);
        }
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            // whatever wasn't flushed yet belongs to a frame that is no longer visible
            self.pending.clear();
        }
    }

    pub(super) fn button_entry(&mut self, pad: Pad) -> &mut Button {
        &mut self.buttons[(pad.x as usize, pad.y as usize)]
    }
}

impl std::ops::Index<(u8, u8)> for Layout {
    type Output = Button;

    fn index(&self, (x, y): (u8, u8)) -> &Button {
        &self.buttons[(x as usize, y as usize)]
    }
}

impl std::ops::Index<Pad> for Layout {
    type Output = Button;

    fn index(&self, pad: Pad) -> &Button {
        &self[(pad.x, pad.y)]
    }
}
