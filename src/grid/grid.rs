use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use super::{Action, GridConfig, Layout};
use crate::{GridError, OutputHandle, Pad, PadUpdate};

/// Identifies a layout registered on a [`Grid`]. Ids are registry positions and stay valid for
/// the lifetime of the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct LayoutId(usize);

impl LayoutId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A grid shared between the event handling thread and animation workers
pub type SharedGrid = Arc<Mutex<Grid>>;

/// The device model. Owns the layouts and decides which one is rendered.
#[derive(Debug)]
pub struct Grid {
    config: GridConfig,
    layouts: Vec<Layout>,
    current: Option<LayoutId>,
    output: Option<OutputHandle>,
}

impl Grid {
    /// Create a grid without layouts and without output. Fails if a pad of the configured
    /// geometry can't be addressed with a single note byte.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        if !config.is_valid() {
            return Err(GridError::InvalidGeometry {
                columns: config.columns,
                rows: config.rows,
            });
        }

        Ok(Self {
            config,
            layouts: Vec::new(),
            current: None,
            output: None,
        })
    }

    pub fn into_shared(self) -> SharedGrid {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
    pub fn columns(&self) -> u8 {
        self.config.columns
    }
    pub fn rows(&self) -> u8 {
        self.config.rows
    }

    /// The output that [`Grid::flush`] writes to. Without output, flushed updates are dropped.
    pub fn output(&self) -> Option<&OutputHandle> {
        self.output.as_ref()
    }

    pub fn set_output(&mut self, output: Option<OutputHandle>) {
        self.output = output;
    }

    /// Register a new, inactive layout spanning the whole grid
    pub fn add_layout(&mut self, name: impl Into<String>) -> LayoutId {
        let layout = Layout::new(name, self.config.columns, self.config.rows);
        self.layouts.push(layout);
        LayoutId(self.layouts.len() - 1)
    }

    pub fn layout(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.get(id.0)
    }

    pub fn layout_mut(&mut self, id: LayoutId) -> Option<&mut Layout> {
        self.layouts.get_mut(id.0)
    }

    /// Find the first layout with the given name
    pub fn find_layout(&self, name: &str) -> Option<LayoutId> {
        self.layouts
            .iter()
            .position(|layout| layout.name() == name)
            .map(LayoutId)
    }

    pub fn layout_ids(&self) -> impl Iterator<Item = LayoutId> {
        (0..self.layouts.len()).map(LayoutId)
    }

    pub fn current_layout_id(&self) -> Option<LayoutId> {
        self.current
    }

    pub fn current_layout(&self) -> Option<&Layout> {
        self.current.and_then(move |id| self.layout(id))
    }

    pub fn current_layout_mut(&mut self) -> Option<&mut Layout> {
        let id = self.current?;
        self.layout_mut(id)
    }

    /// Make `id` the current layout.
    ///
    /// Does nothing if it already is. Otherwise the previous layout is deactivated first, then
    /// the new one is activated and every one of its buttons is re-sent. This is the only way
    /// writes made to a layout while it was inactive reach the device.
    ///
    /// An unknown id is rejected and leaves the current layout untouched.
    pub fn set_current_layout(&mut self, id: LayoutId) -> Result<(), GridError> {
        if id.0 >= self.layouts.len() {
            return Err(GridError::UnknownLayout(id));
        }
        if self.current == Some(id) {
            return Ok(());
        }

        if let Some(previous) = self.current_layout_mut() {
            previous.set_active(false);
        }
        self.current = Some(id);

        let layout = &mut self.layouts[id.0];
        log::info!("Switching to layout {:?}", layout.name());
        layout.set_active(true);
        layout.force_apply();

        Ok(())
    }

    /// [`Grid::set_current_layout`] by registry position
    pub fn set_current_layout_at(&mut self, index: usize) -> Result<(), GridError> {
        self.set_current_layout(LayoutId(index))
    }

    /// Take the updates the current layout emitted since the last call. Together with
    /// [`Grid::output`], this lets a caller that holds the grid behind a lock send the updates
    /// after releasing it.
    pub fn take_updates(&mut self) -> Vec<PadUpdate> {
        match self.current_layout_mut() {
            Some(layout) => layout.take_updates(),
            None => Vec::new(),
        }
    }

    /// Send the pending updates of the current layout to the output. Returns the number of
    /// updates that were sent.
    pub fn flush(&mut self) -> usize {
        let updates = self.take_updates();
        if updates.is_empty() {
            return 0;
        }

        match &self.output {
            Some(output) => output.send_updates(&updates),
            None => {
                log::debug!("No output connected, dropping {} pad updates", updates.len());
                0
            }
        }
    }

    /// Run the action bound to the pressed pad in the current layout. Returns the action, or
    /// `None` if there is no current layout or the pad is outside of it.
    pub fn dispatch_press(&mut self, pad: Pad) -> Option<Action> {
        let layout = match self.current_layout_mut() {
            Some(layout) => layout,
            None => {
                log::debug!("Ignoring press on {:?}, no current layout", pad);
                return None;
            }
        };
        let action = match layout.get(pad.x, pad.y) {
            Some(button) => button.action(),
            None => {
                log::debug!("Ignoring press on {:?} outside of the grid", pad);
                return None;
            }
        };

        match action {
            Action::None => {}
            Action::NextColor => {
                let next = layout[pad].color().next();
                layout.set_color(pad, next);
            }
            Action::SetColor(color) => {
                layout.set_color(pad, color);
            }
            Action::Fader(color) => {
                let level = if layout.fader_level(pad.x) == pad.y + 1 {
                    pad.y
                } else {
                    pad.y + 1
                };
                layout.set_fader(pad.x, level, color);
            }
            Action::SwitchLayout(id) => {
                if let Err(e) = self.set_current_layout(id) {
                    log::warn!("Press on {:?} can't switch layouts: {}", pad, e);
                }
            }
        }

        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, MockOutput};

    fn grid_with_output() -> (Grid, MockOutput) {
        let output = MockOutput::new();
        let mut grid = Grid::new(GridConfig::default()).unwrap();
        grid.set_output(Some(OutputHandle::new(output.clone())));
        (grid, output)
    }

    #[test]
    fn rejects_oversized_geometry() {
        let config = GridConfig {
            columns: 16,
            rows: 16,
            ..Default::default()
        };
        assert_eq!(
            Grid::new(config).unwrap_err(),
            GridError::InvalidGeometry {
                columns: 16,
                rows: 16
            }
        );
    }

    #[test]
    fn buffered_writes_are_flushed_on_activation() {
        let (mut grid, output) = grid_with_output();
        let first = grid.add_layout("first");
        let second = grid.add_layout("second");
        grid.set_current_layout(first).unwrap();
        grid.flush();
        output.clear();

        let layout = grid.layout_mut(second).unwrap();
        layout.set_color(Pad::new(3, 7), Color::Orange);
        layout.set_color(Pad::new(0, 0), Color::Cyan);
        assert_eq!(grid.flush(), 0);
        assert!(output.messages().is_empty());

        grid.set_current_layout(second).unwrap();
        assert!(!grid.layout(first).unwrap().is_active());
        assert!(grid.layout(second).unwrap().is_active());

        let updates = grid.take_updates();
        assert_eq!(updates.len(), 100);
        let orange = updates
            .iter()
            .find(|update| update.note_index == 73)
            .unwrap();
        assert_eq!(orange.color, Color::Orange);
        assert_eq!(updates.iter().filter(|u| u.color != Color::Black).count(), 2);
    }

    #[test]
    fn switching_to_the_current_layout_is_a_no_op() {
        let (mut grid, _output) = grid_with_output();
        let id = grid.add_layout("only");
        grid.set_current_layout(id).unwrap();
        grid.take_updates();

        grid.set_current_layout(id).unwrap();
        assert!(grid.take_updates().is_empty());
    }

    #[test]
    fn unknown_layout_is_rejected_without_side_effects() {
        let (mut grid, _output) = grid_with_output();
        let id = grid.add_layout("only");
        grid.set_current_layout(id).unwrap();

        let bogus = LayoutId(5);
        assert_eq!(
            grid.set_current_layout(bogus),
            Err(GridError::UnknownLayout(bogus))
        );
        assert_eq!(grid.current_layout_id(), Some(id));
        assert!(grid.current_layout().unwrap().is_active());
    }

    #[test]
    fn flush_sends_note_on_messages() {
        let (mut grid, output) = grid_with_output();
        let id = grid.add_layout("main");
        grid.set_current_layout_at(id.index()).unwrap();
        grid.flush();
        output.clear();

        grid.current_layout_mut()
            .unwrap()
            .set_color(Pad::new(3, 7), Color::Green);
        assert_eq!(grid.flush(), 1);
        assert_eq!(output.messages(), vec![vec![0x90, 73, 21]]);
    }

    #[test]
    fn flush_without_output_drops_updates() {
        let mut grid = Grid::new(GridConfig::default()).unwrap();
        let id = grid.add_layout("main");
        grid.set_current_layout(id).unwrap();
        assert_eq!(grid.flush(), 0);
        assert!(grid.take_updates().is_empty());
    }

    #[test]
    fn press_dispatch() {
        let (mut grid, _output) = grid_with_output();
        let main = grid.add_layout("main");
        let other = grid.add_layout("other");
        grid.set_current_layout(main).unwrap();

        let layout = grid.layout_mut(main).unwrap();
        layout.button_mut(1, 1).set_action(Action::NextColor);
        layout.button_mut(2, 2).set_action(Action::SetColor(Color::Purple));
        layout.button_mut(9, 9).set_action(Action::SwitchLayout(other));

        assert_eq!(grid.dispatch_press(Pad::new(1, 1)), Some(Action::NextColor));
        assert_eq!(grid.dispatch_press(Pad::new(1, 1)), Some(Action::NextColor));
        assert_eq!(grid.layout(main).unwrap()[(1, 1)].color(), Color::LightGray);

        grid.dispatch_press(Pad::new(2, 2));
        assert_eq!(grid.layout(main).unwrap()[(2, 2)].color(), Color::Purple);

        assert_eq!(grid.dispatch_press(Pad::new(0, 0)), Some(Action::None));
        assert_eq!(grid.dispatch_press(Pad::new(10, 3)), None);

        grid.dispatch_press(Pad::new(9, 9));
        assert_eq!(grid.current_layout_id(), Some(other));
    }

    #[test]
    fn fader_presses() {
        let (mut grid, output) = grid_with_output();
        let faders = grid.add_layout("faders");
        grid.layout_mut(faders).unwrap().make_fader(4, Color::Green);
        grid.set_current_layout(faders).unwrap();
        grid.flush();
        output.clear();

        let press = Pad::new(4, 5);
        assert_eq!(grid.dispatch_press(press), Some(Action::Fader(Color::Green)));
        assert_eq!(grid.current_layout().unwrap().fader_level(4), 6);
        assert_eq!(grid.flush(), 6);

        // the topmost lit pad steps down
        grid.dispatch_press(press);
        assert_eq!(grid.current_layout().unwrap().fader_level(4), 5);
        assert_eq!(grid.flush(), 1);
        assert_eq!(output.messages().last().unwrap(), &vec![0x90, 54, 0]);

        grid.dispatch_press(Pad::new(4, 0));
        assert_eq!(grid.current_layout().unwrap().fader_level(4), 1);
        grid.dispatch_press(Pad::new(4, 0));
        assert_eq!(grid.current_layout().unwrap().fader_level(4), 0);
        assert_eq!(grid.current_layout().unwrap().fader_level(3), 0);
    }

    #[test]
    fn find_layout_by_name() {
        let (mut grid, _output) = grid_with_output();
        grid.add_layout("a");
        let b = grid.add_layout("b");
        assert_eq!(grid.find_layout("b"), Some(b));
        assert_eq!(grid.find_layout("c"), None);
        assert_eq!(grid.layout_ids().count(), 2);
    }
}
