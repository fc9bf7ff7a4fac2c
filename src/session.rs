use crate::launchpad::Message;
use crate::{Grid, LightShow, MidiError, OutputHandle, PlaybackController, ShowError};

/// Ties a grid, its playback controller and the device connection together.
///
/// Feed it every decoded input message; it dispatches presses to the current layout, drives
/// the light shows from the MIDI clock and flushes the resulting pad updates.
/// ```
/// # use moundboard::{Grid, GridConfig, MockOutput, OutputHandle, PlaybackController, Session};
/// # use moundboard::launchpad::Message;
/// let output = MockOutput::new();
/// let mut session = Session::new(Grid::new(GridConfig::default())?, PlaybackController::new());
/// session.connect_output(OutputHandle::new(output.clone()))?;
/// session.on_input_connected()?;
///
/// // the first clock pulse draws the first frame of the startup show
/// let sent = session.handle_message(&Message::ClockPulse);
/// assert_eq!(sent, 26);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Session {
    grid: Grid,
    playback: PlaybackController,
    clock_start_show: Option<String>,
}

impl Session {
    pub fn new(grid: Grid, playback: PlaybackController) -> Self {
        Self {
            grid,
            playback,
            clock_start_show: None,
        }
    }

    /// Enter the named show whenever the clock source sends Start. Off by default, so a
    /// sequencer starting its transport doesn't take over the current layout.
    pub fn with_clock_start_show(mut self, show: Option<&str>) -> Self {
        self.clock_start_show = show.map(str::to_owned);
        self
    }

    pub fn clock_start_show(&self) -> Option<&str> {
        self.clock_start_show.as_deref()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackController {
        &mut self.playback
    }

    /// Hand the session an output. The device is switched into programmer mode first, then the
    /// current layout is sent in full.
    pub fn connect_output(&mut self, output: OutputHandle) -> Result<(), MidiError> {
        let revision = self.grid.config().revision;
        output.send(&revision.handshake_bytes())?;
        log::info!("Sent {:?} handshake", revision);

        self.grid.set_output(Some(output));
        if let Some(layout) = self.grid.current_layout_mut() {
            layout.force_apply();
        }
        self.grid.flush();
        Ok(())
    }

    pub fn disconnect_output(&mut self) {
        self.grid.set_output(None);
    }

    /// Greet a newly connected controller with the startup show
    pub fn on_input_connected(&mut self) -> Result<(), ShowError> {
        self.play(LightShow::STARTUP)?;
        Ok(())
    }

    /// Enter the named show and send the cleared show layout. Returns the number of pad updates
    /// sent.
    pub fn play(&mut self, name: &str) -> Result<usize, ShowError> {
        self.playback.enter(name, &mut self.grid)?;
        Ok(self.grid.flush())
    }

    /// React to one input message. Returns the number of pad updates sent.
    pub fn handle_message(&mut self, message: &Message) -> usize {
        match *message {
            Message::Press { pad, .. } => {
                self.grid.dispatch_press(pad);
            }
            Message::ClockPulse => {
                self.playback.on_pulse(&mut self.grid);
            }
            Message::Start => match &self.clock_start_show {
                Some(show) => {
                    if let Err(e) = self.playback.enter(show, &mut self.grid) {
                        log::warn!("Can't start show on clock start: {}", e);
                    }
                }
                None => log::debug!("Ignoring clock start"),
            },
            Message::Stop => self.playback.stop(&mut self.grid),
            Message::Release { .. } | Message::Continue | Message::Unknown => {}
        }

        self.grid.flush()
    }

    pub fn into_parts(self) -> (Grid, PlaybackController) {
        (self.grid, self.playback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Color, GridConfig, MockOutput, Pad};

    fn session() -> (Session, MockOutput) {
        let output = MockOutput::new();
        let mut session = Session::new(
            Grid::new(GridConfig::default()).unwrap(),
            PlaybackController::new(),
        );
        session.connect_output(OutputHandle::new(output.clone())).unwrap();
        (session, output)
    }

    #[test]
    fn handshake_is_sent_first() {
        let (_session, output) = session();
        assert_eq!(
            output.messages(),
            vec![vec![0xF0, 0x00, 0x20, 0x29, 0x02, 0x0E, 0x0E, 0x01, 0xF7]]
        );
    }

    #[test]
    fn presses_run_button_actions() {
        let (mut session, output) = session();
        let grid = session.grid_mut();
        let main = grid.add_layout("main");
        grid.set_current_layout(main).unwrap();
        grid.layout_mut(main)
            .unwrap()
            .button_mut(3, 7)
            .set_action(Action::NextColor);
        session.grid_mut().take_updates();
        output.clear();

        let sent = session.handle_message(&Message::Press {
            pad: Pad::new(3, 7),
            velocity: 127,
        });
        assert_eq!(sent, 1);
        assert_eq!(output.messages(), vec![vec![0x90, 73, Color::DarkGray.code()]]);

        assert_eq!(session.handle_message(&Message::Release { pad: Pad::new(3, 7) }), 0);
    }

    #[test]
    fn clock_start_is_ignored_by_default() {
        let (mut session, output) = session();
        let main = session.grid_mut().add_layout("main");
        session.grid_mut().set_current_layout(main).unwrap();
        session.grid_mut().take_updates();
        output.clear();

        assert_eq!(session.handle_message(&Message::Start), 0);
        assert!(session.playback().is_idle());
        assert_eq!(session.grid().current_layout_id(), Some(main));
        assert!(output.messages().is_empty());
    }

    #[test]
    fn clock_start_and_stop() {
        let (session, output) = session();
        let mut session = session.with_clock_start_show(Some(LightShow::STARTUP));
        let main = session.grid_mut().add_layout("main");
        session.grid_mut().set_current_layout(main).unwrap();
        session.grid_mut().take_updates();

        // clearing the fresh show layout sends the full grid
        assert_eq!(session.handle_message(&Message::Start), 100);
        output.clear();

        assert_eq!(session.handle_message(&Message::ClockPulse), 26);
        assert_eq!(session.handle_message(&Message::ClockPulse), 0);
        assert_eq!(session.playback().pulse(), 2);

        session.handle_message(&Message::Stop);
        assert!(session.playback().is_idle());
        assert_eq!(session.grid().current_layout_id(), Some(main));
    }

    #[test]
    fn unknown_show_keeps_the_layout() {
        let (mut session, _output) = session();
        let main = session.grid_mut().add_layout("main");
        session.grid_mut().set_current_layout(main).unwrap();

        assert!(matches!(
            session.play("encore"),
            Err(ShowError::UnknownShow { .. })
        ));
        assert_eq!(session.grid().current_layout_id(), Some(main));
    }

    #[test]
    fn unplugged_output_does_not_stop_the_show() {
        let (mut session, output) = session();
        session.on_input_connected().unwrap();
        output.disconnect();

        assert_eq!(session.handle_message(&Message::ClockPulse), 0);
        assert_eq!(session.playback().pulse(), 1);
    }
}
