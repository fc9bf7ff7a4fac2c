use std::collections::HashMap;

use crate::{
    Color, FrameStatus, Grid, GridError, LayoutId, LightShow, Player, ShowAnimation, ShowError,
};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PlaybackState {
    Idle,
    /// Playing the show with the given name
    Playing(String),
}

/// What a clock pulse did
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PulseOutcome {
    /// No show is playing
    Idle,
    /// The cue for the pulse, if there was one, was played
    Advanced,
    /// The show ran out of cues; the previous layout is current again
    Finished,
    /// Somebody switched away from the show layout
    Cancelled,
}

/// Plays light shows in sync with an external MIDI clock, one cue lookup per pulse.
///
/// Each show gets its own layout, named after the show and created when it is first played.
/// ```
/// # use moundboard::{Grid, GridConfig, PlaybackController, PulseOutcome, LightShow};
/// let mut grid = Grid::new(GridConfig::default())?;
/// let mut playback = PlaybackController::new();
///
/// playback.enter(LightShow::STARTUP, &mut grid)?;
/// assert_eq!(playback.on_pulse(&mut grid), PulseOutcome::Advanced);
/// assert_eq!(playback.pulse(), 1);
/// # Ok::<(), moundboard::ShowError>(())
/// ```
pub struct PlaybackController {
    shows: HashMap<String, LightShow>,
    state: PlaybackState,
    pulse: u32,
    player: Option<Player>,
    resume: Option<LayoutId>,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    /// A controller knowing only the built-in startup show
    pub fn new() -> Self {
        let mut controller = Self::empty();
        controller.register(LightShow::startup());
        controller
    }

    /// A controller without any shows
    pub fn empty() -> Self {
        Self {
            shows: HashMap::new(),
            state: PlaybackState::Idle,
            pulse: 0,
            player: None,
            resume: None,
        }
    }

    /// Make a show available under its name. Returns the show it replaced, if any.
    pub fn register(&mut self, show: LightShow) -> Option<LightShow> {
        self.shows.insert(show.name().to_owned(), show)
    }

    pub fn show(&self, name: &str) -> Option<&LightShow> {
        self.shows.get(name)
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlaybackState::Idle
    }

    /// Number of pulses played since the current show was entered
    pub fn pulse(&self) -> u32 {
        self.pulse
    }

    /// Start playing the named show from its first cue, replacing whatever was playing.
    ///
    /// The show layout is cleared and made current. The layout that was current before is
    /// restored when the show finishes or is stopped.
    pub fn enter(&mut self, name: &str, grid: &mut Grid) -> Result<(), ShowError> {
        let show = match self.shows.get(name) {
            Some(show) => show.clone(),
            None => {
                return Err(ShowError::UnknownShow {
                    name: name.to_owned(),
                })
            }
        };

        let resume = match self.state {
            PlaybackState::Playing(_) => self.resume,
            PlaybackState::Idle => grid.current_layout_id(),
        };

        let layout = match grid.find_layout(name) {
            Some(id) => id,
            None => grid.add_layout(name),
        };
        grid.layout_mut(layout)
            .ok_or(GridError::UnknownLayout(layout))?
            .set_solid_color(Color::Black);
        grid.set_current_layout(layout)?;

        self.player = Some(Player::start_manual(ShowAnimation::new(show), grid, layout)?);
        self.state = PlaybackState::Playing(name.to_owned());
        self.pulse = 0;
        self.resume = resume.filter(|&id| id != layout);

        log::info!("Entering light show {:?}", name);
        Ok(())
    }

    /// Stop the current show and return to the layout that was current before it
    pub fn stop(&mut self, grid: &mut Grid) {
        if self.is_idle() {
            return;
        }
        log::info!("Stopping light show");
        self.finish(grid, true);
    }

    /// Advance the current show by one clock pulse
    pub fn on_pulse(&mut self, grid: &mut Grid) -> PulseOutcome {
        if self.is_idle() {
            return PulseOutcome::Idle;
        }
        let player = match self.player.as_mut() {
            Some(player) => player,
            None => return PulseOutcome::Idle,
        };

        match player.tick(grid) {
            FrameStatus::Applied => {
                self.pulse += 1;
                PulseOutcome::Advanced
            }
            FrameStatus::Finished => {
                log::info!("Light show finished after {} pulses", self.pulse);
                self.finish(grid, true);
                PulseOutcome::Finished
            }
            FrameStatus::Cancelled => {
                self.finish(grid, false);
                PulseOutcome::Cancelled
            }
        }
    }

    fn finish(&mut self, grid: &mut Grid, restore: bool) {
        self.player = None;
        self.state = PlaybackState::Idle;
        self.pulse = 0;

        let resume = self.resume.take();
        if let (true, Some(id)) = (restore, resume) {
            if let Err(e) = grid.set_current_layout(id) {
                log::warn!("Can't return to the previous layout: {}", e);
            }
        }
    }
}
