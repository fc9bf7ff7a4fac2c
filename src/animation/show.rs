use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Animation;
use crate::{Color, Layout, Pad, ShowError};

const STARTUP_SHOW: &str = include_str!("../../shows/startup.toml");

fn default_interval_ms() -> u64 {
    // one sixteenth note at 120 BPM
    125
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    On,
    Off,
}

impl Default for NoteKind {
    fn default() -> Self {
        Self::On
    }
}

/// A note message played by a light show. Notes use the device's base-10 pad numbering, the
/// velocity of a note-on is the palette code of the color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NoteEvent {
    #[serde(default)]
    pub kind: NoteKind,
    pub note: u8,
    #[serde(default)]
    pub velocity: u8,
}

impl NoteEvent {
    pub fn on(note: u8, velocity: u8) -> Self {
        Self {
            kind: NoteKind::On,
            note,
            velocity,
        }
    }

    pub fn off(note: u8) -> Self {
        Self {
            kind: NoteKind::Off,
            note,
            velocity: 0,
        }
    }

    pub fn pad(&self) -> Pad {
        Pad::from_note(self.note)
    }

    /// The color this event paints, or None if the velocity isn't a palette code
    pub fn color(&self) -> Option<Color> {
        match self.kind {
            NoteKind::On => Color::from_code(self.velocity),
            NoteKind::Off => Some(Color::Black),
        }
    }
}

/// The events played at one clock pulse
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub pulse: u32,
    #[serde(default)]
    pub events: Vec<NoteEvent>,
}

#[derive(Deserialize)]
struct ShowFile {
    name: String,
    #[serde(default = "default_interval_ms")]
    interval_ms: u64,
    #[serde(default, rename = "cue")]
    cues: Vec<Cue>,
}

/// A named table of cues, keyed by clock pulse.
///
/// Shows are usually loaded from TOML:
/// ```
/// # use moundboard::{LightShow, NoteEvent};
/// let show = LightShow::from_toml_str(r#"
///     name = "blink"
///
///     [[cue]]
///     pulse = 0
///     events = [{ note = 11, velocity = 5 }]
///
///     [[cue]]
///     pulse = 4
///     events = [{ kind = "off", note = 11 }]
/// "#)?;
///
/// assert_eq!(show.cue_at(0), &[NoteEvent::on(11, 5)]);
/// assert!(show.cue_at(2).is_empty());
/// assert_eq!(show.last_pulse(), Some(4));
/// # Ok::<(), moundboard::ShowError>(())
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LightShow {
    name: String,
    interval: Duration,
    cues: Vec<Cue>,
}

impl LightShow {
    /// Name of the built-in show played when an input device connects
    pub const STARTUP: &'static str = "startup";

    /// Create a show from cues in any order. Cues sharing a pulse are merged, keeping the event
    /// order.
    pub fn new(name: impl Into<String>, mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|cue| cue.pulse);

        let mut merged: Vec<Cue> = Vec::with_capacity(cues.len());
        for cue in cues {
            match merged.last_mut() {
                Some(last) if last.pulse == cue.pulse => last.events.extend(cue.events),
                _ => merged.push(cue),
            }
        }

        Self {
            name: name.into(),
            interval: Duration::from_millis(default_interval_ms()),
            cues: merged,
        }
    }

    /// Time between two pulses when the show is played without a clock
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ShowError> {
        let file: ShowFile = toml::from_str(text)?;
        Ok(Self::new(file.name, file.cues).with_interval(Duration::from_millis(file.interval_ms)))
    }

    /// The show lighting up the pads one after another when a device connects
    pub fn startup() -> Self {
        match Self::from_toml_str(STARTUP_SHOW) {
            Ok(show) => show,
            Err(e) => unreachable!("built-in startup show is malformed: {}", e),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// All cues, ordered by pulse
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// The events to play at `pulse`. Empty if the show has no cue there.
    pub fn cue_at(&self, pulse: u32) -> &[NoteEvent] {
        match self.cues.binary_search_by_key(&pulse, |cue| cue.pulse) {
            Ok(i) => &self.cues[i].events,
            Err(_) => &[],
        }
    }

    pub fn last_pulse(&self) -> Option<u32> {
        self.cues.last().map(|cue| cue.pulse)
    }
}

/// Plays a [`LightShow`], one pulse per frame
#[derive(Debug, Clone)]
pub struct ShowAnimation {
    show: LightShow,
    pulse: u32,
}

impl ShowAnimation {
    pub fn new(show: LightShow) -> Self {
        Self { show, pulse: 0 }
    }

    pub fn show(&self) -> &LightShow {
        &self.show
    }

    /// The pulse whose cue is played next
    pub fn pulse(&self) -> u32 {
        self.pulse
    }
}

impl Animation for ShowAnimation {
    fn delay(&self) -> Duration {
        self.show.interval()
    }

    fn on_start(&mut self, _layout: &Layout) {
        self.pulse = 0;
    }

    fn apply_next_frame(&mut self, layout: &mut Layout) {
        for event in self.show.cue_at(self.pulse) {
            let pad = event.pad();
            if !layout.contains(pad) {
                log::debug!("Show {:?}: note {} is outside the grid", self.show.name(), event.note);
                continue;
            }
            match event.color() {
                Some(color) => {
                    layout.set_color(pad, color);
                }
                None => log::warn!(
                    "Show {:?}: velocity {} is not a palette color",
                    self.show.name(),
                    event.velocity
                ),
            }
        }
        self.pulse += 1;
    }

    fn has_next(&self) -> bool {
        match self.show.last_pulse() {
            Some(last) => self.pulse <= last,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_show_lights_and_clears_the_same_pads() {
        let show = LightShow::startup();
        assert_eq!(show.name(), LightShow::STARTUP);

        let first = show.cue_at(0);
        assert_eq!(first.len(), 26);
        assert!(first.iter().all(|event| *event == NoteEvent::on(event.note, 5)));

        let last = show.cue_at(show.last_pulse().unwrap());
        let lit: Vec<u8> = first.iter().map(|event| event.note).collect();
        let cleared: Vec<u8> = last.iter().map(|event| event.note).collect();
        assert_eq!(lit, cleared);
        assert!(last.iter().all(|event| event.color() == Some(Color::Black)));
    }

    #[test]
    fn cues_are_sorted_and_merged() {
        let show = LightShow::new(
            "test",
            vec![
                Cue {
                    pulse: 8,
                    events: vec![NoteEvent::on(11, 1)],
                },
                Cue {
                    pulse: 0,
                    events: vec![NoteEvent::on(12, 2)],
                },
                Cue {
                    pulse: 8,
                    events: vec![NoteEvent::off(11)],
                },
            ],
        );

        assert_eq!(show.cues().len(), 2);
        assert_eq!(show.cue_at(8), &[NoteEvent::on(11, 1), NoteEvent::off(11)]);
        assert_eq!(show.last_pulse(), Some(8));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = LightShow::from_toml_str("name = \"broken\"\n[[cue]]\nevents = []");
        assert!(matches!(result, Err(ShowError::ParseError(_))));

        let result = LightShow::from_toml_str("name = \"x\"\n[[cue]]\npulse = 0\nevents = [{ kind = \"sideways\", note = 1 }]");
        assert!(matches!(result, Err(ShowError::ParseError(_))));
    }

    #[test]
    fn interval_defaults_and_overrides() {
        let show = LightShow::from_toml_str("name = \"x\"").unwrap();
        assert_eq!(show.interval(), Duration::from_millis(125));
        assert_eq!(show.last_pulse(), None);

        let show = LightShow::from_toml_str("name = \"x\"\ninterval_ms = 20").unwrap();
        assert_eq!(show.interval(), Duration::from_millis(20));
    }

    #[test]
    fn animation_paints_notes_per_pulse() {
        let show = LightShow::new(
            "test",
            vec![
                Cue {
                    pulse: 0,
                    events: vec![NoteEvent::on(73, 5), NoteEvent::on(99, 200)],
                },
                Cue {
                    pulse: 2,
                    events: vec![NoteEvent::off(73)],
                },
            ],
        );
        let mut layout = Layout::new("show", 10, 10);
        let mut animation = ShowAnimation::new(show);
        animation.on_start(&layout);

        animation.apply_next_frame(&mut layout);
        assert_eq!(layout[(3, 7)].color(), Color::Red);
        // invalid velocity is skipped
        assert_eq!(layout[(9, 9)].color(), Color::Black);

        animation.apply_next_frame(&mut layout);
        assert_eq!(layout[(3, 7)].color(), Color::Red);
        assert!(animation.has_next());

        animation.apply_next_frame(&mut layout);
        assert_eq!(layout[(3, 7)].color(), Color::Black);
        assert!(!animation.has_next());
    }

    #[test]
    fn notes_outside_the_grid_are_skipped() {
        let show = LightShow::new(
            "test",
            vec![Cue {
                pulse: 0,
                events: vec![NoteEvent::on(88, 5)],
            }],
        );
        let mut layout = Layout::new("small", 4, 4);
        let mut animation = ShowAnimation::new(show);
        animation.on_start(&layout);
        animation.apply_next_frame(&mut layout);

        assert!(layout.buttons().all(|button| button.color() == Color::Black));
    }
}
