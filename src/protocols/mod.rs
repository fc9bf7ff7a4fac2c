//! Wire-level building blocks shared by the device adapter and the grid model

mod sysex;
pub use sysex::*;

use serde::{Deserialize, Serialize};

use crate::Color;

/// Status byte of a note-on message on channel 1
pub const NOTE_ON: u8 = 0x90;
/// Status byte of a note-off message on channel 1
pub const NOTE_OFF: u8 = 0x80;
/// System real-time timing clock, sent 24 times per quarter note
pub const TIMING_CLOCK: u8 = 0xF8;
pub const START: u8 = 0xFA;
pub const CONTINUE: u8 = 0xFB;
pub const STOP: u8 = 0xFC;

/// The device can light a pad in different ways. The light mode is sent as the MIDI channel of
/// the note-on message that sets the pad color.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum LightMode {
    /// This is the standard mode. A straight consistent light
    Plain,
    /// A flashing motion On->Off->On->Off->...
    Flash,
    /// A smooth pulse
    Pulse,
}

impl Default for LightMode {
    fn default() -> Self {
        LightMode::Plain
    }
}

impl LightMode {
    /// The effect byte, i.e. the MIDI channel the color update is sent on
    pub fn effect_byte(self) -> u8 {
        match self {
            LightMode::Plain => 0,
            LightMode::Flash => 1,
            LightMode::Pulse => 2,
        }
    }
}

/// A single "set pad color" event, as emitted by a button of the active layout
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct PadUpdate {
    pub light_mode: LightMode,
    /// Linear note index, see [`crate::Pad::note_index`]
    pub note_index: u8,
    pub color: Color,
}

impl PadUpdate {
    /// Encode as a three byte note-on message
    pub fn to_bytes(self) -> [u8; 3] {
        [
            NOTE_ON + self.light_mode.effect_byte(),
            self.note_index,
            self.color.code(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_update_encoding() {
        let update = PadUpdate {
            light_mode: LightMode::Plain,
            note_index: 73,
            color: Color::Green,
        };
        assert_eq!(update.to_bytes(), [0x90, 73, 21]);

        let update = PadUpdate {
            light_mode: LightMode::Pulse,
            ..update
        };
        assert_eq!(update.to_bytes(), [0x92, 73, 21]);
    }
}
