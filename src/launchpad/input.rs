use crate::protocols::{CONTINUE, NOTE_OFF, NOTE_ON, START, STOP, TIMING_CLOCK};
use crate::Pad;

#[derive(Debug, Eq, PartialEq, Hash, Clone)]
/// A decoded input message
pub enum Message {
    /// A pad was pressed
    Press { pad: Pad, velocity: u8 },
    /// A pad was released
    Release { pad: Pad },
    /// One MIDI timing clock pulse
    ClockPulse,
    /// The clock master started playback
    Start,
    /// The clock master resumed playback
    Continue,
    /// The clock master stopped playback
    Stop,

    Unknown,
}

/// The input connection creator
pub struct Input;

impl Input {
    /// Decode a raw MIDI message. Pads are decoded with the base-10 note numbering.
    ///
    /// ```
    /// # use moundboard::launchpad::{Input, Message};
    /// # use moundboard::Pad;
    /// assert_eq!(
    ///     Input::decode(&[0x90, 73, 127]),
    ///     Message::Press { pad: Pad::new(3, 7), velocity: 127 },
    /// );
    /// assert_eq!(Input::decode(&[0xF8]), Message::ClockPulse);
    /// ```
    pub fn decode(data: &[u8]) -> Message {
        match *data {
            [status, note, velocity] if status & 0xF0 == NOTE_ON => {
                let pad = Pad::from_note(note);
                // Zero velocity note-ons are releases by convention
                if velocity == 0 {
                    Message::Release { pad }
                } else {
                    Message::Press { pad, velocity }
                }
            }
            [status, note, _] if status & 0xF0 == NOTE_OFF => Message::Release {
                pad: Pad::from_note(note),
            },
            [TIMING_CLOCK] => Message::ClockPulse,
            [START] => Message::Start,
            [CONTINUE] => Message::Continue,
            [STOP] => Message::Stop,
            _ => {
                log::trace!("Ignoring MIDI message {:02X?}", data);
                Message::Unknown
            }
        }
    }
}

impl crate::InputDevice for Input {
    const MIDI_DEVICE_KEYWORD: &'static str = "Launchpad";
    const MIDI_CONNECTION_NAME: &'static str = "Moundboard Input";
    type Message = Message;

    fn decode_message(_timestamp: u64, data: &[u8]) -> Message {
        Self::decode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_presses_and_releases() {
        assert_eq!(
            Input::decode(&[0x90, 0x0B, 100]),
            Message::Press {
                pad: Pad::new(1, 1),
                velocity: 100
            }
        );
        assert_eq!(
            Input::decode(&[0x90, 87, 0]),
            Message::Release {
                pad: Pad::new(7, 8)
            }
        );
        assert_eq!(
            Input::decode(&[0x80, 87, 0x40]),
            Message::Release {
                pad: Pad::new(7, 8)
            }
        );
        // any channel
        assert_eq!(
            Input::decode(&[0x92, 5, 1]),
            Message::Press {
                pad: Pad::new(5, 0),
                velocity: 1
            }
        );
    }

    #[test]
    fn decodes_realtime_messages() {
        assert_eq!(Input::decode(&[0xF8]), Message::ClockPulse);
        assert_eq!(Input::decode(&[0xFA]), Message::Start);
        assert_eq!(Input::decode(&[0xFB]), Message::Continue);
        assert_eq!(Input::decode(&[0xFC]), Message::Stop);
    }

    #[test]
    fn unknown_messages_are_not_fatal() {
        assert_eq!(Input::decode(&[0xB0, 104, 127]), Message::Unknown);
        assert_eq!(Input::decode(&[0xF0, 0x7E, 0xF7]), Message::Unknown);
        assert_eq!(Input::decode(&[]), Message::Unknown);
    }
}
