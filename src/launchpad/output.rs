use midir::MidiOutputConnection;

use crate::{HardwareRevision, MidiSink, PadUpdate};

/// The object handling any messages _to_ the device. The connection gets closed when this
/// object goes out of scope.
///
/// Usually you hand it to an [`OutputHandle`](crate::OutputHandle) and let the
/// [`Grid`](crate::Grid) drive it, but it can also be used directly:
/// ```no_run
/// # use moundboard::OutputDevice as _;
/// # use moundboard::launchpad::Output;
/// # use moundboard::{Color, HardwareRevision, LightMode, PadUpdate};
/// let mut output = Output::guess()?;
/// output.send_handshake(HardwareRevision::ProMk3)?;
/// output.set_pad(PadUpdate { light_mode: LightMode::Plain, note_index: 73, color: Color::Red })?;
/// # Ok::<(), moundboard::MidiError>(())
/// ```
pub struct Output {
    connection: MidiOutputConnection,
}

impl MidiSink for Output {
    fn send(&mut self, bytes: &[u8]) -> Result<(), crate::MidiError> {
        self.connection.send(bytes)?;
        Ok(())
    }
}

impl crate::OutputDevice for Output {
    const MIDI_CONNECTION_NAME: &'static str = "Moundboard Output";
    const MIDI_DEVICE_KEYWORD: &'static str = "Launchpad";

    fn from_connection(connection: MidiOutputConnection) -> Result<Self, crate::MidiError> {
        Ok(Self { connection })
    }
}

impl Output {
    /// Switch the device into programmer mode, so that pads can be lit by note index
    pub fn send_handshake(&mut self, revision: HardwareRevision) -> Result<(), crate::MidiError> {
        self.send(&revision.handshake_bytes())
    }

    pub fn set_pad(&mut self, update: PadUpdate) -> Result<(), crate::MidiError> {
        self.send(&update.to_bytes())
    }
}
