/*!
# Device adapter

Connects the engine to a physical pad controller through midir. The controller is switched into
programmer mode with the SysEx handshake of its [`HardwareRevision`](crate::HardwareRevision),
after which:

- pressing pad `(x, y)` sends a note-on for note `y * 10 + x`,
- a note-on on channel `effect` for note index `x + y * rows` with a palette code as velocity
  lights a pad.

Everything in here is a thin translation layer; the engine itself only depends on the
[`MidiSink`](crate::MidiSink) and [`InputDevice`](crate::InputDevice) traits.
*/

mod input;
pub use input::*;

mod output;
pub use output::*;
