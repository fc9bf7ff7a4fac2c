/*!
A layout and animation engine for MIDI pad controllers.

The engine models the controller as a [`Grid`] of colored buttons. Any number of named
[`Layout`]s can be registered on it; only the current one is shown, while writes to the others
are remembered and rendered in one go when they are switched to. Buttons carry an [`Action`]
that runs when their pad is pressed.

Animations paint frames onto a layout, either self-paced on a worker thread or in sync with an
external MIDI clock:

```no_run
use moundboard::prelude::*;
use moundboard::launchpad::{Input, Output};
use moundboard::{Grid, GridConfig, OutputHandle, PlaybackController, Session};

let mut session = Session::new(Grid::new(GridConfig::default())?, PlaybackController::new());
session.connect_output(OutputHandle::new(Output::guess()?))?;

let input = Input::guess_polling()?;
session.on_input_connected()?;
for message in input.iter() {
    session.handle_message(&message);
}
# Ok::<(), Box<dyn std::error::Error>>(())
```

# Lower-level access

The device itself is reached through the [`launchpad::Output`] and [`launchpad::Input`]
structs, which translate between raw MIDI and [`PadUpdate`]s or
[`launchpad::Message`]s. Everything above them only depends on the [`MidiSink`] trait, so
tests run against a [`MockOutput`] instead.
*/

pub mod util;

mod protocols;
pub use protocols::{parse_hex_sysex, HardwareRevision, LightMode, PadUpdate};

mod color;
pub use color::*;

mod pad;
pub use pad::*;

mod midi_io;
pub use midi_io::*;

mod errors;
pub use errors::*;

mod grid;
pub use grid::*;

mod animation;
pub use animation::*;

mod playback;
pub use playback::*;

mod session;
pub use session::*;

mod mock;
pub use mock::*;

pub mod launchpad;

pub mod prelude {
    pub use crate::animation::Animation;
    pub use crate::color::Color;
    pub use crate::midi_io::{InputDevice, MidiSink, MsgPollingWrapper, OutputDevice};
    pub use crate::pad::Pad;
}

/// Identifier used for e.g. the midi port names etc.
const APPLICATION_NAME: &str = "Moundboard";
