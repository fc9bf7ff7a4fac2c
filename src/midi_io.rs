use midir::{MidiInput, MidiInputConnection, MidiInputPort, MidiOutput, MidiOutputConnection};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ok_or_continue;
use crate::protocols::PadUpdate;

fn guess_port<T: midir::MidiIO>(midi_io: &T, keyword: &str) -> Option<T::Port> {
    for port in midi_io.ports() {
        let name = ok_or_continue!(midi_io.port_name(&port));

        if name.contains(keyword) {
            return Some(port);
        }
    }

    None
}

/// Anything that raw MIDI messages can be written to. The engine only ever talks to the device
/// through this trait.
pub trait MidiSink {
    fn send(&mut self, bytes: &[u8]) -> Result<(), crate::MidiError>;
}

pub trait OutputDevice: MidiSink
where
    Self: Sized,
{
    const MIDI_CONNECTION_NAME: &'static str;
    const MIDI_DEVICE_KEYWORD: &'static str;

    /// Initiate from an existing midir connection.
    fn from_connection(connection: MidiOutputConnection) -> Result<Self, crate::MidiError>;

    fn guess() -> Result<Self, crate::MidiError> {
        let midi_output = MidiOutput::new(crate::APPLICATION_NAME)?;

        let port = guess_port(&midi_output, Self::MIDI_DEVICE_KEYWORD).ok_or(
            crate::MidiError::NoPortFound {
                keyword: Self::MIDI_DEVICE_KEYWORD,
            },
        )?;

        let connection = midi_output.connect(&port, Self::MIDI_CONNECTION_NAME)?;

        Self::from_connection(connection)
    }
}

/// A cloneable, thread-safe handle to the output sink.
///
/// The handle is locked independently of the grid, so a worker can release the grid before it
/// writes to the device.
#[derive(Clone)]
pub struct OutputHandle {
    sink: Arc<Mutex<Box<dyn MidiSink + Send>>>,
}

impl OutputHandle {
    pub fn new(sink: impl MidiSink + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
        }
    }

    pub fn send(&self, bytes: &[u8]) -> Result<(), crate::MidiError> {
        self.lock().send(bytes)
    }

    /// Send a batch of pad updates. Failed sends are logged and skipped, so that a vanished
    /// device never takes an animation down with it.
    ///
    /// Returns the number of updates that were sent successfully.
    pub fn send_updates(&self, updates: &[PadUpdate]) -> usize {
        self.lock().send_updates(updates)
    }

    /// Lock the sink for exclusive use. Nothing else can send through this handle until the
    /// guard is dropped, which lets a caller reserve the output before releasing the grid.
    pub fn lock(&self) -> OutputGuard<'_> {
        // A panic in another sender doesn't invalidate the connection itself
        OutputGuard {
            sink: self.sink.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }
}

/// Exclusive access to the sink of an [`OutputHandle`]
pub struct OutputGuard<'a> {
    sink: MutexGuard<'a, Box<dyn MidiSink + Send>>,
}

impl OutputGuard<'_> {
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), crate::MidiError> {
        self.sink.send(bytes)
    }

    /// See [`OutputHandle::send_updates`]
    pub fn send_updates(&mut self, updates: &[PadUpdate]) -> usize {
        let mut sent = 0;
        for update in updates {
            match self.sink.send(&update.to_bytes()) {
                Ok(()) => sent += 1,
                Err(e) => log::warn!("Dropping pad update {:?}: {}", update, e),
            }
        }
        sent
    }
}

impl std::fmt::Debug for OutputHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputHandle").finish_non_exhaustive()
    }
}

pub struct InputDeviceHandler {
    #[allow(dead_code)]
    connection: MidiInputConnection<()>,
}

pub struct InputDeviceHandlerPolling<Message> {
    #[allow(dead_code)]
    connection: MidiInputConnection<()>,
    receiver: std::sync::mpsc::Receiver<Message>,
}

/// A trait for types that wrap a message receiver, providing the polling API on top of it.
pub trait MsgPollingWrapper {
    type Message;

    fn receiver(&self) -> &std::sync::mpsc::Receiver<Self::Message>;

    /// Wait for a message to arrive, and return that. Returns `None` once the connection is
    /// gone. For a non-blocking variant, see `try_recv()`.
    fn recv(&self) -> Option<Self::Message> {
        self.receiver().recv().ok()
    }

    /// If there is a pending message, return that. Otherwise, return `None`.
    ///
    /// This function does not block.
    fn try_recv(&self) -> Option<Self::Message> {
        self.receiver().try_recv().ok()
    }

    /// Receives a single message. If no message arrives within the timespan specified by
    /// `timeout`, `None` is returned.
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Self::Message> {
        self.receiver().recv_timeout(timeout).ok()
    }

    /// Returns an iterator over all arriving messages. The iterator will only return when the
    /// MIDI connection has been dropped.
    ///
    /// For an iteration method that doesn't block, but returns immediately when there are no
    /// more pending messages, see `iter_pending`.
    fn iter(&self) -> std::sync::mpsc::Iter<'_, Self::Message> {
        self.receiver().iter()
    }

    /// Returns an iterator over the currently pending messages. As soon as all pending messages
    /// have been iterated over, the iterator will return.
    fn iter_pending(&self) -> std::sync::mpsc::TryIter<'_, Self::Message> {
        self.receiver().try_iter()
    }

    /// Drain of any pending messages. Pads pressed while nobody was connected queue up on the
    /// device and arrive all at once on connect; call `drain()` after establishing the
    /// connection to discard them.
    ///
    /// This function returns the number of messages that were discarded.
    fn drain(&self) -> usize {
        self.iter_pending().count()
    }
}

impl<Message> MsgPollingWrapper for InputDeviceHandlerPolling<Message> {
    type Message = Message;

    fn receiver(&self) -> &std::sync::mpsc::Receiver<Message> {
        &self.receiver
    }
}

pub trait InputDevice {
    const MIDI_CONNECTION_NAME: &'static str;
    const MIDI_DEVICE_KEYWORD: &'static str;
    type Message;

    fn decode_message(timestamp: u64, data: &[u8]) -> Self::Message;

    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn from_port<F>(
        midi_input: MidiInput,
        port: &MidiInputPort,
        mut user_callback: F,
    ) -> Result<InputDeviceHandler, crate::MidiError>
    where
        F: FnMut(Self::Message) + Send + 'static,
    {
        let midir_callback = move |timestamp: u64, data: &[u8], _: &mut _| {
            let msg = Self::decode_message(timestamp, data);
            (user_callback)(msg);
        };

        let connection =
            midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

        Ok(InputDeviceHandler { connection })
    }

    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn from_port_polling(
        midi_input: MidiInput,
        port: &MidiInputPort,
    ) -> Result<InputDeviceHandlerPolling<Self::Message>, crate::MidiError>
    where
        Self::Message: Send + 'static,
    {
        let (sender, receiver) = std::sync::mpsc::channel();
        let midir_callback = move |timestamp: u64, data: &[u8], _: &mut _| {
            let msg = Self::decode_message(timestamp, data);
            // Only fails once the poller is gone, and then nobody is listening anyway
            let _ = sender.send(msg);
        };

        let connection =
            midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

        Ok(InputDeviceHandlerPolling {
            connection,
            receiver,
        })
    }

    /// Search the midi devices and choose the first midi device matching the wanted device type.
    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn guess<F>(user_callback: F) -> Result<InputDeviceHandler, crate::MidiError>
    where
        F: FnMut(Self::Message) + Send + 'static,
    {
        let mut midi_input = MidiInput::new(crate::APPLICATION_NAME)?;
        // Timing clock pulses are real-time messages, which must not be filtered out
        midi_input.ignore(midir::Ignore::None);

        let port = guess_port(&midi_input, Self::MIDI_DEVICE_KEYWORD).ok_or(
            crate::MidiError::NoPortFound {
                keyword: Self::MIDI_DEVICE_KEYWORD,
            },
        )?;

        Self::from_port(midi_input, &port, user_callback)
    }

    /// Search the midi devices and choose the first midi device matching the wanted device type.
    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn guess_polling() -> Result<InputDeviceHandlerPolling<Self::Message>, crate::MidiError>
    where
        Self::Message: Send + 'static,
    {
        let mut midi_input = MidiInput::new(crate::APPLICATION_NAME)?;
        // Timing clock pulses are real-time messages, which must not be filtered out
        midi_input.ignore(midir::Ignore::None);

        let port = guess_port(&midi_input, Self::MIDI_DEVICE_KEYWORD).ok_or(
            crate::MidiError::NoPortFound {
                keyword: Self::MIDI_DEVICE_KEYWORD,
            },
        )?;

        Self::from_port_polling(midi_input, &port)
    }
}
