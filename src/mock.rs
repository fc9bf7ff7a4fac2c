use std::sync::{Arc, Mutex};

/// An in-memory [`MidiSink`](crate::MidiSink) that records every message instead of talking to
/// a device. Clones share the same record, so a test can keep one clone and hand the other to
/// an [`OutputHandle`](crate::OutputHandle).
#[derive(Debug, Clone, Default)]
pub struct MockOutput {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    messages: Vec<Vec<u8>>,
    disconnected: bool,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// All messages sent so far, oldest first
    pub fn messages(&self) -> Vec<Vec<u8>> {
        self.state().messages.clone()
    }

    pub fn clear(&self) {
        self.state().messages.clear();
    }

    /// Simulate an unplugged device: from now on every send fails
    pub fn disconnect(&self) {
        self.state().disconnected = true;
    }
}

impl crate::MidiSink for MockOutput {
    fn send(&mut self, bytes: &[u8]) -> Result<(), crate::MidiError> {
        let mut state = self.state();
        if state.disconnected {
            return Err(crate::MidiError::NoPortFound { keyword: "mock" });
        }
        state.messages.push(bytes.to_vec());
        Ok(())
    }
}
