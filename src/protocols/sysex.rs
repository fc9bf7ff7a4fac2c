use serde::{Deserialize, Serialize};

/// The hardware revision of the connected device. Both revisions share the note and color
/// protocol, but are switched into programmer mode with a different SysEx message.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum HardwareRevision {
    /// Device family byte `0x0E`
    ProMk3,
    /// Device family byte `0x18`
    Mk2,
}

impl Default for HardwareRevision {
    fn default() -> Self {
        HardwareRevision::ProMk3
    }
}

impl HardwareRevision {
    /// The initialization handshake for this revision, as hex byte tokens
    pub fn handshake(self) -> &'static str {
        match self {
            HardwareRevision::ProMk3 => "F0 00 20 29 02 0E 0E 01 F7",
            HardwareRevision::Mk2 => "F0 00 20 29 02 18 0E 01 F7",
        }
    }

    /// The initialization handshake for this revision, as raw bytes
    pub fn handshake_bytes(self) -> Vec<u8> {
        match parse_hex_sysex(self.handshake()) {
            Ok(bytes) => bytes,
            // The handshake strings above are constants
            Err(e) => unreachable!("malformed built-in handshake: {}", e),
        }
    }
}

/// Parse a string of whitespace separated hex byte tokens, like `"F0 00 20 29 F7"`.
///
/// An empty string yields an empty message.
///
/// ```
/// # use moundboard::parse_hex_sysex;
/// assert_eq!(parse_hex_sysex("F0 7E 7F F7")?, vec![0xF0, 0x7E, 0x7F, 0xF7]);
/// assert!(parse_hex_sysex("F0 XY F7").is_err());
/// # Ok::<(), moundboard::MidiError>(())
/// ```
pub fn parse_hex_sysex(message: &str) -> Result<Vec<u8>, crate::MidiError> {
    message
        .split_whitespace()
        .map(|token| {
            // from_str_radix alone would also accept a sign
            if token.len() > 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(crate::MidiError::InvalidSysexToken {
                    token: token.to_owned(),
                });
            }
            u8::from_str_radix(token, 16).map_err(|_| crate::MidiError::InvalidSysexToken {
                token: token.to_owned(),
            })
        })
        .collect()
}
