use serde::{Deserialize, Serialize};

/// The (column, row) coordinate of a single pad on the grid.
///
/// The device uses two different numbering schemes for pads, and both are reproduced here as
/// they are:
///
/// - Incoming notes and light show tables use base-10 numbering, `note = row * 10 + column`
///   ([`Pad::from_note`], [`Pad::note`]).
/// - Outgoing color updates use linear packing, `index = column + row * row_count`
///   ([`Pad::note_index`]).
///
/// For a grid with ten rows both schemes agree:
/// ```
/// # use moundboard::Pad;
/// let pad = Pad::new(3, 7);
/// assert_eq!(pad.note_index(10), 73);
/// assert_eq!(Pad::from_note(73), pad);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Pad {
    pub x: u8,
    pub y: u8,
}

impl Pad {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Decode a base-10 device note number
    pub fn from_note(note: u8) -> Self {
        let x = note % 10;
        let y = (note - x) / 10;
        Self { x, y }
    }

    /// Encode this pad as a base-10 device note number. `None` if the column has more than one
    /// digit or the note doesn't fit a MIDI data byte.
    pub fn note(self) -> Option<u8> {
        if self.x >= 10 {
            return None;
        }
        let note = self.y.checked_mul(10)?.checked_add(self.x)?;
        if note > 127 {
            return None;
        }
        Some(note)
    }

    /// Encode this pad as a linear note index for a grid with `row_count` rows.
    ///
    /// The caller guarantees that the result fits a byte; [`crate::Grid::new`] validates this
    /// for every pad of its geometry.
    pub fn note_index(self, row_count: u8) -> u8 {
        self.x + self.y * row_count
    }
}

impl From<(u8, u8)> for Pad {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}
