use serde::{Deserialize, Serialize};

use crate::HardwareRevision;

/// Geometry and hardware revision of the controlled device.
///
/// Can be read from TOML; missing fields fall back to the defaults (a 10x10 grid):
/// ```
/// # use moundboard::{GridConfig, HardwareRevision};
/// let config = GridConfig::from_toml_str(r#"
///     rows = 8
///     revision = "Mk2"
/// "#)?;
/// assert_eq!(config.columns, 10);
/// assert_eq!(config.rows, 8);
/// assert_eq!(config.revision, HardwareRevision::Mk2);
/// # Ok::<(), toml::de::Error>(())
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u8,
    pub rows: u8,
    pub revision: HardwareRevision,
}

impl GridConfig {
    pub const DEFAULT_COLUMNS: u8 = 10;
    pub const DEFAULT_ROWS: u8 = 10;

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Returns whether every pad of this geometry has a linear note index that fits into a
    /// MIDI data byte
    pub fn is_valid(&self) -> bool {
        if self.columns == 0 || self.rows == 0 {
            return false;
        }

        let max_index = (self.columns as u16 - 1) + (self.rows as u16 - 1) * self.rows as u16;
        max_index <= 127
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            rows: Self::DEFAULT_ROWS,
            revision: HardwareRevision::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_validation() {
        assert!(GridConfig::default().is_valid());

        let eight = GridConfig {
            columns: 8,
            rows: 8,
            ..Default::default()
        };
        assert!(eight.is_valid());

        let too_tall = GridConfig {
            columns: 10,
            rows: 12,
            ..Default::default()
        };
        assert!(!too_tall.is_valid());

        let empty = GridConfig {
            columns: 0,
            ..Default::default()
        };
        assert!(!empty.is_valid());
    }
}
