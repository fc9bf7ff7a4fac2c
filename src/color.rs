use serde::{Deserialize, Serialize};

/// A color from the device's 64-entry palette. The palette is laid out in columns of four
/// shades (light, full, dim, dark), see the "Launchpad Programmers Reference Manual".
///
/// Every color corresponds to exactly one palette code, which is what goes over the wire:
/// ```
/// # use moundboard::Color;
/// assert_eq!(Color::Red.code(), 5);
/// assert_eq!(Color::from_code(5), Some(Color::Red));
/// assert_eq!(Color::default(), Color::Black);
/// ```
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Color {
    Black,
    DarkGray,
    LightGray,
    White,
    LightRed,
    Red,
    Red1,
    Red2,
    LightOrange,
    Orange,
    Orange1,
    Orange2,
    LightYellow,
    Yellow,
    Yellow1,
    Yellow2,
    LightOlive,
    Olive,
    Olive1,
    Olive2,
    LightGreen,
    Green,
    Green1,
    Green2,
    LightLime,
    Lime,
    Lime1,
    Lime2,
    LightTurquoise,
    Turquoise,
    Turquoise1,
    Turquoise2,
    LightCyan,
    Cyan,
    Cyan1,
    Cyan2,
    LightPaleBlue,
    PaleBlue,
    PaleBlue1,
    PaleBlue2,
    LightBlue,
    Blue,
    Blue1,
    Blue2,
    LightDarkBlue,
    DarkBlue,
    DarkBlue1,
    DarkBlue2,
    LightPurple,
    Purple,
    Purple1,
    Purple2,
    LightMagenta,
    Magenta,
    Magenta1,
    Magenta2,
    LightPink,
    Pink,
    Pink1,
    Pink2,
    LightBrown,
    Brown,
    Brown1,
    Brown2,
}

impl Default for Color {
    fn default() -> Self {
        Color::Black
    }
}

impl Color {
    /// The whole palette, ordered by palette code
    pub const ALL: [Color; 64] = [
        Color::Black,
        Color::DarkGray,
        Color::LightGray,
        Color::White,
        Color::LightRed,
        Color::Red,
        Color::Red1,
        Color::Red2,
        Color::LightOrange,
        Color::Orange,
        Color::Orange1,
        Color::Orange2,
        Color::LightYellow,
        Color::Yellow,
        Color::Yellow1,
        Color::Yellow2,
        Color::LightOlive,
        Color::Olive,
        Color::Olive1,
        Color::Olive2,
        Color::LightGreen,
        Color::Green,
        Color::Green1,
        Color::Green2,
        Color::LightLime,
        Color::Lime,
        Color::Lime1,
        Color::Lime2,
        Color::LightTurquoise,
        Color::Turquoise,
        Color::Turquoise1,
        Color::Turquoise2,
        Color::LightCyan,
        Color::Cyan,
        Color::Cyan1,
        Color::Cyan2,
        Color::LightPaleBlue,
        Color::PaleBlue,
        Color::PaleBlue1,
        Color::PaleBlue2,
        Color::LightBlue,
        Color::Blue,
        Color::Blue1,
        Color::Blue2,
        Color::LightDarkBlue,
        Color::DarkBlue,
        Color::DarkBlue1,
        Color::DarkBlue2,
        Color::LightPurple,
        Color::Purple,
        Color::Purple1,
        Color::Purple2,
        Color::LightMagenta,
        Color::Magenta,
        Color::Magenta1,
        Color::Magenta2,
        Color::LightPink,
        Color::Pink,
        Color::Pink1,
        Color::Pink2,
        Color::LightBrown,
        Color::Brown,
        Color::Brown1,
        Color::Brown2,
    ];

    /// The device palette code of this color
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::DarkGray => 1,
            Color::LightGray => 2,
            Color::White => 3,
            Color::LightRed => 4,
            Color::Red => 5,
            Color::Red1 => 6,
            Color::Red2 => 7,
            Color::LightOrange => 8,
            Color::Orange => 9,
            Color::Orange1 => 10,
            Color::Orange2 => 11,
            Color::LightYellow => 12,
            Color::Yellow => 13,
            Color::Yellow1 => 14,
            Color::Yellow2 => 15,
            Color::LightOlive => 16,
            Color::Olive => 17,
            Color::Olive1 => 18,
            Color::Olive2 => 19,
            Color::LightGreen => 20,
            Color::Green => 21,
            Color::Green1 => 22,
            Color::Green2 => 23,
            Color::LightLime => 24,
            Color::Lime => 25,
            Color::Lime1 => 26,
            Color::Lime2 => 27,
            Color::LightTurquoise => 28,
            Color::Turquoise => 29,
            Color::Turquoise1 => 30,
            Color::Turquoise2 => 31,
            Color::LightCyan => 32,
            Color::Cyan => 33,
            Color::Cyan1 => 34,
            Color::Cyan2 => 35,
            Color::LightPaleBlue => 36,
            Color::PaleBlue => 37,
            Color::PaleBlue1 => 38,
            Color::PaleBlue2 => 39,
            Color::LightBlue => 40,
            Color::Blue => 41,
            Color::Blue1 => 42,
            Color::Blue2 => 43,
            Color::LightDarkBlue => 44,
            Color::DarkBlue => 45,
            Color::DarkBlue1 => 46,
            Color::DarkBlue2 => 47,
            Color::LightPurple => 48,
            Color::Purple => 49,
            Color::Purple1 => 50,
            Color::Purple2 => 51,
            Color::LightMagenta => 52,
            Color::Magenta => 53,
            Color::Magenta1 => 54,
            Color::Magenta2 => 55,
            Color::LightPink => 56,
            Color::Pink => 57,
            Color::Pink1 => 58,
            Color::Pink2 => 59,
            Color::LightBrown => 60,
            Color::Brown => 61,
            Color::Brown1 => 62,
            Color::Brown2 => 63,
        }
    }

    /// The color with the given palette code, or `None` if the code is outside the palette
    pub fn from_code(code: u8) -> Option<Color> {
        Self::ALL.get(code as usize).copied()
    }

    /// The following palette entry. Wraps around from the last entry to black.
    pub fn next(self) -> Color {
        Self::ALL[(self.code() as usize + 1) % Self::ALL.len()]
    }

    /// Approximate RGB value that this palette entry shows on the device
    pub fn rgb(self) -> (u8, u8, u8) {
        PALETTE_RGB[self.code() as usize]
    }

    /// Find the palette entry closest to the given RGB value, e.g. to map a color picked in
    /// a color dialog onto the device palette.
    ///
    /// ```
    /// # use moundboard::Color;
    /// assert_eq!(Color::nearest(250, 5, 5), Color::Red);
    /// assert_eq!(Color::nearest(0, 0, 0), Color::Black);
    /// ```
    pub fn nearest(r: u8, g: u8, b: u8) -> Color {
        let distance = |color: &Color| {
            let (cr, cg, cb) = color.rgb();
            let dr = cr as i32 - r as i32;
            let dg = cg as i32 - g as i32;
            let db = cb as i32 - b as i32;
            dr * dr + dg * dg + db * db
        };

        Self::ALL
            .iter()
            .copied()
            .min_by_key(distance)
            .unwrap_or(Color::Black)
    }
}

// Measured from the device, so only roughly accurate
const PALETTE_RGB: [(u8, u8, u8); 64] = [
    (0x00, 0x00, 0x00),
    (0x1e, 0x1e, 0x1e),
    (0x7f, 0x7f, 0x7f),
    (0xff, 0xff, 0xff),
    (0xff, 0x4c, 0x4c),
    (0xff, 0x00, 0x00),
    (0x59, 0x00, 0x00),
    (0x19, 0x00, 0x00),
    (0xff, 0xbd, 0x6c),
    (0xff, 0x54, 0x00),
    (0x59, 0x1d, 0x00),
    (0x27, 0x1b, 0x00),
    (0xff, 0xff, 0x4c),
    (0xff, 0xff, 0x00),
    (0x59, 0x59, 0x00),
    (0x19, 0x19, 0x00),
    (0x88, 0xff, 0x4c),
    (0x54, 0xff, 0x00),
    (0x1d, 0x59, 0x00),
    (0x14, 0x2b, 0x00),
    (0x4c, 0xff, 0x4c),
    (0x00, 0xff, 0x00),
    (0x00, 0x59, 0x00),
    (0x00, 0x19, 0x00),
    (0x4c, 0xff, 0x5e),
    (0x00, 0xff, 0x19),
    (0x00, 0x59, 0x0d),
    (0x00, 0x19, 0x02),
    (0x4c, 0xff, 0x88),
    (0x00, 0xff, 0x55),
    (0x00, 0x59, 0x1d),
    (0x00, 0x1f, 0x12),
    (0x4c, 0xff, 0xb7),
    (0x00, 0xff, 0x99),
    (0x00, 0x59, 0x35),
    (0x00, 0x19, 0x12),
    (0x4c, 0xc3, 0xff),
    (0x00, 0xa9, 0xff),
    (0x00, 0x41, 0x52),
    (0x00, 0x10, 0x19),
    (0x4c, 0x88, 0xff),
    (0x00, 0x55, 0xff),
    (0x00, 0x1d, 0x59),
    (0x00, 0x08, 0x19),
    (0x4c, 0x4c, 0xff),
    (0x00, 0x00, 0xff),
    (0x00, 0x00, 0x59),
    (0x00, 0x00, 0x19),
    (0x87, 0x4c, 0xff),
    (0x54, 0x00, 0xff),
    (0x19, 0x00, 0x64),
    (0x0f, 0x00, 0x30),
    (0xff, 0x4c, 0xff),
    (0xff, 0x00, 0xff),
    (0x59, 0x00, 0x59),
    (0x19, 0x00, 0x19),
    (0xff, 0x4c, 0x87),
    (0xff, 0x00, 0x54),
    (0x59, 0x00, 0x1d),
    (0x22, 0x00, 0x13),
    (0xff, 0x15, 0x00),
    (0x99, 0x35, 0x00),
    (0x79, 0x51, 0x00),
    (0x43, 0x64, 0x00),
];

#[cfg(feature = "embedded-graphics")]
impl From<Color> for embedded_graphics::pixelcolor::Rgb888 {
    fn from(color: Color) -> Self {
        let (r, g, b) = color.rgb();
        Self::new(r, g, b)
    }
}

#[cfg(feature = "embedded-graphics")]
impl From<embedded_graphics::pixelcolor::Rgb888> for Color {
    fn from(color: embedded_graphics::pixelcolor::Rgb888) -> Self {
        use embedded_graphics::pixelcolor::RgbColor;

        Color::nearest(color.r(), color.g(), color.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_and_follow_palette_order() {
        for (index, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.code() as usize, index);
            assert_eq!(Color::from_code(color.code()), Some(*color));
        }
        assert_eq!(Color::from_code(64), None);
        assert_eq!(Color::from_code(127), None);
    }

    #[test]
    fn next_wraps_to_black() {
        assert_eq!(Color::Black.next(), Color::DarkGray);
        assert_eq!(Color::Brown2.next(), Color::Black);
    }

    #[test]
    fn nearest_finds_exact_palette_entries() {
        for color in Color::ALL.iter() {
            let (r, g, b) = color.rgb();
            assert_eq!(Color::nearest(r, g, b).rgb(), color.rgb());
        }
    }
}
