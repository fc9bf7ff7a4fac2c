use std::time::Duration;

use super::Animation;
use crate::util::Array2d;
use crate::{Color, Layout, Pad};

/// Scrolls a bitmap across the layout from right to left.
///
/// The bitmap is indexed `(column, row)` with row 0 at the top, so it is drawn upside down
/// relative to the pad coordinates, whose row 0 is the bottom row of the device.
#[derive(Debug, Clone)]
pub struct ShiftAnimation {
    delay: Duration,
    bitmap: Array2d<Color>,
    repeat: bool,
    frame: usize,
    length: usize,
    offset: usize,
}

impl ShiftAnimation {
    pub fn new(delay: Duration, bitmap: Array2d<Color>) -> Self {
        Self {
            delay,
            bitmap,
            repeat: false,
            frame: 0,
            length: 0,
            offset: 0,
        }
    }

    /// Start over instead of finishing after the bitmap scrolled out
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn bitmap(&self) -> &Array2d<Color> {
        &self.bitmap
    }

    /// Index of the next frame
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Number of frames until the bitmap has left the layout. Known after the animation
    /// started.
    pub fn length(&self) -> usize {
        self.length
    }

    fn pixel(&self, x: usize, y: usize, rows: usize) -> Color {
        let column = match (x + self.frame).checked_sub(self.offset) {
            Some(column) => column,
            None => return Color::Black,
        };
        self.bitmap
            .get(column, rows - 1 - y)
            .copied()
            .unwrap_or(Color::Black)
    }
}

impl Animation for ShiftAnimation {
    fn delay(&self) -> Duration {
        self.delay
    }

    fn on_start(&mut self, layout: &Layout) {
        self.offset = layout.columns() as usize;
        self.length = self.bitmap.width() + self.offset;
        self.frame = 0;
    }

    fn apply_next_frame(&mut self, layout: &mut Layout) {
        if !self.has_next() {
            return;
        }

        let columns = layout.columns() as usize;
        let rows = layout.rows() as usize;

        for x in 0..columns {
            for y in 0..rows {
                let color = if x + self.frame < rows {
                    Color::Black
                } else if x + self.frame < self.length {
                    self.pixel(x, y, rows)
                } else {
                    Color::Black
                };
                layout.set_color(Pad::new(x as u8, y as u8), color);
            }
        }

        self.frame += 1;
        if self.repeat && self.frame >= self.length {
            self.frame = 0;
        }
    }

    fn has_next(&self) -> bool {
        self.frame <= self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(bitmap: Array2d<Color>, size: u8) -> (ShiftAnimation, Layout) {
        let layout = Layout::new("shift", size, size);
        let mut animation = ShiftAnimation::new(Duration::from_millis(10), bitmap);
        animation.on_start(&layout);
        (animation, layout)
    }

    #[test]
    fn runs_for_length_plus_one_frames() {
        let bitmap = Array2d::from_fn(6, 1, |_, _| Color::Red);
        let (mut animation, mut layout) = started(bitmap, 4);
        assert_eq!(animation.length(), 10);

        let mut frames = 0;
        while animation.has_next() {
            animation.apply_next_frame(&mut layout);
            frames += 1;
        }
        assert_eq!(frames, 11);
        assert_eq!(animation.frame(), 11);
    }

    #[test]
    fn exhausted_animation_leaves_the_layout_alone() {
        let bitmap = Array2d::from_fn(3, 1, |_, _| Color::Red);
        let (mut animation, mut layout) = started(bitmap, 4);
        while animation.has_next() {
            animation.apply_next_frame(&mut layout);
        }
        let frame = animation.frame();

        layout.button_mut(0, 0).set_color(Color::White);
        animation.apply_next_frame(&mut layout);
        assert_eq!(animation.frame(), frame);
        assert_eq!(layout[(0, 0)].color(), Color::White);
    }

    #[test]
    fn repeat_wraps_around() {
        let bitmap = Array2d::from_fn(3, 1, |_, _| Color::Red);
        let (animation, mut layout) = started(bitmap, 4);
        let mut animation = animation.with_repeat(true);

        for _ in 0..animation.length() {
            animation.apply_next_frame(&mut layout);
        }
        assert_eq!(animation.frame(), 0);
        assert!(animation.has_next());
    }

    #[test]
    fn bitmap_enters_from_the_right_upside_down() {
        let bitmap = Array2d::from_fn(2, 4, |x, y| Color::ALL[1 + y * 2 + x]);
        let (mut animation, mut layout) = started(bitmap, 4);

        for _ in 0..4 {
            animation.apply_next_frame(&mut layout);
        }

        // frame 3 was the last one painted
        for y in 0..4u8 {
            let bitmap_row = 3 - y as usize;
            assert_eq!(layout[(0, y)].color(), Color::Black);
            assert_eq!(layout[(1, y)].color(), Color::ALL[1 + bitmap_row * 2]);
            assert_eq!(layout[(2, y)].color(), Color::ALL[2 + bitmap_row * 2]);
            assert_eq!(layout[(3, y)].color(), Color::Black);
        }
    }

    #[test]
    fn short_bitmaps_are_padded_with_black() {
        // one row only; the other pad rows have nothing to show
        let bitmap = Array2d::from_fn(4, 1, |_, _| Color::Green);
        let (mut animation, mut layout) = started(bitmap, 4);

        for _ in 0..5 {
            animation.apply_next_frame(&mut layout);
        }

        assert_eq!(layout[(0, 3)].color(), Color::Green);
        assert!((0..3).all(|y| layout[(0, y)].color() == Color::Black));
    }
}
