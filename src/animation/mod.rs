//! Frame based animations and the [`Player`] that schedules them.
//!
//! An [`Animation`] only knows how to paint its next frame onto a [`Layout`]. When that happens
//! is up to the player: either the caller advances it one frame per external tick (e.g. per
//! MIDI clock pulse, see [`crate::PlaybackController`]), or the player runs it on its own worker
//! thread, waiting [`Animation::delay`] between frames.

mod player;
pub use player::*;

mod shift;
pub use shift::*;

mod show;
pub use show::*;

use std::time::Duration;

use crate::Layout;

/// A frame-producing state machine
pub trait Animation: Send {
    /// Time between two frames. Only used when the animation paces itself.
    fn delay(&self) -> Duration;

    /// Called once when the animation is bound to `layout`, before the first frame
    fn on_start(&mut self, layout: &Layout);

    /// Paint the next frame onto the bound layout. Only called while [`Animation::has_next`]
    /// returns true.
    fn apply_next_frame(&mut self, layout: &mut Layout);

    /// Whether there are frames left
    fn has_next(&self) -> bool;
}
