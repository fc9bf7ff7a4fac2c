//! The grid model: buttons, layouts and the device grid that switches between them.
//!
//! A [`Grid`] owns any number of [`Layout`]s, exactly one of which is current at a time. Every
//! layout keeps its full button state, but only the current one produces device updates.
//! Writes to any other layout are buffered in its buttons and only reach the device when that
//! layout becomes current:
//!
//! ```
//! use moundboard::{Color, Grid, GridConfig, MockOutput, OutputHandle};
//!
//! let output = MockOutput::new();
//! let mut grid = Grid::new(GridConfig::default())?;
//! grid.set_output(Some(OutputHandle::new(output.clone())));
//!
//! let main = grid.add_layout("main");
//! let other = grid.add_layout("other");
//! grid.set_current_layout(main)?;
//! grid.flush();
//! output.clear();
//!
//! // `other` is not current, so nothing is sent
//! grid.layout_mut(other).unwrap().set_solid_color(Color::Blue);
//! assert_eq!(grid.flush(), 0);
//!
//! // Switching re-renders every pad of `other`
//! grid.set_current_layout(other)?;
//! assert_eq!(grid.flush(), 100);
//! # Ok::<(), moundboard::GridError>(())
//! ```

mod action;
pub use action::*;

mod button;
pub use button::*;

mod config;
pub use config::*;

mod layout;
pub use layout::*;

// the outer module is everything grid related, the inner module is the Grid struct itself
#[allow(clippy::module_inception)]
mod grid;
pub use grid::*;
