//! Fitting text into cells and cells onto pages.
//!
//! Layout is pure computation: it measures text through a
//! [`TextMeasurer`](crate::TextMeasurer) and produces a [`Layout`], a page-grouped
//! list of [`DrawInstruction`](crate::DrawInstruction)s, without drawing anything.
//!
//! # Layout Functions
//!
//! - [`shrink_to_fit`] - steps a font size down until a string fits a width
//! - [`wrap_words`] - greedy word wrapping at a fixed size
//! - [`fit_field`] - both of the above, the way a cell's field is fitted
//! - [`GridLayout::layout`] - places records into cells and fits each of their fields
//!
//! # Example
//!
//! ```
//! use badge_grid::layout::GridLayout;
//! use badge_grid::{AdvanceTable, Advances, DrawInstruction, GridConfig, Record};
//!
//! let mut metrics = AdvanceTable::new();
//! metrics.add_font(Advances::monospace(600)); // names
//! metrics.add_font(Advances::monospace(500)); // positions and companies
//!
//! let grid = GridLayout::new(GridConfig::default()).expect("default config is valid");
//! let records = vec![
//!     Record::new()
//!         .with("Full Name", "Grace Hopper")
//!         .with("Position", "Rear Admiral")
//!         .with("Company", "US Navy"),
//! ];
//!
//! let layout = grid.layout(&metrics, &records);
//! assert_eq!(layout.pages.len(), 1);
//!
//! let mut drawn: Vec<DrawInstruction> = Vec::new();
//! layout.render(&mut drawn).expect("collecting can't fail");
//! // page start, border, and one line per field
//! assert_eq!(drawn.len(), 5);
//! ```

mod fit;
mod grid;
mod wrap;

pub use fit::*;
pub use grid::*;
pub use wrap::*;
