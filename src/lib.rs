//! Lays out records (a name, a position, a company, or whatever fields you configure)
//! into a grid of fixed-size cells across as many pages as needed, shrinking and
//! wrapping each field so it fits its cell, and renders the result to PDF.
//!
//! Layout ([`layout::GridLayout`]) is pure: it measures text through a
//! [`TextMeasurer`] and produces draw instructions. Rendering is anything that
//! implements [`Renderer`]; [`PdfDocument`] is the one this crate ships.
//!
//! ```no_run
//! use badge_grid::layout::GridLayout;
//! use badge_grid::{records_from_json, FontBook, GridConfig, Info, PdfDocument};
//!
//! let mut fonts = FontBook::new();
//! fonts.load(std::fs::read("fonts/Muli-Black.ttf")?)?;
//! fonts.load(std::fs::read("fonts/DINRegular.ttf")?)?;
//!
//! let records = records_from_json(&std::fs::read_to_string("attendees.json")?)?;
//! let grid = GridLayout::new(GridConfig::default())?;
//! let layout = grid.layout(&fonts, &records);
//!
//! let mut pdf = PdfDocument::new(&fonts);
//! pdf.set_info(Info::new().title("Attendee badges"));
//! layout.render(&mut pdf)?;
//! pdf.write(std::fs::File::create("badges.pdf")?)?;
//! # Ok::<(), badge_grid::GridError>(())
//! ```

mod config;
pub use config::*;

mod content;

mod document;
pub use document::*;

mod draw;
pub use draw::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod info;
pub use info::*;

/// Fitting text into cells and cells onto pages
pub mod layout;

mod metrics;
pub use metrics::*;

mod page;
pub use page::*;

/// Page sizes and orientations
pub mod pagesize;

mod record;
pub use record::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, mostly for custom [`Renderer`]s
pub use pdf_writer;
