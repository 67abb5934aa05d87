//! Page sizes for the sheets the grid is printed on.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`PageOrientation`](crate::pagesize::PageOrientation) trait, or
//! [`PageSpec`](crate::pagesize::PageSpec) in configuration, to turn them.
//!
//! # Example
//!
//! ```
//! use badge_grid::pagesize::{A4, PageOrientation};
//!
//! let landscape = A4.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::units::*;
use serde::{Deserialize, Serialize};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

// north american sizes
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const TABLOID: PageSize = (Pt(11.0 * 72.0), Pt(17.0 * 72.0));

// iso a-series (converted from mm to points)
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// A named paper size, or an arbitrary one given in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paper {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width: Mm, height: Mm },
}

impl Paper {
    /// The paper's size in its natural orientation
    pub fn size(&self) -> PageSize {
        match self {
            Paper::A3 => A3,
            Paper::A4 => A4,
            Paper::A5 => A5,
            Paper::Letter => LETTER,
            Paper::Legal => LEGAL,
            Paper::Tabloid => TABLOID,
            Paper::Custom { width, height } => ((*width).into(), (*height).into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// The page the grid is centred on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub paper: Paper,
    #[serde(default)]
    pub orientation: Orientation,
}

impl Default for PageSpec {
    /// A4 landscape
    fn default() -> Self {
        PageSpec {
            paper: Paper::A4,
            orientation: Orientation::Landscape,
        }
    }
}

impl PageSpec {
    /// The oriented (width, height) of the page. Custom sizes are turned to the
    /// requested orientation like named ones.
    pub fn size(&self) -> PageSize {
        let size = self.paper.size();
        match self.orientation {
            Orientation::Portrait => size.portrait(),
            Orientation::Landscape => size.landscape(),
        }
    }
}
