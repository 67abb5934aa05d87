use crate::units::*;

/// A rectangle, specified by two opposite corners.
///
/// Layout rectangles use a top-left origin: `(x1, y1)` is the top-left
/// corner and `(x2, y2)` the bottom-right one, with y growing down the page.
/// [`Rect::to_pdf`] flips a rectangle into PDF's bottom-left origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (top-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (top-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (bottom-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (bottom-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// Create a rectangle from its top-left corner and its size
    pub fn from_origin_size(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// Convert into a PDF rectangle (bottom-left origin) on a page of the given height
    pub fn to_pdf(&self, page_height: Pt) -> pdf_writer::Rect {
        pdf_writer::Rect {
            x1: self.x1.0,
            y1: (page_height - self.y2).0,
            x2: self.x2.0,
            y2: (page_height - self.y1).0,
        }
    }
}
