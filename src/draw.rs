//! Draw instructions, the hand-off between layout and rendering.

use crate::{config::Alignment, metrics::FontId, rect::Rect, units::Pt};
use std::convert::Infallible;

/// One line of text, to be placed within `rect` according to `alignment` and
/// centred vertically on it
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub rect: Rect,
    pub text: String,
    pub font: FontId,
    pub size: Pt,
    pub alignment: Alignment,
}

/// A single unit of work for a [`Renderer`]. Rectangles use a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    /// Everything that follows, up to the next `PageStart`, belongs on a new page
    PageStart { index: usize, width: Pt, height: Pt },
    /// Stroke the outline of a cell
    Border { rect: Rect, width: Pt },
    Text(TextLine),
}

/// Anything that can turn draw instructions into output. Instructions arrive in
/// painter's order: later instructions are drawn over earlier ones.
pub trait Renderer {
    type Error;

    fn draw(&mut self, instruction: &DrawInstruction) -> Result<(), Self::Error>;
}

/// Collects instructions as-is
impl Renderer for Vec<DrawInstruction> {
    type Error = Infallible;

    fn draw(&mut self, instruction: &DrawInstruction) -> Result<(), Infallible> {
        self.push(instruction.clone());
        Ok(())
    }
}
