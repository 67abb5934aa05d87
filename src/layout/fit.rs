use crate::config::SizeRange;
use crate::layout::wrap_words;
use crate::metrics::{FontId, TextMeasurer};
use crate::units::Pt;

/// A field's resolved rendering: the size it's set at and the lines it's broken into
#[derive(Debug, Clone, PartialEq)]
pub struct FittedField {
    pub font: FontId,
    pub size: Pt,
    pub lines: Vec<String>,
}

/// Finds the font size to set `text` at so that it fits within `max_width`.
///
/// Starts at `sizes.max` and steps down by `sizes.step` until the text fits, never
/// going below `sizes.min`. If the text is still too wide at the minimum size, the
/// minimum is returned anyway; it's up to the caller to wrap it.
pub fn shrink_to_fit<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: FontId,
    max_width: Pt,
    sizes: SizeRange,
) -> Pt {
    // a non-positive step would never terminate; fall straight to the floor instead
    let step = if sizes.step > Pt(0.0) {
        sizes.step
    } else {
        sizes.max - sizes.min
    };

    let mut size = sizes.max;
    while size > sizes.min && measurer.width_of(text, font, size) > max_width {
        size = (size - step).max(sizes.min);
    }
    size
}

/// Shrinks `text` to fit `max_width`, then wraps it at the chosen size
pub fn fit_field<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: FontId,
    max_width: Pt,
    sizes: SizeRange,
) -> FittedField {
    let size = shrink_to_fit(measurer, text, font, max_width, sizes);
    let lines = wrap_words(measurer, text, font, size, max_width);

    if lines.len() > 1 {
        log::trace!("{text:?} set at {size} over {} lines", lines.len());
    } else {
        log::trace!("{text:?} set at {size}");
    }
    for line in lines.iter() {
        let width = measurer.width_of(line, font, size);
        if width > max_width {
            log::warn!("{line:?} is {width} wide at {size}, overflowing its {max_width} cell");
        }
    }

    FittedField { font, size, lines }
}
