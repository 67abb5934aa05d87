//! Text measurement.
//!
//! Layout never touches font files directly; it only asks a [`TextMeasurer`]
//! how wide a string is in a given font at a given size. The font and size
//! are passed on every call so a measurer can be shared freely between
//! threads. [`FontBook`](crate::FontBook) measures with real glyph advances,
//! [`AdvanceTable`] with a fixed per-character table.

use crate::units::Pt;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Refers to a font by its position within a [`FontBook`](crate::FontBook)
/// or [`AdvanceTable`]
#[derive(
    Debug, Display, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[display("font #{_0}")]
#[serde(transparent)]
pub struct FontId(pub usize);

/// The one capability the layout engine needs from fonts
pub trait TextMeasurer {
    /// The width `text` would occupy when set in `font` at `size`. Characters
    /// the font can't render contribute nothing.
    fn width_of(&self, text: &str, font: FontId, size: Pt) -> Pt;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn width_of(&self, text: &str, font: FontId, size: Pt) -> Pt {
        (**self).width_of(text, font, size)
    }
}

/// Advance widths for one font, in thousandths of an em (the same unit PDF
/// font dictionaries use)
#[derive(Debug, Clone, PartialEq)]
pub struct Advances {
    pub default: u16,
    pub overrides: HashMap<char, u16>,
}

impl Advances {
    /// Every character advances by the same amount
    pub fn monospace(advance: u16) -> Advances {
        Advances {
            default: advance,
            overrides: HashMap::new(),
        }
    }

    /// Set the advance of a single character, modifying `self`
    pub fn with(mut self, ch: char, advance: u16) -> Advances {
        self.overrides.insert(ch, advance);
        self
    }

    fn advance(&self, ch: char) -> u16 {
        self.overrides.get(&ch).copied().unwrap_or(self.default)
    }
}

/// A read-only table of per-character advances, for when no font files are
/// at hand. Fonts are numbered in the order they were added.
#[derive(Debug, Default, Clone)]
pub struct AdvanceTable {
    fonts: Vec<Advances>,
}

impl AdvanceTable {
    pub fn new() -> AdvanceTable {
        AdvanceTable::default()
    }

    /// Add a font's advances, returning the id to refer to it by
    pub fn add_font(&mut self, advances: Advances) -> FontId {
        self.fonts.push(advances);
        FontId(self.fonts.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl TextMeasurer for AdvanceTable {
    fn width_of(&self, text: &str, font: FontId, size: Pt) -> Pt {
        let Some(advances) = self.fonts.get(font.0) else {
            return Pt(0.0);
        };
        let units: u32 = text.chars().map(|ch| advances.advance(ch) as u32).sum();
        size * (units as f32 / 1000.0)
    }
}
