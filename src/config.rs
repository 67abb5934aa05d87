//! Grid configuration.
//!
//! Geometry is written in millimetres and font sizes in points, matching how
//! badge sheets are usually specified. Every option has a default, so a
//! configuration file only needs the values it changes:
//!
//! ```
//! use badge_grid::GridConfig;
//!
//! let config = GridConfig::from_json(r#"{"columns": 3, "rows": 6}"#).expect("valid config");
//! assert_eq!(config.columns, 3);
//! assert_eq!(config.font_size_max.0, 11.0);
//! ```

use crate::{
    metrics::FontId,
    pagesize::PageSpec,
    units::{Mm, Pt},
    GridError,
};
use serde::{Deserialize, Serialize};

/// Horizontal placement of a line of text within its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// One field slot of a cell: which record field it shows and in which font.
/// Slots are drawn top to bottom in the order they're configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub font: FontId,
    #[serde(default)]
    pub alignment: Alignment,
}

impl FieldSpec {
    pub fn new<S: ToString>(name: S, font: FontId) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            font,
            alignment: Alignment::default(),
        }
    }
}

/// The font sizes a field may be shrunk through: from `max` down to `min` in
/// steps of `step`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: Pt,
    pub max: Pt,
    pub step: Pt,
}

/// Everything that determines how records are laid out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub page: PageSpec,
    pub columns: usize,
    pub rows: usize,
    pub cell_width: Mm,
    pub cell_height: Mm,
    pub cell_spacing: Mm,
    pub padding: Mm,
    pub line_height: Mm,
    pub font_size_min: Pt,
    pub font_size_max: Pt,
    pub font_size_step: Pt,
    pub border_width: Pt,
    pub fields: Vec<FieldSpec>,
    /// Values that mean "no value", compared ignoring case
    pub null_markers: Vec<String>,
}

impl Default for GridConfig {
    /// A 4 × 8 sheet of 70 × 23 mm badges on A4 landscape. The name is set in font 0,
    /// the position and company in font 1.
    fn default() -> Self {
        GridConfig {
            page: PageSpec::default(),
            columns: 4,
            rows: 8,
            cell_width: Mm(70.0),
            cell_height: Mm(23.0),
            cell_spacing: Mm(1.0),
            padding: Mm(2.0),
            line_height: Mm(5.5),
            font_size_min: Pt(7.0),
            font_size_max: Pt(11.0),
            font_size_step: Pt(0.5),
            border_width: Pt(0.5),
            fields: vec![
                FieldSpec::new("Full Name", FontId(0)),
                FieldSpec::new("Position", FontId(1)),
                FieldSpec::new("Company", FontId(1)),
            ],
            null_markers: vec!["nan".to_string()],
        }
    }
}

impl GridConfig {
    /// Parse a configuration from JSON. Missing options take their defaults; the result
    /// is not validated until it's handed to [`GridLayout::new`](crate::layout::GridLayout::new)
    pub fn from_json(json: &str) -> Result<GridConfig, GridError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn size_range(&self) -> SizeRange {
        SizeRange {
            min: self.font_size_min,
            max: self.font_size_max,
            step: self.font_size_step,
        }
    }

    /// Check that the configuration describes a grid that can be laid out: every
    /// dimension positive, a sensible size range, and a grid that fits on its page
    pub fn validate(&self) -> Result<(), GridError> {
        if self.columns == 0 {
            return Err(GridError::invalid("columns", "must be at least 1"));
        }
        if self.rows == 0 {
            return Err(GridError::invalid("rows", "must be at least 1"));
        }

        let lengths: [(&'static str, f32); 9] = [
            ("cell_width", self.cell_width.0),
            ("cell_height", self.cell_height.0),
            ("cell_spacing", self.cell_spacing.0),
            ("padding", self.padding.0),
            ("line_height", self.line_height.0),
            ("font_size_min", self.font_size_min.0),
            ("font_size_max", self.font_size_max.0),
            ("font_size_step", self.font_size_step.0),
            ("border_width", self.border_width.0),
        ];
        for (option, value) in lengths {
            // also rejects NaN
            if !(value > 0.0 && value.is_finite()) {
                return Err(GridError::invalid(
                    option,
                    format!("must be positive, got {value}"),
                ));
            }
        }

        if self.font_size_max < self.font_size_min {
            return Err(GridError::invalid(
                "font_size_max",
                format!(
                    "{} is smaller than font_size_min {}",
                    self.font_size_max, self.font_size_min
                ),
            ));
        }
        if self.padding.0 * 2.0 >= self.cell_width.0 {
            return Err(GridError::invalid(
                "padding",
                "leaves no room for text inside the cell",
            ));
        }
        if self.fields.is_empty() {
            return Err(GridError::invalid("fields", "at least one field is needed"));
        }

        let (page_width, page_height) = self.page.size();
        let grid_width: Pt = span(self.columns, self.cell_width, self.cell_spacing);
        let grid_height: Pt = span(self.rows, self.cell_height, self.cell_spacing);
        if grid_width > page_width {
            return Err(GridError::invalid(
                "columns",
                format!("the grid is {grid_width} wide but the page only {page_width}"),
            ));
        }
        if grid_height > page_height {
            return Err(GridError::invalid(
                "rows",
                format!("the grid is {grid_height} tall but the page only {page_height}"),
            ));
        }

        Ok(())
    }
}

/// The length of `count` cells of `size` with `spacing` between neighbours
pub(crate) fn span(count: usize, size: Mm, spacing: Mm) -> Pt {
    let size: Pt = size.into();
    let spacing: Pt = spacing.into();
    size * count as f32 + spacing * count.saturating_sub(1) as f32
}
