use crate::config::{span, GridConfig};
use crate::draw::{DrawInstruction, Renderer, TextLine};
use crate::layout::fit_field;
use crate::metrics::TextMeasurer;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::record::Record;
use crate::units::Pt;
use crate::GridError;

/// Slack allowed when checking whether a line's bottom edge stays inside its cell,
/// so float rounding doesn't drop a line that sits exactly on the edge
const EDGE_TOLERANCE: Pt = Pt(1e-3);

/// Where a record lands: its page, and its column and row on that page
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellPlacement {
    pub record: usize,
    pub page: usize,
    pub column: usize,
    pub row: usize,
}

impl CellPlacement {
    /// Place a record by its index alone. Cells fill left to right, then top to bottom,
    /// and a page holds `columns × rows` of them.
    ///
    /// # Panics
    ///
    /// If `columns` or `rows` is zero. A validated [`GridConfig`] never has either, so
    /// [`GridGeometry::place`] is always safe to call.
    pub fn for_record(record: usize, columns: usize, rows: usize) -> CellPlacement {
        let per_page = columns * rows;
        let cell = record % per_page;
        CellPlacement {
            record,
            page: record / per_page,
            column: cell % columns,
            row: cell / columns,
        }
    }

    /// Whether this record is the first on a page other than the first page
    pub fn starts_new_page(&self) -> bool {
        self.column == 0 && self.row == 0 && self.record != 0
    }
}

/// The resolved geometry of a grid on its page. The margins are whatever is left over
/// once the grid is centred, so they're never configured directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub page_width: Pt,
    pub page_height: Pt,
    pub columns: usize,
    pub rows: usize,
    pub cell_width: Pt,
    pub cell_height: Pt,
    pub spacing: Pt,
    pub margin_x: Pt,
    pub margin_y: Pt,
}

impl GridGeometry {
    pub fn from_config(config: &GridConfig) -> GridGeometry {
        let (page_width, page_height) = config.page.size();
        let grid_width = span(config.columns, config.cell_width, config.cell_spacing);
        let grid_height = span(config.rows, config.cell_height, config.cell_spacing);

        GridGeometry {
            page_width,
            page_height,
            columns: config.columns,
            rows: config.rows,
            cell_width: config.cell_width.into(),
            cell_height: config.cell_height.into(),
            spacing: config.cell_spacing.into(),
            margin_x: (page_width - grid_width) / 2.0,
            margin_y: (page_height - grid_height) / 2.0,
        }
    }

    pub fn page_size(&self) -> PageSize {
        (self.page_width, self.page_height)
    }

    pub fn cells_per_page(&self) -> usize {
        self.columns * self.rows
    }

    pub fn place(&self, record: usize) -> CellPlacement {
        CellPlacement::for_record(record, self.columns, self.rows)
    }

    /// The rectangle of the cell at `column`, `row`, measured from the top-left of the page
    pub fn cell_rect(&self, column: usize, row: usize) -> Rect {
        Rect::from_origin_size(
            self.margin_x + (self.cell_width + self.spacing) * column as f32,
            self.margin_y + (self.cell_height + self.spacing) * row as f32,
            self.cell_width,
            self.cell_height,
        )
    }
}

/// One record's cell and what's drawn in it: the border first, then its text lines
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutCell {
    pub placement: CellPlacement,
    pub rect: Rect,
    pub instructions: Vec<DrawInstruction>,
    /// Lines that didn't fit below the cell's bottom edge and were left out
    pub dropped_lines: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    pub index: usize,
    pub cells: Vec<LaidOutCell>,
}

/// The result of laying out a batch of records, grouped by page
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub page_size: PageSize,
    pub pages: Vec<LaidOutPage>,
}

impl Layout {
    /// All cells in record order
    pub fn cells(&self) -> impl Iterator<Item = &LaidOutCell> {
        self.pages.iter().flat_map(|page| page.cells.iter())
    }

    fn page_start(&self, index: usize) -> DrawInstruction {
        DrawInstruction::PageStart {
            index,
            width: self.page_size.0,
            height: self.page_size.1,
        }
    }

    /// The whole layout as one stream of instructions, each page's cells preceded by a
    /// [`DrawInstruction::PageStart`] marker. A layout without records is a single blank
    /// page, so renderers still learn the page size.
    pub fn instructions(&self) -> Vec<DrawInstruction> {
        if self.pages.is_empty() {
            return vec![self.page_start(0)];
        }

        let mut instructions = Vec::new();
        for page in self.pages.iter() {
            instructions.push(self.page_start(page.index));
            for cell in page.cells.iter() {
                instructions.extend(cell.instructions.iter().cloned());
            }
        }
        instructions
    }

    /// Feed the instruction stream to a renderer, stopping at the first error it reports
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), R::Error> {
        if self.pages.is_empty() {
            return renderer.draw(&self.page_start(0));
        }

        for page in self.pages.iter() {
            renderer.draw(&self.page_start(page.index))?;
            for instruction in page.cells.iter().flat_map(|cell| cell.instructions.iter()) {
                renderer.draw(instruction)?;
            }
        }
        Ok(())
    }
}

/// Lays records out into a grid of cells, fitting each configured field into its cell.
///
/// A `GridLayout` holds only validated configuration; it has no state that changes
/// between calls, so one instance can lay out any number of batches, from any number
/// of threads.
#[derive(Debug, Clone)]
pub struct GridLayout {
    config: GridConfig,
    geometry: GridGeometry,
}

impl GridLayout {
    /// Validate the configuration and prepare to lay out records with it
    pub fn new(config: GridConfig) -> Result<GridLayout, GridError> {
        config.validate()?;
        let geometry = GridGeometry::from_config(&config);
        Ok(GridLayout { config, geometry })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// The width available to text within a cell: the cell less its padding on both sides
    pub fn text_width(&self) -> Pt {
        self.geometry.cell_width - Pt::from(self.config.padding) * 2.0
    }

    pub fn line_height(&self) -> Pt {
        self.config.line_height.into()
    }

    /// Lay out every record, in order, one cell each. Records never fail to lay out:
    /// absent fields are skipped, long text is shrunk and wrapped, and lines that still
    /// don't fit are dropped from the bottom of the cell.
    pub fn layout<M: TextMeasurer + ?Sized>(&self, measurer: &M, records: &[Record]) -> Layout {
        let mut pages: Vec<LaidOutPage> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let placement = self.geometry.place(index);
            if placement.page == pages.len() {
                log::debug!("starting page {} at record {index}", placement.page);
                pages.push(LaidOutPage {
                    index: placement.page,
                    cells: Vec::with_capacity(self.geometry.cells_per_page()),
                });
            }

            let cell = self.layout_cell(measurer, placement, record);
            if cell.dropped_lines > 0 {
                log::debug!(
                    "record {index}: dropped {} line(s) that overflowed the cell",
                    cell.dropped_lines
                );
            }
            if let Some(page) = pages.last_mut() {
                page.cells.push(cell);
            }
        }

        Layout {
            page_size: self.geometry.page_size(),
            pages,
        }
    }

    /// Lay out a single record into the cell at `placement`
    pub fn layout_cell<M: TextMeasurer + ?Sized>(
        &self,
        measurer: &M,
        placement: CellPlacement,
        record: &Record,
    ) -> LaidOutCell {
        let rect = self.geometry.cell_rect(placement.column, placement.row);
        let padding: Pt = self.config.padding.into();
        let text_width = self.text_width();
        let line_height = self.line_height();
        let sizes = self.config.size_range();

        let mut instructions = vec![DrawInstruction::Border {
            rect,
            width: self.config.border_width,
        }];

        // every present field's lines, stacked in field order
        let mut lines: Vec<TextLine> = Vec::new();
        for field in self.config.fields.iter() {
            let Some(text) = record.text(&field.name, &self.config.null_markers) else {
                continue;
            };
            let fitted = fit_field(measurer, text, field.font, text_width, sizes);
            lines.extend(fitted.lines.into_iter().map(|line| TextLine {
                rect,
                text: line,
                font: field.font,
                size: fitted.size,
                alignment: field.alignment,
            }));
        }

        let total_height = line_height * lines.len() as f32;
        let start = if total_height < rect.height() {
            rect.y1 + (rect.height() - total_height) / 2.0
        } else {
            rect.y1
        };

        let mut dropped_lines = 0;
        for (i, mut line) in lines.into_iter().enumerate() {
            let y = start + line_height * i as f32;
            if y + line_height > rect.y2 + EDGE_TOLERANCE {
                dropped_lines += 1;
                continue;
            }
            line.rect = Rect::from_origin_size(rect.x1 + padding, y, text_width, line_height);
            instructions.push(DrawInstruction::Text(line));
        }

        LaidOutCell {
            placement,
            rect,
            instructions,
            dropped_lines,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::FieldSpec;
    use crate::metrics::{AdvanceTable, Advances, FontId};
    use crate::units::Mm;

    fn measurer() -> AdvanceTable {
        let mut table = AdvanceTable::new();
        table.add_font(Advances::monospace(500));
        table.add_font(Advances::monospace(450));
        table
    }

    fn approx(a: Pt, b: Pt) -> bool {
        (a.0 - b.0).abs() < 1e-3
    }

    #[test]
    fn placements_fill_rows_then_pages() {
        let p = CellPlacement::for_record(0, 4, 8);
        assert_eq!((p.page, p.column, p.row), (0, 0, 0));
        assert!(!p.starts_new_page());

        let p = CellPlacement::for_record(5, 4, 8);
        assert_eq!((p.page, p.column, p.row), (0, 1, 1));

        let p = CellPlacement::for_record(31, 4, 8);
        assert_eq!((p.page, p.column, p.row), (0, 3, 7));

        let p = CellPlacement::for_record(32, 4, 8);
        assert_eq!((p.page, p.column, p.row), (1, 0, 0));
        assert!(p.starts_new_page());
    }

    #[test]
    fn placements_repeat_one_page_later() {
        for (columns, rows) in [(4, 8), (3, 3), (1, 5), (2, 1)] {
            let per_page = columns * rows;
            for k in 0..3 * per_page {
                let a = CellPlacement::for_record(k, columns, rows);
                let b = CellPlacement::for_record(k + per_page, columns, rows);
                assert_eq!(b.page, a.page + 1);
                assert_eq!((a.column, a.row), (b.column, b.row));
            }
        }
    }

    #[test]
    #[should_panic]
    fn placing_into_a_grid_without_columns_panics() {
        CellPlacement::for_record(3, 0, 8);
    }

    #[test]
    fn grid_is_centred_on_the_page() {
        let layout = GridLayout::new(GridConfig::default()).expect("valid config");
        let g = layout.geometry();

        // (297 - (4 * 70 + 3)) / 2 = 7mm, (210 - (8 * 23 + 7)) / 2 = 9.5mm
        assert!(approx(g.margin_x, Mm(7.0).into()));
        assert!(approx(g.margin_y, Mm(9.5).into()));

        let last = g.cell_rect(3, 7);
        assert!(approx(g.page_width - last.x2, g.margin_x));
        assert!(approx(g.page_height - last.y2, g.margin_y));

        let second = g.cell_rect(1, 0);
        assert!(approx(second.x1 - g.margin_x, Mm(71.0).into()));
    }

    #[test]
    fn all_absent_record_draws_only_its_border() {
        let layout = GridLayout::new(GridConfig::default()).expect("valid config");
        let record = Record::new()
            .with("Full Name", "")
            .with("Position", "nan")
            .with("Company", "   ");

        let cell = layout.layout_cell(&measurer(), layout.geometry().place(0), &record);
        assert_eq!(cell.instructions.len(), 1);
        assert!(matches!(cell.instructions[0], DrawInstruction::Border { .. }));
    }

    #[test]
    fn lines_are_centred_vertically() {
        let layout = GridLayout::new(GridConfig::default()).expect("valid config");
        let record = Record::new().with("Full Name", "Ada").with("Company", "IBM");
        let cell = layout.layout_cell(&measurer(), layout.geometry().place(0), &record);

        let texts: Vec<&TextLine> = cell
            .instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Text(line) => Some(line),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].font, FontId(0));
        assert_eq!(texts[1].font, FontId(1));

        let above = texts[0].rect.y1 - cell.rect.y1;
        let below = cell.rect.y2 - texts[1].rect.y2;
        assert!(approx(above, below));
        assert!(approx(texts[1].rect.y1 - texts[0].rect.y1, layout.line_height()));
        assert!(approx(texts[0].rect.width(), layout.text_width()));
        assert!(approx(texts[0].rect.x1 - cell.rect.x1, Mm(2.0).into()));
    }

    #[test]
    fn overflowing_lines_are_dropped_from_the_bottom() {
        let config = GridConfig {
            fields: vec![FieldSpec::new("Bio", FontId(0))],
            ..GridConfig::default()
        };
        let layout = GridLayout::new(config).expect("valid config");
        let record = Record::new().with("Bio", lipsum::lipsum_words(80));

        let cell = layout.layout_cell(&measurer(), layout.geometry().place(0), &record);
        let texts: Vec<&DrawInstruction> = cell.instructions.iter().skip(1).collect();

        // 23mm cell, 5.5mm lines: four fit
        assert_eq!(texts.len(), 4);
        assert!(cell.dropped_lines > 0);
        for instruction in texts {
            let DrawInstruction::Text(line) = instruction else {
                panic!("expected text, got {instruction:?}");
            };
            assert!(line.rect.y1 >= cell.rect.y1);
            assert!(line.rect.y2 <= cell.rect.y2 + EDGE_TOLERANCE);
        }
    }

    #[test]
    fn pages_start_where_they_should() {
        let layout = GridLayout::new(GridConfig::default()).expect("valid config");
        let records: Vec<Record> = (0..70)
            .map(|i| Record::new().with("Full Name", format!("Person {i}")))
            .collect();
        let result = layout.layout(&measurer(), &records);

        assert_eq!(result.pages.len(), 3);
        assert_eq!(result.pages[0].cells.len(), 32);
        assert_eq!(result.pages[1].cells.len(), 32);
        assert_eq!(result.pages[2].cells.len(), 6);

        let starts: Vec<usize> = result
            .instructions()
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::PageStart { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec![0, 1, 2]);
    }

    #[test]
    fn no_records_is_one_blank_page() {
        let layout = GridLayout::new(GridConfig::default()).expect("valid config");
        let result = layout.layout(&measurer(), &[]);
        assert!(result.pages.is_empty());

        let (width, height) = layout.geometry().page_size();
        assert_eq!(
            result.instructions(),
            vec![DrawInstruction::PageStart {
                index: 0,
                width,
                height
            }]
        );
    }

    #[test]
    fn invalid_configuration_is_refused_up_front() {
        let config = GridConfig {
            font_size_min: Pt(12.0),
            ..GridConfig::default()
        };
        assert!(matches!(
            GridLayout::new(config),
            Err(GridError::InvalidConfiguration { .. })
        ));
    }
}
