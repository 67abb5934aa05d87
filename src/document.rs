use crate::{
    config::Alignment,
    draw::{DrawInstruction, Renderer, TextLine},
    font::FontBook,
    info::Info,
    page::{Page, SpanFont, SpanLayout},
    pagesize::{PageSize, PageSpec},
    refs::{ObjectRefs, RefType},
    units::Pt,
    GridError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

/// A [`Renderer`] that builds a PDF from draw instructions, then writes it out with a
/// call to [`PdfDocument::write`].
///
/// Every font in the [`FontBook`] is embedded, and each text line is set in black,
/// centred vertically on its line box and placed horizontally by its alignment.
pub struct PdfDocument<'f> {
    fonts: &'f FontBook,
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    current: Option<Id<Page>>,
    /// The size of the blank page written when nothing was drawn
    pub blank_page_size: PageSize,
}

impl<'f> PdfDocument<'f> {
    pub fn new(fonts: &'f FontBook) -> PdfDocument<'f> {
        PdfDocument {
            fonts,
            info: None,
            pages: Arena::new(),
            page_order: Vec::new(),
            current: None,
            blank_page_size: PageSpec::default().size(),
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Add a page to the end of the document and make it the one drawn on
    pub fn start_page(&mut self, width: Pt, height: Pt) -> Id<Page> {
        let id = self.pages.alloc(Page::new(width, height));
        self.page_order.push(id);
        self.current = Some(id);
        id
    }

    fn current_page(&mut self) -> Result<&mut Page, GridError> {
        self.current
            .and_then(|id| self.pages.get_mut(id))
            .ok_or(GridError::NoPage)
    }

    fn add_text(&mut self, line: &TextLine) -> Result<(), GridError> {
        let fonts = self.fonts;
        let font = fonts.get(line.font).ok_or(GridError::UnknownFont(line.font))?;
        let page = self.current_page()?;
        let page_height = page.height();

        let width = font.width_of_text(&line.text, line.size);
        let x = match line.alignment {
            Alignment::Left => line.rect.x1,
            Alignment::Center => line.rect.x1 + (line.rect.width() - width) / 2.0,
            Alignment::Right => line.rect.x2 - width,
        };

        // centre the glyph box (ascent to descent) on the line box
        let ascent = font.ascent(line.size);
        let glyph_height = ascent - font.descent(line.size);
        let baseline = line.rect.y1 + (line.rect.height() - glyph_height) / 2.0 + ascent;

        page.add_span(SpanLayout {
            text: line.text.clone(),
            font: SpanFont {
                id: line.font,
                size: line.size,
            },
            coords: (x, page_height - baseline),
        });
        Ok(())
    }

    /// Write the entire document to the writer. The whole document is rendered in memory
    /// first. A document nothing was drawn on still gets one blank page.
    pub fn write<W: Write>(mut self, mut w: W) -> Result<(), GridError> {
        if self.page_order.is_empty() {
            let (width, height) = self.blank_page_size;
            self.start_page(width, height);
        }

        let PdfDocument {
            fonts,
            info,
            pages,
            page_order,
            ..
        } = self;

        let mut refs = ObjectRefs::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, (id, page_ref)) in page_order.iter().zip(page_refs).enumerate() {
            pages[*id].write(&mut refs, page_ref, page_tree_id, page_index, fonts, &mut writer);
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        log::debug!("writing PDF with {} page(s)", page_order.len());
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

impl Renderer for PdfDocument<'_> {
    type Error = GridError;

    fn draw(&mut self, instruction: &DrawInstruction) -> Result<(), GridError> {
        match instruction {
            DrawInstruction::PageStart { width, height, .. } => {
                self.start_page(*width, *height);
            }
            DrawInstruction::Border { rect, width } => {
                let page = self.current_page()?;
                let pdf_rect = rect.to_pdf(page.height());
                page.add_outline(pdf_rect, *width);
            }
            DrawInstruction::Text(line) => self.add_text(line)?,
        }
        Ok(())
    }
}
