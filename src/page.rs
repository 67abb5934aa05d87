use crate::content::render_contents;
use crate::font::{base_font_name, FontBook};
use crate::metrics::FontId;
use crate::refs::{ObjectRefs, RefType};
use crate::units::*;
use pdf_writer::{Filter, Finish, Name, Pdf, Rect, Ref};

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: FontId,
    pub size: Pt,
}

/// A run of text placed at its baseline, in PDF coordinates
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    /// A stroked rectangle outline
    Outline { rect: Rect, line_width: Pt },
}

/// A page being built up by a [`PdfDocument`](crate::PdfDocument)
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect::new(0.0, 0.0, width.0, height.0),
            contents: Vec::default(),
        }
    }

    pub fn height(&self) -> Pt {
        Pt(self.media_box.y2 - self.media_box.y1)
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_outline(&mut self, rect: Rect, line_width: Pt) {
        self.contents.push(PageContents::Outline { rect, line_width });
    }

    /// Write the page object and its content stream. `id` must already be listed in
    /// the page tree `parent`.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectRefs,
        id: Ref,
        parent: Ref,
        page_index: usize,
        fonts: &FontBook,
        writer: &mut Pdf,
    ) {
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box);
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id)) {
                resource_fonts.pair(Name(base_font_name(font_id).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents, fonts);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            rendered.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);
    }
}
