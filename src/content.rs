//! Turns page contents into a PDF content stream.

use crate::font::{base_font_name, FontBook};
use crate::page::{PageContents, SpanFont, SpanLayout};
use pdf_writer::{Content, Name, Str};

/// Renders page contents to an (uncompressed) PDF content stream.
///
/// Outlines are stroked in black inside their own saved graphics state; text is
/// filled in black and only switches font when a span's font differs from the
/// previous one.
pub(crate) fn render_contents(contents: &[PageContents], fonts: &FontBook) -> Vec<u8> {
    let mut content = Content::new();
    let mut current_font: Option<SpanFont> = None;

    content.set_fill_gray(0.0);
    for item in contents.iter() {
        match item {
            PageContents::Outline { rect, line_width } => {
                content.save_state();
                content.set_stroke_gray(0.0);
                content.set_line_width(line_width.0);
                content.rect(rect.x1, rect.y1, rect.x2 - rect.x1, rect.y2 - rect.y1);
                content.stroke();
                content.restore_state();
            }
            PageContents::Text(span) => {
                render_span(&mut content, span, fonts, &mut current_font);
            }
        }
    }

    content.finish()
}

fn render_span(
    content: &mut Content,
    span: &SpanLayout,
    fonts: &FontBook,
    current_font: &mut Option<SpanFont>,
) {
    let Some(font) = fonts.get(span.font.id) else {
        log::warn!("skipping {:?}: {} isn't loaded", span.text, span.font.id);
        return;
    };

    // Identity-H: two bytes of glyph id per character
    let glyphs: Vec<u8> = span
        .text
        .chars()
        .filter_map(|ch| font.glyph_or_replacement(ch))
        .flat_map(u16::to_be_bytes)
        .collect();

    content.begin_text();
    if *current_font != Some(span.font) {
        let name = base_font_name(span.font.id);
        content.set_font(Name(name.as_bytes()), span.font.size.0);
        *current_font = Some(span.font);
    }
    content.next_line(span.coords.0 .0, span.coords.1 .0);
    content.show(Str(&glyphs));
    content.end_text();
}
