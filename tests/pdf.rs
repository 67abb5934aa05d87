use badge_grid::layout::GridLayout;
use badge_grid::{
    AdvanceTable, DrawInstruction, FontBook, GridConfig, GridError, Info, PdfDocument, Record,
    Renderer, TextMeasurer,
};
use std::io::Read;

const MONO: &[u8] = include_bytes!("fixtures/DejaVuSansMono.ttf");

/// Names in font 0, everything else in font 1, both the fixture font
fn fixture_fonts() -> FontBook {
    let mut fonts = FontBook::new();
    fonts.load(MONO.to_vec()).expect("fixture font parses");
    fonts.load(MONO.to_vec()).expect("fixture font parses");
    fonts
}

/// Page objects in a written PDF, not counting the page tree
fn page_objects(pdf: &[u8]) -> usize {
    let text = String::from_utf8_lossy(pdf);
    text.match_indices("/Type /Page")
        .filter(|(i, m)| !text[i + m.len()..].starts_with('s'))
        .count()
}

fn blank_records(count: usize) -> Vec<Record> {
    (0..count).map(|_| Record::new()).collect()
}

#[test]
fn one_pdf_page_per_layout_page() {
    let fonts = FontBook::new();
    let grid = GridLayout::new(GridConfig::default()).expect("valid config");
    // no fields present, so only borders are drawn and no fonts are needed
    let layout = grid.layout(&AdvanceTable::new(), &blank_records(65));
    assert_eq!(layout.pages.len(), 3);

    let mut pdf = PdfDocument::new(&fonts);
    pdf.set_info(
        Info::new()
            .title("Badges")
            .author("Registration desk")
            .keywords("badges, attendees"),
    );
    layout.render(&mut pdf).expect("borders render");
    assert_eq!(pdf.page_count(), 3);

    let mut file = tempfile::tempfile().expect("can create a temp file");
    pdf.write(&mut file).expect("can write the PDF");

    let mut written = Vec::new();
    use std::io::Seek;
    file.rewind().expect("can rewind");
    file.read_to_end(&mut written).expect("can read the PDF back");

    assert!(written.starts_with(b"%PDF-"));
    assert_eq!(page_objects(&written), 3);
    assert!(String::from_utf8_lossy(&written).contains("(Badges)"));
}

#[test]
fn an_empty_layout_still_writes_a_page() {
    let fonts = FontBook::new();
    let grid = GridLayout::new(GridConfig::default()).expect("valid config");
    let layout = grid.layout(&AdvanceTable::new(), &[]);

    let mut pdf = PdfDocument::new(&fonts);
    layout.render(&mut pdf).expect("nothing to render");

    let mut written: Vec<u8> = Vec::new();
    pdf.write(&mut written).expect("can write the PDF");
    assert_eq!(page_objects(&written), 1);
}

#[test]
fn text_needs_its_font_in_the_book() {
    let fonts = FontBook::new();
    let grid = GridLayout::new(GridConfig::default()).expect("valid config");
    let mut metrics = AdvanceTable::new();
    metrics.add_font(badge_grid::Advances::monospace(500));
    metrics.add_font(badge_grid::Advances::monospace(500));

    let layout = grid.layout(&metrics, &[Record::new().with("Full Name", "Ada Lovelace")]);
    let mut pdf = PdfDocument::new(&fonts);

    match layout.render(&mut pdf) {
        Err(GridError::UnknownFont(id)) => assert_eq!(id.0, 0),
        other => panic!("expected an unknown font error, got {other:?}"),
    }
    // the page and border made it in before the text failed
    assert_eq!(pdf.page_count(), 1);
}

#[test]
fn garbage_is_not_a_font() {
    let mut fonts = FontBook::new();
    assert!(matches!(
        fonts.load(b"definitely not a font".to_vec()),
        Err(GridError::FontParsing(_))
    ));
    assert!(fonts.is_empty());
}

#[test]
fn renderers_can_be_used_through_a_trait_object() {
    let grid = GridLayout::new(GridConfig::default()).expect("valid config");
    let layout = grid.layout(&AdvanceTable::new(), &blank_records(2));

    let mut collected: Vec<badge_grid::DrawInstruction> = Vec::new();
    {
        let renderer: &mut dyn Renderer<Error = std::convert::Infallible> = &mut collected;
        layout.render(renderer).expect("collecting can't fail");
    }
    assert_eq!(collected, layout.instructions());
}

#[test]
fn an_empty_layout_keeps_the_configured_page_size() {
    let config = GridConfig::from_json(
        r#"{"page": {"paper": "letter", "orientation": "portrait"}, "columns": 3}"#,
    )
    .expect("valid config");
    let grid = GridLayout::new(config).expect("grid fits on letter paper");
    let layout = grid.layout(&AdvanceTable::new(), &[]);
    assert_eq!(layout.page_size, (badge_grid::Pt(612.0), badge_grid::Pt(792.0)));

    let fonts = FontBook::new();
    let mut pdf = PdfDocument::new(&fonts);
    layout.render(&mut pdf).expect("a blank page renders");
    assert_eq!(pdf.page_count(), 1);

    let mut written: Vec<u8> = Vec::new();
    pdf.write(&mut written).expect("can write the PDF");
    assert_eq!(page_objects(&written), 1);
    assert!(String::from_utf8_lossy(&written).contains("/MediaBox [0 0 612 792]"));
}

#[test]
fn records_render_with_embedded_fonts() {
    let fonts = fixture_fonts();
    let grid = GridLayout::new(GridConfig::default()).expect("valid config");
    let records: Vec<Record> = (0..40)
        .map(|i| {
            Record::new()
                .with("Full Name", format!("Attendee {i}"))
                .with("Position", "Director")
                .with("Company", "Example Corporation")
        })
        .collect();

    let layout = grid.layout(&fonts, &records);
    assert_eq!(layout.pages.len(), 2);

    let mut pdf = PdfDocument::new(&fonts);
    layout.render(&mut pdf).expect("both fonts are loaded");
    let mut written: Vec<u8> = Vec::new();
    pdf.write(&mut written).expect("can write the PDF");
    let text = String::from_utf8_lossy(&written);

    assert_eq!(page_objects(&written), 2);
    assert_eq!(text.matches("/Contents ").count(), 2);
    assert_eq!(text.matches("/Subtype /Type0").count(), 2);
    assert_eq!(text.matches("/Subtype /CIDFontType2").count(), 2);
    assert_eq!(text.matches("/ToUnicode ").count(), 2);
    assert_eq!(text.matches("/FontFile2 ").count(), 2);
    assert!(text.contains("/Identity-H"));
}

#[test]
fn unmapped_text_is_wrapped_at_its_drawn_width() {
    let fonts = fixture_fonts();
    let grid = GridLayout::new(GridConfig::default()).expect("valid config");
    let record = Record::new()
        .with("Full Name", "Ada Lovelace")
        .with("Company", "漢字 ".repeat(30));

    let layout = grid.layout(&fonts, &[record]);
    let cell = &layout.pages[0].cells[0];
    let lines: Vec<_> = cell
        .instructions
        .iter()
        .filter_map(|i| match i {
            DrawInstruction::Text(line) => Some(line),
            _ => None,
        })
        .collect();

    let company: Vec<_> = lines.iter().filter(|line| line.text.contains('漢')).collect();
    assert!(
        company.len() + cell.dropped_lines >= 2,
        "expected the company to wrap, got {company:?}"
    );
    for line in lines {
        let width = fonts.width_of(&line.text, line.font, line.size);
        assert!(width > badge_grid::Pt(0.0));
        assert!(width <= grid.text_width(), "{:?} is {width} wide", line.text);
    }
}
