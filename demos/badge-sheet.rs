//! Lays out a JSON list of attendees as a sheet of badges.
//!
//! ```text
//! cargo run --example badge-sheet --features demo -- \
//!     attendees.json fonts/Muli-Black.ttf fonts/DINRegular.ttf badges.pdf [config.json]
//! ```
//!
//! `attendees.json` is an array of objects with `Full Name`, `Position` and `Company`
//! keys. Set `RUST_LOG=badge_grid=debug` to see pages and overflowing lines as they're
//! laid out.

use badge_grid::layout::GridLayout;
use badge_grid::{records_from_json, FontBook, GridConfig, GridError, Info, PdfDocument};

fn main() -> Result<(), GridError> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        eprintln!(
            "usage: badge-sheet <records.json> <name font> <body font> <output.pdf> [config.json]"
        );
        std::process::exit(2);
    }

    // font 0 sets names, font 1 positions and companies, matching the default config
    let mut fonts = FontBook::new();
    fonts.load(std::fs::read(&args[1])?)?;
    fonts.load(std::fs::read(&args[2])?)?;

    let config = match args.get(4) {
        Some(path) => GridConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GridConfig::default(),
    };
    let grid = GridLayout::new(config)?;

    let records = records_from_json(&std::fs::read_to_string(&args[0])?)?;
    let layout = grid.layout(&fonts, &records);
    let dropped: usize = layout.cells().map(|cell| cell.dropped_lines).sum();
    if dropped > 0 {
        log::warn!("{dropped} line(s) didn't fit their cells and were left out");
    }

    let mut pdf = PdfDocument::new(&fonts);
    pdf.set_info(Info::new().title("Badges"));
    layout.render(&mut pdf)?;

    let out = std::fs::File::create(&args[3])?;
    pdf.write(out)?;
    log::info!(
        "wrote {} badge(s) over {} page(s) to {}",
        records.len(),
        layout.pages.len(),
        args[3]
    );

    Ok(())
}
