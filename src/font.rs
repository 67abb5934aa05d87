use crate::{
    metrics::{FontId, TextMeasurer},
    refs::{ObjectRefs, RefType},
    units::Pt,
    GridError,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A glyph the font maps at least one unicode codepoint to
#[derive(Debug, Copy, Clone)]
struct Glyph {
    ch: char,
    advance: u16,
}

/// A parsed font object. Fonts can be TTF or OTF fonts, and will be embedded in their
/// entirety in the generated PDF, so large fonts may dramatically increase the size of
/// the generated PDF.
///
/// The unicode glyphs of the font are indexed once at load time; measuring and
/// embedding both read from that index.
pub struct Font {
    pub face: OwnedFace,
    glyphs: BTreeMap<u16, Glyph>,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, GridError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let glyphs = index_glyphs(face.as_face_ref());
        log::debug!("loaded font with {} unicode glyphs", glyphs.len());

        Ok(Font { face, glyphs })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.name_entry(owned_ttf_parser::name_id::FAMILY)
    }

    fn name_entry(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph to draw for `ch`: its own glyph, or the replacement character, or '?'
    pub fn glyph_or_replacement(&self, ch: char) -> Option<u16> {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
    }

    /// Calculate the width of a given string of text at the given size. Characters the
    /// font has no glyph for are measured as the glyph drawn in their place.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scaling(size);
        text.chars()
            .filter_map(|ch| self.glyph_or_replacement(ch))
            .map(|gid| {
                scaling * self.face().glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32
            })
            .sum()
    }

    pub(crate) fn write(&self, refs: &mut ObjectRefs, id: FontId, writer: &mut Pdf) {
        let font_ref = refs.gen(RefType::Font(id));
        let cid_ref = self.write_cid(refs, id, writer);
        let to_unicode_ref = self.write_to_unicode(refs, id, writer);

        let mut font = writer.type0_font(font_ref);
        font.base_font(Name(base_font_name(id).as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_ref);
        font.to_unicode(to_unicode_ref);
    }

    fn write_cid(&self, refs: &mut ObjectRefs, id: FontId, writer: &mut Pdf) -> Ref {
        let descriptor_ref = self.write_descriptor(refs, id, writer);
        let cid_ref = refs.gen(RefType::CidFont(id));
        let to_pdf_units = 1000.0 / self.face().units_per_em() as f32;

        let mut cid_font = writer.cid_font(cid_ref);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font_name(id).as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_ref);
        cid_font.default_width(1000.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        // widths go out as runs of consecutive glyph ids
        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (&gid, glyph) in self.glyphs.iter() {
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => {}
                Some(start) => {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                }
                None => run_start = Some(gid),
            }
            run.push(glyph.advance as f32 * to_pdf_units);
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();

        cid_ref
    }

    fn write_descriptor(&self, refs: &mut ObjectRefs, id: FontId, writer: &mut Pdf) -> Ref {
        let data_ref = refs.gen(RefType::FontData(id));
        writer
            .stream(data_ref, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let to_pdf_units = 1000.0 / face.units_per_em() as f32;
        let max_advance = self
            .glyphs
            .values()
            .map(|g| g.advance)
            .max()
            .unwrap_or_default() as f32;
        let avg_advance = if self.glyphs.is_empty() {
            0.0
        } else {
            self.glyphs.values().map(|g| g.advance as f32).sum::<f32>() / self.glyphs.len() as f32
        };

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let bbox = face.global_bounding_box();
        let name = self.name().unwrap_or_else(|| base_font_name(id));

        let descriptor_ref = refs.gen(RefType::FontDescriptor(id));
        let mut descriptor = writer.font_descriptor(descriptor_ref);
        descriptor.name(Name(name.replace(' ', "").as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * to_pdf_units,
            y1: bbox.y_min as f32 * to_pdf_units,
            x2: bbox.x_max as f32 * to_pdf_units,
            y2: bbox.y_max as f32 * to_pdf_units,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * to_pdf_units);
        descriptor.descent(face.descender() as f32 * to_pdf_units);
        descriptor.leading(face.line_gap() as f32 * to_pdf_units);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * to_pdf_units)
                .unwrap_or(face.ascender() as f32 * to_pdf_units),
        );
        // TODO: derive from the OS/2 weight class instead of a fixed guess
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_advance * to_pdf_units);
        descriptor.max_width(max_advance * to_pdf_units);
        descriptor.missing_width(max_advance * to_pdf_units);
        descriptor.font_file2(data_ref);

        descriptor_ref
    }

    fn write_to_unicode(&self, refs: &mut ObjectRefs, id: FontId, writer: &mut Pdf) -> Ref {
        let to_unicode_ref = refs.gen(RefType::ToUnicode(id));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries each
        let glyphs: Vec<(&u16, &Glyph)> = self.glyphs.iter().collect();
        for block in glyphs.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, glyph) in block {
                let mut utf16 = [0u16; 2];
                let units: String = glyph
                    .ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        writer
            .stream(to_unicode_ref, compressed.as_slice())
            .filter(Filter::FlateDecode);

        to_unicode_ref
    }
}

/// The resource name a font is known by on every page
pub(crate) fn base_font_name(id: FontId) -> String {
    format!("F{}", id.0)
}

fn index_glyphs(face: &Face<'_>) -> BTreeMap<u16, Glyph> {
    let mut glyphs: BTreeMap<u16, Glyph> = BTreeMap::new();
    let Some(cmap) = face.tables().cmap else {
        return glyphs;
    };

    for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
        subtable.codepoints(|codepoint| {
            let Ok(ch) = char::try_from(codepoint) else {
                return;
            };
            let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) else {
                return;
            };
            let advance = face.glyph_hor_advance(GlyphId(gid.0)).unwrap_or_default();
            glyphs.entry(gid.0).or_insert(Glyph { ch, advance });
        });
    }

    glyphs
}

/// The fonts available to a layout and its renderer. Fonts are referred to by the
/// [`FontId`] returned when they're added, which stays valid for the life of the book.
#[derive(Default)]
pub struct FontBook {
    fonts: Vec<Font>,
}

impl FontBook {
    pub fn new() -> FontBook {
        FontBook::default()
    }

    /// Add a font to the book, returning the id to refer to it by
    pub fn add_font(&mut self, font: Font) -> FontId {
        self.fonts.push(font);
        FontId(self.fonts.len() - 1)
    }

    /// Parse a font from raw bytes and add it to the book
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<FontId, GridError> {
        Ok(self.add_font(Font::load(bytes)?))
    }

    pub fn get(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FontId, &Font)> {
        self.fonts
            .iter()
            .enumerate()
            .map(|(i, font)| (FontId(i), font))
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl TextMeasurer for FontBook {
    fn width_of(&self, text: &str, font: FontId, size: Pt) -> Pt {
        self.get(font)
            .map(|font| font.width_of_text(text, size))
            .unwrap_or_default()
    }
}
