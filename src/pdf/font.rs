//! Embedding a TrueType font as a composite (Type0) PDF font.
//!
//! Text is written as 2-byte glyph ids (Identity-H), so any glyph in the
//! font can be shown regardless of script. Widths are emitted only for the
//! glyphs actually used; the ToUnicode map keeps the text searchable.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::error::{HangtagError, Result};
use crate::font::LabelFont;

/// Glyph ids used by the document, mapped back to the character drawn.
pub type GlyphUsage = BTreeMap<u16, char>;

/// Maximum entries per `beginbfchar` block.
const BFCHAR_BLOCK: usize = 100;

/// Reject font containers that cannot go into `FontFile2`.
pub fn check_embeddable(font: &LabelFont) -> Result<()> {
    match font.bytes().get(0..4) {
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") => Ok(()),
        Some(b"OTTO") => Err(HangtagError::Font(format!(
            "'{}' has CFF outlines; use a TrueType (.ttf) font",
            font.name()
        ))),
        Some(b"ttcf") => Err(HangtagError::Font(format!(
            "'{}' is a font collection; extract a single .ttf first",
            font.name()
        ))),
        _ => Err(HangtagError::Font(format!(
            "'{}' is not a TrueType font",
            font.name()
        ))),
    }
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

/// Add the font objects to `doc` and return the Type0 font reference.
pub fn embed_font(doc: &mut Document, font: &LabelFont, used: &GlyphUsage) -> ObjectId {
    let ascent = font.ascent_per_mille().round() as i64;
    let descent = font.descent_per_mille().round() as i64;

    let font_file_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => font.bytes().len() as i64 },
        font.bytes().to_vec(),
    ));

    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => name(font.name()),
        "Flags" => 4i64,
        "FontBBox" => font.bbox_per_mille().map(Object::Integer).to_vec(),
        "ItalicAngle" => 0i64,
        "Ascent" => ascent,
        "Descent" => descent,
        "CapHeight" => ascent,
        "StemV" => 80i64,
        "FontFile2" => font_file_id,
    });

    let mut widths = Vec::with_capacity(used.len() * 2);
    for &gid in used.keys() {
        let advance = font.advance_per_mille(ab_glyph::GlyphId(gid)).round() as i64;
        widths.push(Object::Integer(i64::from(gid)));
        widths.push(Object::Array(vec![Object::Integer(advance)]));
    }

    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => name(font.name()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0i64,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000i64,
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });

    let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, to_unicode_cmap(used).into_bytes()));

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => name(font.name()),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    })
}

/// Build the ToUnicode CMap mapping glyph ids to UTF-16BE.
pub fn to_unicode_cmap(used: &GlyphUsage) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = used.iter().collect();
    for block in entries.chunks(BFCHAR_BLOCK) {
        let _ = writeln!(cmap, "{} beginbfchar", block.len());
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect();
            let _ = writeln!(cmap, "<{:04X}> <{}>", gid, hex);
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap
}
