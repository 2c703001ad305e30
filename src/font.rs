//! TrueType font metrics and rasterisation.
//!
//! Label text is measured with the same font that ends up in the PDF, so
//! wrapping decisions match what is printed. The font file is supplied by
//! the caller (CJK labels need a CJK-capable face such as Microsoft YaHei
//! or Noto Sans SC).

use std::path::Path;
use std::sync::Arc;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};

use crate::error::{HangtagError, Result};

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// A loaded font plus its raw bytes (needed for PDF embedding).
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    bytes: Arc<Vec<u8>>,
    name: String,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("name", &self.name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl LabelFont {
    /// Parse a font from memory. `name` becomes the PDF base font name.
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(bytes.clone())
            .map_err(|e| HangtagError::Font(format!("Failed to parse font '{}': {}", name, e)))?;
        Ok(Self {
            font,
            bytes: Arc::new(bytes),
            name: sanitize_name(name),
        })
    }

    /// Load a `.ttf`/`.otf` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            HangtagError::Font(format!("Failed to read font {}: {}", path.display(), e))
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("LabelFont");
        Self::from_bytes(name, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn units_per_em(&self) -> f32 {
        self.font.units_per_em().unwrap_or(1000.0)
    }

    pub fn glyph_id(&self, ch: char) -> GlyphId {
        self.font.glyph_id(ch)
    }

    /// Advance of a glyph in thousandths of an em (PDF width units).
    pub fn advance_per_mille(&self, id: GlyphId) -> f32 {
        self.font.h_advance_unscaled(id) * 1000.0 / self.units_per_em()
    }

    /// Ascent in thousandths of an em.
    pub fn ascent_per_mille(&self) -> f32 {
        self.font.ascent_unscaled() * 1000.0 / self.units_per_em()
    }

    /// Descent in thousandths of an em (negative below the baseline).
    pub fn descent_per_mille(&self) -> f32 {
        self.font.descent_unscaled() * 1000.0 / self.units_per_em()
    }

    /// Glyph bounding box `[x_min, y_min, x_max, y_max]` in thousandths of an em.
    ///
    /// Read from the `head` table; a font without one falls back to a box
    /// spanning one em horizontally and ascent to descent vertically.
    pub fn bbox_per_mille(&self) -> [i64; 4] {
        match head_bbox(&self.bytes) {
            Some((units_per_em, bbox)) => {
                bbox.map(|v| (f32::from(v) * 1000.0 / f32::from(units_per_em)).round() as i64)
            }
            None => [
                0,
                self.descent_per_mille().round() as i64,
                1000,
                self.ascent_per_mille().round() as i64,
            ],
        }
    }

    /// Width of `text` in millimetres at `size_pt`, summing glyph advances.
    pub fn text_width_mm(&self, text: &str, size_pt: f32) -> f32 {
        let per_mille: f32 = text
            .chars()
            .map(|ch| self.advance_per_mille(self.glyph_id(ch)))
            .sum();
        per_mille / 1000.0 * size_pt * MM_PER_PT
    }

    /// Offset from the vertical middle of the text box to its baseline, in mm.
    ///
    /// The box spans ascent to descent; placing the baseline this far below
    /// a target y centres the glyphs on it.
    pub fn middle_to_baseline_mm(&self, size_pt: f32) -> f32 {
        (self.ascent_per_mille() + self.descent_per_mille()) / 2000.0 * size_pt * MM_PER_PT
    }

    /// ab_glyph scale that renders `size_pt` at the given resolution.
    ///
    /// `PxScale` is the pixel height of ascent minus descent, not the em.
    pub fn px_scale(&self, size_pt: f32, px_per_mm: f32) -> PxScale {
        let em_px = size_pt * MM_PER_PT * px_per_mm;
        PxScale::from(em_px * self.font.height_unscaled() / self.units_per_em())
    }

    /// Rasterise a single line with its baseline at `(x, baseline_y)` pixels.
    ///
    /// `plot` receives pixel coordinates and coverage in `0.0..=1.0`.
    pub fn rasterize<F>(&self, text: &str, scale: PxScale, x: f32, baseline_y: f32, mut plot: F)
    where
        F: FnMut(i32, i32, f32),
    {
        let scaled = self.font.as_scaled(scale);
        let mut caret_x = x;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(caret_x, baseline_y));
            caret_x += scaled.h_advance(glyph_id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|px, py, coverage| {
                    plot(
                        px as i32 + bounds.min.x as i32,
                        py as i32 + bounds.min.y as i32,
                        coverage,
                    );
                });
            }
        }
    }
}

/// `unitsPerEm` and the font-wide bounding box from the `head` table.
fn head_bbox(bytes: &[u8]) -> Option<(u16, [i16; 4])> {
    let u16_at = |at: usize| -> Option<u16> {
        let b = bytes.get(at..at + 2)?;
        Some(u16::from_be_bytes([b[0], b[1]]))
    };
    let u32_at = |at: usize| -> Option<u32> {
        let b = bytes.get(at..at + 4)?;
        Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    };

    let num_tables = usize::from(u16_at(4)?);
    let head = (0..num_tables)
        .map(|i| 12 + i * 16)
        .find(|&record| bytes.get(record..record + 4) == Some(b"head".as_slice()))
        .and_then(|record| u32_at(record + 8))? as usize;

    let units_per_em = u16_at(head + 18).filter(|&u| u > 0)?;
    let coord = |at: usize| u16_at(head + at).map(|v| v as i16);
    Some((units_per_em, [coord(36)?, coord(38)?, coord(40)?, coord(42)?]))
}

/// PDF names may not contain whitespace or delimiters.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "LabelFont".to_string()
    } else {
        cleaned
    }
}

/// DejaVu Sans Mono, shipped with the tests.
#[cfg(test)]
pub(crate) fn test_font() -> LabelFont {
    let bytes = include_bytes!("../tests/fixtures/DejaVuSansMono.ttf").to_vec();
    LabelFont::from_bytes("DejaVu Sans Mono", bytes).expect("fixture font parses")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Noto Sans SC"), "NotoSansSC");
        assert_eq!(sanitize_name("微软雅黑"), "LabelFont");
        assert_eq!(sanitize_name("msyh-bold"), "msyh-bold");
    }

    #[test]
    fn test_invalid_font_bytes() {
        let err = LabelFont::from_bytes("broken", vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, HangtagError::Font(_)));
    }

    #[test]
    fn test_missing_font_file() {
        let err = LabelFont::from_file(Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, HangtagError::Font(_)));
    }

    #[test]
    fn test_mm_per_pt() {
        assert!((72.0 * MM_PER_PT - 25.4).abs() < 1e-4);
    }

    #[test]
    fn test_bbox_from_head_table() {
        let font = test_font();
        assert_eq!(font.name(), "DejaVuSansMono");
        assert_eq!(font.bbox_per_mille(), [-559, -375, 718, 1028]);
    }

    #[test]
    fn test_head_bbox_missing_table() {
        assert_eq!(head_bbox(&[0, 1, 0, 0, 0, 0]), None);
        assert_eq!(head_bbox(b"tiny"), None);
    }

    #[test]
    fn test_monospace_metrics() {
        let font = test_font();
        let a = font.advance_per_mille(font.glyph_id('a'));
        assert_eq!(a, font.advance_per_mille(font.glyph_id('W')));
        // ten glyphs at 10pt: ten times one advance
        let expected = a / 1000.0 * 10.0 * MM_PER_PT * 10.0;
        assert!((font.text_width_mm("abcdefghij", 10.0) - expected).abs() < 1e-3);
        assert!(font.ascent_per_mille() > 0.0);
        assert!(font.descent_per_mille() < 0.0);
    }
}
