//! # PDF Surface
//!
//! A [`Surface`] that records each page as PDF content operations and
//! writes a complete document on [`PdfSurface::finish`].
//!
//! ## Coordinates
//!
//! ```text
//! Surface (mm, y down)          PDF user space (pt, y up)
//! (0,0) ┌──────────┐            ┌──────────┐ (w,h)
//!       │          │     ──►    │          │
//!       └──────────┘ (90,50)    └──────────┘
//!                          (0,0)
//! x_pt = x_mm × 72/25.4          y_pt = (50 − y_mm) × 72/25.4
//! ```

mod font;

pub use font::{GlyphUsage, check_embeddable, to_unicode_cmap};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, StringFormat, dictionary};
use tracing::debug;

use crate::error::{HangtagError, Result};
use crate::font::{LabelFont, MM_PER_PT};
use crate::layout::{Rect, Surface};

/// Resource name of the embedded font.
const FONT_RESOURCE: &str = "F1";

#[inline]
fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Paginated PDF output with one embedded font.
pub struct PdfSurface {
    font: LabelFont,
    page_width_mm: f32,
    page_height_mm: f32,
    pages: Vec<Vec<Operation>>,
    glyphs: GlyphUsage,
}

impl PdfSurface {
    /// Start a document whose first page is already open.
    pub fn new(font: LabelFont, page_width_mm: f32, page_height_mm: f32) -> Result<Self> {
        check_embeddable(&font)?;
        Ok(Self {
            font,
            page_width_mm,
            page_height_mm,
            pages: vec![Vec::new()],
            glyphs: GlyphUsage::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn flip_y(&self, y_mm: f32) -> f32 {
        pt(self.page_height_mm - y_mm)
    }

    fn current_page(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Encode text as big-endian glyph ids, remembering which were used.
    fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for ch in text.chars() {
            let gid = self.font.glyph_id(ch).0;
            self.glyphs.entry(gid).or_insert(ch);
            bytes.extend_from_slice(&gid.to_be_bytes());
        }
        bytes
    }

    /// Write the document and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = font::embed_font(&mut doc, &self.font, &self.glyphs);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_RESOURCE => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations }
                .encode()
                .map_err(|e| HangtagError::Render(format!("Failed to encode page: {}", e)))?;
            let content_id = doc.add_object(lopdf::Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    real(0.0),
                    real(0.0),
                    real(pt(self.page_width_mm)),
                    real(pt(self.page_height_mm)),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| HangtagError::Render(format!("Failed to write PDF: {}", e)))?;

        debug!(pages = count, glyphs = self.glyphs.len(), bytes = bytes.len(), "wrote PDF");
        Ok(bytes)
    }
}

impl Surface for PdfSurface {
    fn measure_text(&self, text: &str, size_pt: f32) -> f32 {
        self.font.text_width_mm(text, size_pt)
    }

    fn draw_rect(&mut self, rect: Rect, stroke_mm: f32) {
        let bottom = self.flip_y(rect.y + rect.height);
        let ops = vec![
            Operation::new("q", vec![]),
            Operation::new("w", vec![real(pt(stroke_mm))]),
            Operation::new(
                "re",
                vec![
                    real(pt(rect.x)),
                    real(bottom),
                    real(pt(rect.width)),
                    real(pt(rect.height)),
                ],
            ),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ];
        self.current_page().extend(ops);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size_pt: f32) {
        if text.is_empty() {
            return;
        }
        let baseline = self.flip_y(y + self.font.middle_to_baseline_mm(size_pt));
        let encoded = self.encode(text);
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT_RESOURCE.into(), real(size_pt)]),
            Operation::new("Td", vec![real(pt(x)), real(baseline)]),
            Operation::new("Tj", vec![Object::String(encoded, StringFormat::Hexadecimal)]),
            Operation::new("ET", vec![]),
        ];
        self.current_page().extend(ops);
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }
}
