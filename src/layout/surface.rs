//! Drawing surface abstraction shared by the PDF exporter and previews.

use super::geometry::Rect;

/// A target the label layout can be drawn onto.
///
/// Coordinates are millimetres from the top-left corner of the current
/// page; font sizes are points. Implementations own their units and
/// y-axis direction internally.
pub trait Surface {
    /// Rendered width of `text` in mm at `size_pt`.
    ///
    /// Must reflect the real font used by [`Surface::draw_text`]; wrapping
    /// depends on it.
    fn measure_text(&self, text: &str, size_pt: f32) -> f32;

    /// Stroke the outline of `rect`.
    fn draw_rect(&mut self, rect: Rect, stroke_mm: f32);

    /// Draw a single line with its left edge at `x` and its vertical middle
    /// at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size_pt: f32);

    /// Start a fresh page.
    fn new_page(&mut self);
}

/// How text weight is produced.
///
/// `Restamp` thickens strokes of a regular-weight font by drawing the same
/// text several times at tiny offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoldStrategy {
    /// Draw once.
    Single,
    /// Draw at (0,0), (+d,0), (0,+d) and (+d,+d), `d` in mm.
    Restamp { delta_mm: f32 },
}

impl BoldStrategy {
    /// Offset used by the default faux-bold.
    pub const DEFAULT_DELTA_MM: f32 = 0.1;

    /// Offsets at which each text run is stamped.
    pub fn offsets(&self) -> Vec<(f32, f32)> {
        match *self {
            BoldStrategy::Single => vec![(0.0, 0.0)],
            BoldStrategy::Restamp { delta_mm: d } => vec![(0.0, 0.0), (d, 0.0), (0.0, d), (d, d)],
        }
    }
}

impl Default for BoldStrategy {
    fn default() -> Self {
        BoldStrategy::Restamp {
            delta_mm: Self::DEFAULT_DELTA_MM,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory surface with a predictable monospace-ish measure.

    use super::*;
    use crate::font::MM_PER_PT;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Rect(Rect, f32),
        Text {
            text: String,
            x: f32,
            y: f32,
            size: f32,
        },
        NewPage,
    }

    /// Wide (CJK) characters measure 1 em, everything else half an em.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<Call>,
    }

    impl RecordingSurface {
        pub fn texts(&self) -> Vec<&Call> {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::Text { .. }))
                .collect()
        }

        pub fn pages(&self) -> usize {
            1 + self.calls.iter().filter(|c| **c == Call::NewPage).count()
        }
    }

    impl Surface for RecordingSurface {
        fn measure_text(&self, text: &str, size_pt: f32) -> f32 {
            let ems: f32 = text
                .chars()
                .map(|c| if crate::layout::wrap::is_wide(c) { 1.0 } else { 0.5 })
                .sum();
            ems * size_pt * MM_PER_PT
        }

        fn draw_rect(&mut self, rect: Rect, stroke_mm: f32) {
            self.calls.push(Call::Rect(rect, stroke_mm));
        }

        fn draw_text(&mut self, text: &str, x: f32, y: f32, size_pt: f32) {
            self.calls.push(Call::Text {
                text: text.to_string(),
                x,
                y,
                size: size_pt,
            });
        }

        fn new_page(&mut self) {
            self.calls.push(Call::NewPage);
        }
    }
}
