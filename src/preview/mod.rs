//! # Label Preview Renderer
//!
//! Draws a label onto a grayscale bitmap through the same [`Surface`]
//! interface the PDF exporter uses, then encodes it as PNG.
//!
//! ## Example
//!
//! ```no_run
//! use hangtag::font::LabelFont;
//! use hangtag::labels::{self, LabelJobConfig};
//! use hangtag::layout::RenderOptions;
//! use hangtag::preview;
//! # let products = vec![];
//!
//! let font = LabelFont::from_file("msyh.ttf".as_ref())?;
//! let config = LabelJobConfig::default();
//! let instances = labels::expand(&products, &config)?;
//! let png = preview::render_preview(&instances[0], &config, &font, &RenderOptions::default(), 300.0)?;
//! # Ok::<(), hangtag::HangtagError>(())
//! ```

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

use crate::error::{HangtagError, Result};
use crate::font::LabelFont;
use crate::labels::{LabelInstance, LabelJobConfig};
use crate::layout::{Rect, RenderOptions, Surface, render_label};

/// Resolution used when the caller does not pick one.
pub const DEFAULT_DPI: f32 = 300.0;

/// Bitmap surface for on-screen previews. No pagination: a new page just
/// clears the canvas.
pub struct RasterSurface {
    font: LabelFont,
    px_per_mm: f32,
    image: GrayImage,
}

impl RasterSurface {
    /// Canvas of `width_mm × height_mm` at `dpi`.
    pub fn new(font: LabelFont, width_mm: f32, height_mm: f32, dpi: f32) -> Self {
        let px_per_mm = dpi / 25.4;
        let width = (width_mm * px_per_mm).round().max(1.0) as u32;
        let height = (height_mm * px_per_mm).round().max(1.0) as u32;
        Self {
            font,
            px_per_mm,
            image: GrayImage::from_pixel(width, height, Luma([255])),
        }
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    /// Darken a pixel by `coverage`, keeping the darkest value seen.
    fn ink(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        let value = (255.0 * (1.0 - coverage.clamp(0.0, 1.0))).round() as u8;
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        pixel.0[0] = pixel.0[0].min(value);
    }

    fn fill_px(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.ink(x, y, 1.0);
            }
        }
    }

    /// Encode the canvas as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| HangtagError::Render(format!("PNG encoding failed: {}", e)))?;
        Ok(bytes)
    }
}

impl Surface for RasterSurface {
    fn measure_text(&self, text: &str, size_pt: f32) -> f32 {
        self.font.text_width_mm(text, size_pt)
    }

    fn draw_rect(&mut self, rect: Rect, stroke_mm: f32) {
        let s = self.px_per_mm;
        let thickness = (stroke_mm * s).round().max(1.0) as i32;
        let half = thickness / 2;
        let x0 = (rect.x * s).round() as i32;
        let y0 = (rect.y * s).round() as i32;
        let x1 = ((rect.x + rect.width) * s).round() as i32;
        let y1 = ((rect.y + rect.height) * s).round() as i32;

        self.fill_px(x0 - half, y0 - half, x1 + half + 1, y0 - half + thickness);
        self.fill_px(x0 - half, y1 - half, x1 + half + 1, y1 - half + thickness);
        self.fill_px(x0 - half, y0 - half, x0 - half + thickness, y1 + half + 1);
        self.fill_px(x1 - half, y0 - half, x1 - half + thickness, y1 + half + 1);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size_pt: f32) {
        let s = self.px_per_mm;
        let baseline = (y + self.font.middle_to_baseline_mm(size_pt)) * s;
        let scale = self.font.px_scale(size_pt, s);
        let font = self.font.clone();
        font.rasterize(text, scale, x * s, baseline, |px, py, coverage| {
            self.ink(px, py, coverage)
        });
    }

    fn new_page(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Luma([255]);
        }
    }
}

/// Render one label instance to PNG bytes at `dpi`.
pub fn render_preview(
    instance: &LabelInstance,
    config: &LabelJobConfig,
    font: &LabelFont,
    options: &RenderOptions,
    dpi: f32,
) -> Result<Vec<u8>> {
    let geometry = &options.geometry;
    let mut surface = RasterSurface::new(font.clone(), geometry.page_width, geometry.page_height, dpi);
    render_label(&mut surface, instance, config.primary_font_size, options);
    surface.to_png()
}
