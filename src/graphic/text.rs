//! Glyph measurement and drawing via rusttype.

use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};

use crate::error::{Error, Result};
use crate::graphic::layout::MeasureText;

/// Text drawing capability.
///
/// The renderer is generic over this trait so layout and drawing logic can
/// be exercised without a real font file.
pub trait TextPainter: MeasureText {
    /// Draws `text` at `px` with its top-left corner at `(x, y)`,
    /// alpha-blending glyph coverage over the existing pixels.
    fn draw_text(&self, image: &mut RgbaImage, text: &str, px: f32, x: i32, y: i32, color: Rgba<u8>);
}

// ============================================================================
// FontRenderer
// ============================================================================

/// A [`TextPainter`] backed by a TrueType/OpenType font.
pub struct FontRenderer {
    font: Font<'static>,
}

impl FontRenderer {
    /// Parses font data into a renderer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(data).ok_or(Error::FontData)?;
        Ok(Self { font })
    }

    /// Reads and parses a font file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }
}

impl MeasureText for FontRenderer {
    fn text_width(&self, text: &str, px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let scale = Scale::uniform(px);
        let v_metrics = self.font.v_metrics(scale);
        self.font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .filter_map(|glyph| glyph.pixel_bounding_box())
            .fold(0.0f32, |width, bb| width.max(bb.max.x as f32))
    }
}

impl TextPainter for FontRenderer {
    fn draw_text(
        &self,
        image: &mut RgbaImage,
        text: &str,
        px: f32,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) {
        let scale = Scale::uniform(px);
        let v_metrics = self.font.v_metrics(scale);
        let baseline = y as f32 + v_metrics.ascent;
        let mut caret = x as f32;

        for ch in text.chars() {
            let glyph = self
                .font
                .glyph(ch)
                .scaled(scale)
                .positioned(point(caret, baseline));

            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || py < 0 {
                        return;
                    }
                    let (px, py) = (px as u32, py as u32);
                    if px >= image.width() || py >= image.height() {
                        return;
                    }
                    if coverage <= 0.0 {
                        return;
                    }

                    let dst = image.get_pixel_mut(px, py);
                    let inv = 1.0 - coverage;
                    dst.0 = [
                        (color.0[0] as f32 * coverage + dst.0[0] as f32 * inv) as u8,
                        (color.0[1] as f32 * coverage + dst.0[1] as f32 * inv) as u8,
                        (color.0[2] as f32 * coverage + dst.0[2] as f32 * inv) as u8,
                        dst.0[3].max((coverage * 255.0) as u8),
                    ];
                });
            }
            caret += glyph.unpositioned().h_metrics().advance_width;
        }
    }
}
