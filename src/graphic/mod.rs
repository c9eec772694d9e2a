//! Top-8 graphic rendering.
//!
//! Given an ordered list of entries, the renderer measures text, computes
//! the canvas size, draws a centered header, one row per entry (place and
//! name, then the character icon or a synthetic badge), an optional border,
//! and exports PNG bytes. Rows render in input order; callers sort by
//! placement before calling.

pub mod badge;
pub mod layout;
pub mod text;

use image::{Rgba, RgbaImage, imageops};

use crate::error::Result;
use crate::filter::encode_png;

use self::badge::draw_badge;
use self::layout::{HEADER_FONT_PX, HEADER_TEXT, ICON_SIZE, ROW_FONT_PX, compute_layout};
use self::text::{FontRenderer, TextPainter};

/// Fixed filename of the exported artifact.
pub const OUTPUT_FILE_NAME: &str = "top8.png";

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([17, 17, 17, 255]);
const BORDER_COLOR: Rgba<u8> = Rgba([17, 17, 17, 255]);

// ============================================================================
// RenderEntry
// ============================================================================

/// One row of the graphic: placement text, entrant name, assigned character
/// and the character's preloaded icon, if any.
///
/// Entries are owned transiently by one render call; the icon is populated
/// by [`IconLibrary::preload`](crate::IconLibrary::preload) before
/// layout and not retained afterward.
#[derive(Debug, Clone, Default)]
pub struct RenderEntry {
    pub place: String,
    pub name: String,
    /// Assigned character; empty when none was chosen.
    pub character: String,
    pub icon: Option<RgbaImage>,
}

impl RenderEntry {
    /// Creates an entry with no icon loaded yet.
    pub fn new(
        place: impl Into<String>,
        name: impl Into<String>,
        character: impl Into<String>,
    ) -> Self {
        Self {
            place: place.into(),
            name: name.into(),
            character: character.into(),
            icon: None,
        }
    }

    /// The row label, `"{place}. {name}"`.
    pub fn label(&self) -> String {
        format!("{}. {}", self.place, self.name)
    }

    /// The name the fallback badge derives its hue and initials from:
    /// the character if one is assigned, the entrant name otherwise.
    pub fn badge_key(&self) -> &str {
        if self.character.is_empty() {
            &self.name
        } else {
            &self.character
        }
    }
}

// ============================================================================
// RenderOptions
// ============================================================================

/// Per-call rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Stroke a border around the graphic.
    pub add_border: bool,

    /// Device pixel ratio. The physical buffer is scaled by this factor
    /// while the logical layout stays unscaled, keeping text and icons
    /// sharp on high-density displays. Values at or below zero fall back
    /// to 1.0.
    pub device_pixel_ratio: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            add_border: false,
            device_pixel_ratio: 1.0,
        }
    }
}

// ============================================================================
// GraphicRenderer
// ============================================================================

/// Renders the standings graphic.
///
/// Generic over the text capability so layout and drawing are testable
/// without a font file; production code uses [`FontRenderer`].
pub struct GraphicRenderer<P: TextPainter = FontRenderer> {
    painter: P,
}

impl GraphicRenderer<FontRenderer> {
    /// Creates a renderer from raw font data.
    pub fn from_font_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self::new(FontRenderer::from_bytes(data)?))
    }

    /// Creates a renderer from a font file.
    pub fn from_font_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(FontRenderer::from_file(path)?))
    }
}

impl<P: TextPainter> GraphicRenderer<P> {
    /// Creates a renderer with the given text capability.
    pub fn new(painter: P) -> Self {
        Self { painter }
    }

    /// Renders the graphic into an RGBA canvas.
    ///
    /// An empty entry list yields [`Error::NoEntries`](crate::Error::NoEntries)
    /// and no canvas.
    pub fn render(&self, entries: &[RenderEntry], options: &RenderOptions) -> Result<RgbaImage> {
        let layout = compute_layout(&self.painter, entries, options.add_border)?;
        let dpr = if options.device_pixel_ratio > 0.0 {
            options.device_pixel_ratio
        } else {
            1.0
        };
        let scale = |v: u32| (v as f32 * dpr).round() as u32;

        log::debug!(
            "rendering {} rows at {}x{} logical, dpr {dpr}",
            entries.len(),
            layout.width,
            layout.height
        );

        let mut canvas = RgbaImage::from_pixel(scale(layout.width), scale(layout.height), BACKGROUND);

        self.painter.draw_text(
            &mut canvas,
            HEADER_TEXT,
            HEADER_FONT_PX * dpr,
            scale(layout.header_x) as i32,
            scale(layout.header_y) as i32,
            TEXT_COLOR,
        );

        let slot = scale(ICON_SIZE);
        for (entry, row) in entries.iter().zip(&layout.rows) {
            self.painter.draw_text(
                &mut canvas,
                &row.label,
                ROW_FONT_PX * dpr,
                scale(row.text_x) as i32,
                scale(row.text_y) as i32,
                TEXT_COLOR,
            );

            match &entry.icon {
                Some(icon) => place_icon(
                    &mut canvas,
                    icon,
                    scale(row.icon_x),
                    scale(row.icon_y),
                    slot,
                ),
                None => draw_badge(
                    &mut canvas,
                    &self.painter,
                    entry.badge_key(),
                    scale(row.icon_x),
                    scale(row.icon_y),
                    slot,
                ),
            }
        }

        if layout.border > 0 {
            stroke_border(&mut canvas, scale(layout.border), BORDER_COLOR);
        }

        Ok(canvas)
    }

    /// Renders and PNG-encodes the graphic.
    pub fn render_png(&self, entries: &[RenderEntry], options: &RenderOptions) -> Result<Vec<u8>> {
        encode_png(&self.render(entries, options)?)
    }
}

/// Resizes an icon into its slot and blends it over the canvas.
///
/// The canvas is opaque everywhere it is drawn on (background fill, border
/// stroke), so source-over reduces to an integer lerp on the color channels
/// and the destination stays opaque.
fn place_icon(canvas: &mut RgbaImage, icon: &RgbaImage, x: u32, y: u32, slot: u32) {
    let resized = imageops::resize(icon, slot, slot, imageops::FilterType::Triangle);
    for (sx, sy, src) in resized.enumerate_pixels() {
        let (cx, cy) = (x + sx, y + sy);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let alpha = src.0[3] as u32;
        if alpha == 0 {
            continue;
        }

        let dst = canvas.get_pixel_mut(cx, cy);
        if alpha == 255 {
            *dst = Rgba([src.0[0], src.0[1], src.0[2], 255]);
            continue;
        }
        let lerp = |s: u8, d: u8| ((s as u32 * alpha + d as u32 * (255 - alpha) + 127) / 255) as u8;
        *dst = Rgba([
            lerp(src.0[0], dst.0[0]),
            lerp(src.0[1], dst.0[1]),
            lerp(src.0[2], dst.0[2]),
            255,
        ]);
    }
}

/// Strokes a border of thickness `t` fully inside the canvas bounds.
///
/// Equivalent to stroking a rectangle inset by half the thickness: the
/// stroke occupies exactly the outermost `t` pixels on each side.
fn stroke_border(canvas: &mut RgbaImage, t: u32, color: Rgba<u8>) {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        if x < t || y < t || x >= w - t || y >= h - t {
            *pixel = color;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use super::layout::{BORDER_THICKNESS, HEADER_GAP, HEADER_HEIGHT, MeasureText, ROW_HEIGHT};

    /// Fixed-advance painter that fills the text's bounding box, so tests
    /// can assert where text landed without rasterizing glyphs.
    struct BlockPainter;

    impl MeasureText for BlockPainter {
        fn text_width(&self, text: &str, _px: f32) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    impl TextPainter for BlockPainter {
        fn draw_text(
            &self,
            image: &mut RgbaImage,
            text: &str,
            px: f32,
            x: i32,
            y: i32,
            color: Rgba<u8>,
        ) {
            let width = self.text_width(text, px) as i32;
            for dy in 0..px as i32 {
                for dx in 0..width {
                    let (tx, ty) = (x + dx, y + dy);
                    if tx >= 0 && ty >= 0 && (tx as u32) < image.width() && (ty as u32) < image.height()
                    {
                        image.put_pixel(tx as u32, ty as u32, color);
                    }
                }
            }
        }
    }

    fn renderer() -> GraphicRenderer<BlockPainter> {
        GraphicRenderer::new(BlockPainter)
    }

    fn entries(n: usize) -> Vec<RenderEntry> {
        (1..=n)
            .map(|i| RenderEntry::new(i.to_string(), format!("player{i}"), "Fox"))
            .collect()
    }

    #[test]
    fn empty_entries_produce_no_canvas() {
        let err = renderer()
            .render(&[], &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, crate::Error::NoEntries));
    }

    #[test]
    fn eight_rows_have_expected_dimensions() {
        let canvas = renderer()
            .render(&entries(8), &RenderOptions::default())
            .unwrap();
        assert_eq!(canvas.height(), HEADER_HEIGHT + HEADER_GAP + 8 * ROW_HEIGHT);
        assert!(canvas.width() >= layout::MIN_WIDTH);
    }

    #[test]
    fn border_adds_twice_the_thickness_and_is_stroked() {
        let list = entries(2);
        let plain = renderer().render(&list, &RenderOptions::default()).unwrap();
        let options = RenderOptions {
            add_border: true,
            ..RenderOptions::default()
        };
        let bordered = renderer().render(&list, &options).unwrap();

        assert_eq!(bordered.width(), plain.width() + 2 * BORDER_THICKNESS);
        assert_eq!(bordered.height(), plain.height() + 2 * BORDER_THICKNESS);

        // Corners and edge midpoints carry the border color.
        assert_eq!(bordered.get_pixel(0, 0), &BORDER_COLOR);
        assert_eq!(
            bordered.get_pixel(bordered.width() - 1, bordered.height() - 1),
            &BORDER_COLOR
        );
        assert_eq!(bordered.get_pixel(bordered.width() / 2, 0), &BORDER_COLOR);
        // Just inside the border the background shows.
        assert_eq!(
            bordered.get_pixel(BORDER_THICKNESS, bordered.height() / 2),
            &BACKGROUND
        );
    }

    #[test]
    fn device_pixel_ratio_scales_the_physical_buffer() {
        let list = entries(3);
        let logical = renderer().render(&list, &RenderOptions::default()).unwrap();
        let options = RenderOptions {
            device_pixel_ratio: 2.0,
            ..RenderOptions::default()
        };
        let physical = renderer().render(&list, &options).unwrap();

        assert_eq!(physical.width(), logical.width() * 2);
        assert_eq!(physical.height(), logical.height() * 2);
    }

    #[test]
    fn missing_icon_falls_back_to_badge_without_affecting_others() {
        let mut list = entries(3);
        list[0].icon = Some(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255])));
        list[2].icon = Some(RgbaImage::from_pixel(8, 8, Rgba([0, 255, 0, 255])));
        // list[1] has no icon: badge fallback.

        let canvas = renderer().render(&list, &RenderOptions::default()).unwrap();
        let layout = compute_layout(&BlockPainter, &list, false).unwrap();

        let center = |row: &layout::RowLayout| {
            (row.icon_x + ICON_SIZE / 2, row.icon_y + ICON_SIZE / 2)
        };

        // Resampling a solid color can shift channels by a rounding step;
        // check dominance rather than exact bytes.
        let (x0, y0) = center(&layout.rows[0]);
        let p0 = canvas.get_pixel(x0, y0).0;
        assert!(p0[2] > 200 && p0[0] < 50, "row 0 icon should be blue, got {p0:?}");

        let (x2, y2) = center(&layout.rows[2]);
        let p2 = canvas.get_pixel(x2, y2).0;
        assert!(p2[1] > 200 && p2[0] < 50, "row 2 icon should be green, got {p2:?}");

        // The badge center may carry the white initials overlay; sample a
        // corner of the badge square for the fill color instead.
        let badge = badge::badge_color(list[1].badge_key());
        let corner = canvas.get_pixel(layout.rows[1].icon_x, layout.rows[1].icon_y);
        assert_eq!(corner, &badge);
    }

    #[test]
    fn semi_transparent_icon_blends_over_the_background() {
        let mut list = entries(1);
        list[0].icon = Some(RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 128])));

        let canvas = renderer().render(&list, &RenderOptions::default()).unwrap();
        let layout = compute_layout(&BlockPainter, &list, false).unwrap();
        let row = &layout.rows[0];
        let p = canvas
            .get_pixel(row.icon_x + ICON_SIZE / 2, row.icon_y + ICON_SIZE / 2)
            .0;

        // Half-strength blue over white: red and green lose about half,
        // blue stays saturated, and the canvas stays opaque.
        assert!(p[0] > 100 && p[0] < 160, "got {p:?}");
        assert!(p[2] > 200, "got {p:?}");
        assert_eq!(p[3], 255);
    }

    #[test]
    fn transparent_icon_pixels_leave_the_background_untouched() {
        let mut list = entries(1);
        list[0].icon = Some(RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 0])));

        let canvas = renderer().render(&list, &RenderOptions::default()).unwrap();
        let layout = compute_layout(&BlockPainter, &list, false).unwrap();
        let row = &layout.rows[0];
        let p = canvas
            .get_pixel(row.icon_x + ICON_SIZE / 2, row.icon_y + ICON_SIZE / 2)
            .0;
        assert_eq!(p, BACKGROUND.0);
    }

    #[test]
    fn header_text_is_centered() {
        let list = entries(1);
        let canvas = renderer().render(&list, &RenderOptions::default()).unwrap();
        let layout = compute_layout(&BlockPainter, &list, false).unwrap();

        let header_width = BlockPainter.text_width(HEADER_TEXT, HEADER_FONT_PX) as u32;
        assert_eq!(
            layout.header_x,
            (canvas.width() - header_width) / 2
        );
        // A pixel inside the header block is text-colored.
        assert_eq!(
            canvas.get_pixel(layout.header_x + 1, layout.header_y + 1),
            &TEXT_COLOR
        );
    }
}
