//! Image filter engine: optional background removal, then a colorize pass
//! and an optional lightness shift, pixel by pixel.
//!
//! The colorize pass always runs, even with a zero hue/saturation tint: each
//! pixel is reduced to its luminosity-weighted gray, the gray's lightness is
//! extracted through HSL, and the pixel is rebuilt from the requested hue and
//! saturation at that lightness. Alpha is never touched.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_rgb, luminosity, rgb_to_hsl};
use crate::error::{Error, Result};
use crate::matting::BackgroundRemover;

// ============================================================================
// FilterParams
// ============================================================================

/// Parameters for one filter invocation. Nothing persists between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    /// Tint hue in degrees, -180 to 180.
    pub hue_shift: f64,

    /// Tint saturation, -100 to 100. Negative values desaturate fully.
    pub saturation_adjust: f64,

    /// Lightness delta, -100 to 100. Zero skips the lightness pass.
    pub lightness_adjust: f64,

    /// Whether to send the image through the background-removal service
    /// before the pixel passes.
    #[serde(default)]
    pub remove_background: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            hue_shift: 0.0,
            saturation_adjust: 0.0,
            lightness_adjust: 0.0,
            remove_background: false,
        }
    }
}

// ============================================================================
// FilterEngine
// ============================================================================

/// Applies the filter pipeline to encoded images.
///
/// The background-removal step is delegated to an injected
/// [`BackgroundRemover`] so the pixel passes stay testable without a network.
/// An engine without a remover rejects any request that asks for removal
/// before doing any other work.
#[derive(Default)]
pub struct FilterEngine {
    remover: Option<Box<dyn BackgroundRemover>>,
}

impl FilterEngine {
    /// Creates an engine with no background-removal capability.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that can remove backgrounds via the given client.
    pub fn with_remover(remover: Box<dyn BackgroundRemover>) -> Self {
        Self {
            remover: Some(remover),
        }
    }

    /// Runs the full pipeline on an encoded image and returns PNG bytes.
    ///
    /// Order: background removal (if requested), decode, colorize, lightness
    /// shift (if nonzero), encode. A removal failure aborts the whole
    /// operation before any decoding happens; it is not retried.
    pub fn apply(&self, image_bytes: &[u8], params: &FilterParams) -> Result<Vec<u8>> {
        let bytes = if params.remove_background {
            let remover = self
                .remover
                .as_ref()
                .ok_or(Error::MissingApiKey("background removal"))?;
            remover.remove_background(image_bytes)?
        } else {
            image_bytes.to_vec()
        };

        let mut image = image::load_from_memory(&bytes)
            .map_err(Error::ImageDecode)?
            .to_rgba8();

        colorize(&mut image, params.hue_shift, params.saturation_adjust);
        if params.lightness_adjust != 0.0 {
            adjust_lightness(&mut image, params.lightness_adjust);
        }

        encode_png(&image)
    }
}

// ============================================================================
// Pixel Passes
// ============================================================================

/// Replaces every pixel's color with a tint of its own gray lightness.
///
/// The hue and saturation of the gray are degenerate and discarded; only the
/// lightness survives into the rebuilt pixel. Alpha is preserved.
pub fn colorize(image: &mut RgbaImage, hue: f64, saturation: f64) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }

        let gray = luminosity(r, g, b);
        let (_, _, lightness) = rgb_to_hsl(gray, gray, gray);
        let (nr, ng, nb) = hsl_to_rgb(hue, saturation, lightness);
        pixel.0 = [nr, ng, nb, a];
    }
}

/// Shifts every pixel's lightness by `delta`, clamped to [0, 100].
pub fn adjust_lightness(image: &mut RgbaImage, delta: f64) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }

        let (h, s, l) = rgb_to_hsl(r, g, b);
        let (nr, ng, nb) = hsl_to_rgb(h, s, (l + delta).clamp(0.0, 100.0));
        pixel.0 = [nr, ng, nb, a];
    }
}

/// Encodes an RGBA buffer as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .map_err(Error::ImageEncode)?;
    Ok(bytes)
}

// ============================================================================
// Tests
// ============================================================================
