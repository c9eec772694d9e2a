//! RGB ↔ HSL color space conversion.
//!
//! These are the canonical piecewise formulas, implemented directly so the
//! colorize filter gets exact, reproducible rounding behavior. Hue is in
//! degrees `[0, 360)`; saturation and lightness are percentages `[0, 100]`.
//! The round trip `hsl_to_rgb(rgb_to_hsl(..))` reproduces the original
//! channels within ±1.

// ============================================================================
// RGB → HSL
// ============================================================================

/// Converts 8-bit RGB channels to HSL.
///
/// Returns `(hue, saturation, lightness)` with hue in degrees `[0, 360)` and
/// saturation/lightness in percent `[0, 100]`. Achromatic inputs (all
/// channels equal) yield hue 0 and saturation 0.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic: hue and saturation are degenerate.
        return (0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let mut h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h /= 6.0;

    (h * 360.0, s * 100.0, l * 100.0)
}

// ============================================================================
// HSL → RGB
// ============================================================================

/// Converts HSL to 8-bit RGB channels.
///
/// Hue is taken in degrees and wrapped into `[0, 360)`, so negative shifts
/// (e.g. a -120° tint) are valid inputs. Saturation and lightness are
/// clamped to `[0, 100]`. Zero saturation yields a pure gray (`r == g == b`).
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let r = hue_to_channel(p, q, h + 1.0 / 3.0);
    let g = hue_to_channel(p, q, h);
    let b = hue_to_channel(p, q, h - 1.0 / 3.0);

    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Evaluates one channel of the (p, q) interpolation at hue offset `t`.
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Luminosity-weighted grayscale value of an RGB pixel.
///
/// Uses the Rec. 601 weights `0.299r + 0.587g + 0.114b`, rounded to the
/// nearest 8-bit value.
pub fn luminosity(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64).round() as u8
}

// ============================================================================
// Tests
// ============================================================================
