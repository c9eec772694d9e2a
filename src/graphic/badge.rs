//! Synthetic badge fallback for rows without a loaded icon.
//!
//! The badge is deterministic for a given name: a colored square whose hue
//! is derived from the name's character codes, with the name's initials
//! overlaid in white.

use image::{Rgba, RgbaImage};

use crate::color::hsl_to_rgb;
use crate::graphic::text::TextPainter;

const BADGE_SATURATION: f64 = 65.0;
const BADGE_LIGHTNESS: f64 = 45.0;

/// Initials font size as a fraction of the badge edge.
const INITIALS_SCALE: f32 = 0.45;

/// Hue in degrees derived from summing the name's character codes.
pub fn badge_hue(key: &str) -> u32 {
    key.chars().map(|c| c as u32).fold(0u32, u32::wrapping_add) % 360
}

/// The badge's fill color for a given name.
pub fn badge_color(key: &str) -> Rgba<u8> {
    let (r, g, b) = hsl_to_rgb(badge_hue(key) as f64, BADGE_SATURATION, BADGE_LIGHTNESS);
    Rgba([r, g, b, 255])
}

/// Upper-cased initials for a name.
///
/// A single-word name yields its first two letters; otherwise the first
/// letter of each of the first two words. Ampersands separate words.
pub fn initials(key: &str) -> String {
    let words: Vec<&str> = key
        .split(|c: char| c.is_whitespace() || c == '&')
        .filter(|w| !w.is_empty())
        .collect();

    let initials: String = match words.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect(),
    };
    initials.to_uppercase()
}

/// Draws the badge square with centered initials into the icon slot.
pub fn draw_badge(
    image: &mut RgbaImage,
    painter: &impl TextPainter,
    key: &str,
    x: u32,
    y: u32,
    size: u32,
) {
    let fill = badge_color(key);
    for by in y..(y + size).min(image.height()) {
        for bx in x..(x + size).min(image.width()) {
            image.put_pixel(bx, by, fill);
        }
    }

    let text = initials(key);
    if text.is_empty() {
        return;
    }

    let px = size as f32 * INITIALS_SCALE;
    let text_width = painter.text_width(&text, px);
    let text_x = x as f32 + (size as f32 - text_width) / 2.0;
    let text_y = y as f32 + (size as f32 - px) / 2.0;
    painter.draw_text(
        image,
        &text,
        px,
        text_x.round() as i32,
        text_y.round() as i32,
        Rgba([255, 255, 255, 255]),
    );
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_is_deterministic_and_bounded() {
        assert_eq!(badge_hue("Fox"), badge_hue("Fox"));
        for name in ["Fox", "Mr. Game & Watch", "ZeRo", "日本語"] {
            assert!(badge_hue(name) < 360);
        }
        assert_ne!(badge_hue("Fox"), badge_hue("Falco"));
    }

    #[test]
    fn initials_single_word() {
        assert_eq!(initials("Fox"), "FO");
        assert_eq!(initials("x"), "X");
    }

    #[test]
    fn initials_multi_word() {
        assert_eq!(initials("Captain Falcon"), "CF");
        assert_eq!(initials("Young Link Green"), "YL");
    }

    #[test]
    fn ampersand_separates_words() {
        assert_eq!(initials("Game&Watch"), "GW");
        assert_eq!(initials("Mr. Game & Watch"), "MG");
    }

    #[test]
    fn empty_name_has_no_initials() {
        assert_eq!(initials(""), "");
        assert_eq!(initials("  &  "), "");
    }
}
