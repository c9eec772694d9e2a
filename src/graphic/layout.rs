//! Canvas dimension and row position arithmetic.
//!
//! Layout is computed from measured text widths before anything is drawn.
//! The measurement capability is a trait so the arithmetic is testable
//! without a real font.

use crate::error::{Error, Result};
use crate::graphic::RenderEntry;

/// Fixed header drawn above the rows.
pub const HEADER_TEXT: &str = "TOP 8";

/// Header font size, logical pixels.
pub const HEADER_FONT_PX: f32 = 44.0;
/// Row text font size, logical pixels.
pub const ROW_FONT_PX: f32 = 28.0;

/// Vertical space reserved for the header.
pub const HEADER_HEIGHT: u32 = 64;
/// Gap between header and the first row.
pub const HEADER_GAP: u32 = 16;
/// Height of one entry row.
pub const ROW_HEIGHT: u32 = 48;
/// Horizontal padding on both sides of the content.
pub const PADDING: u32 = 24;
/// Icon slot edge length.
pub const ICON_SIZE: u32 = 40;
/// Gap between a row's text and its icon.
pub const ICON_GAP: u32 = 12;
/// Minimum canvas width regardless of content.
pub const MIN_WIDTH: u32 = 420;
/// Border thickness when a border is requested.
pub const BORDER_THICKNESS: u32 = 10;

/// Text width measurement capability.
pub trait MeasureText {
    /// Width in logical pixels of `text` rendered at `px`.
    fn text_width(&self, text: &str, px: f32) -> f32;
}

// ============================================================================
// Layout Types
// ============================================================================

/// Resolved positions for one row, in logical pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    /// The `"{place}. {name}"` label.
    pub label: String,
    pub text_x: u32,
    pub text_y: u32,
    pub icon_x: u32,
    pub icon_y: u32,
}

/// The complete graphic layout, in logical pixels (before DPR scaling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicLayout {
    /// Canvas width, including border if requested.
    pub width: u32,
    /// Canvas height, including border if requested.
    pub height: u32,
    /// Border thickness; zero when no border was requested. All content
    /// coordinates are already offset by this amount.
    pub border: u32,
    pub header_x: u32,
    pub header_y: u32,
    pub rows: Vec<RowLayout>,
}

// ============================================================================
// Layout Computation
// ============================================================================

/// Computes the canvas size and every row's positions.
///
/// Width is the maximum of (widest row label + icon column + paddings),
/// (header width + paddings) and the minimum floor. Height is the header
/// block plus one fixed-height row per entry. A requested border adds its
/// thickness to both dimensions and offsets all drawing.
///
/// An empty entry list is rejected; no layout is produced for it.
pub fn compute_layout(
    measurer: &impl MeasureText,
    entries: &[RenderEntry],
    add_border: bool,
) -> Result<GraphicLayout> {
    if entries.is_empty() {
        return Err(Error::NoEntries);
    }

    let labels: Vec<String> = entries.iter().map(RenderEntry::label).collect();
    let label_widths: Vec<u32> = labels
        .iter()
        .map(|label| measurer.text_width(label, ROW_FONT_PX).ceil() as u32)
        .collect();
    let widest_label = label_widths.iter().copied().max().unwrap_or(0);
    let header_width = measurer.text_width(HEADER_TEXT, HEADER_FONT_PX).ceil() as u32;

    let content_width = (widest_label + ICON_GAP + ICON_SIZE + 2 * PADDING)
        .max(header_width + 2 * PADDING)
        .max(MIN_WIDTH);
    let content_height = HEADER_HEIGHT + HEADER_GAP + ROW_HEIGHT * entries.len() as u32;

    let border = if add_border { BORDER_THICKNESS } else { 0 };
    let inner_right = border + content_width - PADDING;

    let rows = labels
        .into_iter()
        .zip(label_widths)
        .enumerate()
        .map(|(i, (label, label_width))| {
            let row_top = border + HEADER_HEIGHT + HEADER_GAP + ROW_HEIGHT * i as u32;
            let text_x = border + PADDING;

            // Icon sits right of the text; snap back if it would cross the
            // right padding.
            let mut icon_x = text_x + label_width + ICON_GAP;
            if icon_x + ICON_SIZE > inner_right {
                icon_x = inner_right - ICON_SIZE;
            }

            RowLayout {
                label,
                text_x,
                text_y: row_top + (ROW_HEIGHT - ROW_FONT_PX as u32) / 2,
                icon_x,
                icon_y: row_top + (ROW_HEIGHT - ICON_SIZE) / 2,
            }
        })
        .collect();

    Ok(GraphicLayout {
        width: content_width + 2 * border,
        height: content_height + 2 * border,
        border,
        header_x: border + (content_width - header_width) / 2,
        header_y: border + (HEADER_HEIGHT - HEADER_FONT_PX as u32) / 2,
        rows,
    })
}

// ============================================================================
// Tests
// ============================================================================
