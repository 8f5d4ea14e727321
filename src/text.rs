//! Single-line text rasterization for text-bearing overlays.
//!
//! Font resolution walks a prioritized list of common system font locations;
//! when none resolve, a blocky placeholder renderer takes over so an overlay
//! never fails for want of a font.

use std::sync::OnceLock;

use fontdue::{Font, FontSettings};
use tracing::debug;

use crate::frame::Frame;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn system_font() -> Option<&'static Font> {
    static CELL: OnceLock<Option<Font>> = OnceLock::new();
    CELL.get_or_init(|| {
        for path in FONT_CANDIDATES {
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            match Font::from_bytes(bytes, FontSettings::default()) {
                Ok(font) => {
                    debug!(path, "resolved overlay font");
                    return Some(font);
                }
                Err(err) => {
                    debug!(path, err, "candidate font failed to parse");
                }
            }
        }
        debug!("no system font resolved, using block renderer");
        None
    })
    .as_ref()
}

/// Rasterize one line of text as an RGBA layer sized to its content.
/// Falls back to block glyphs when no system font is available.
pub fn render_text(text: &str, size: f32, color: [u8; 4]) -> Frame {
    match system_font() {
        Some(font) => render_with_font(font, text, size, color),
        None => render_blocks(text, size, color),
    }
}

fn render_with_font(font: &Font, text: &str, size: f32, color: [u8; 4]) -> Frame {
    let [r, g, b, a] = color;

    let mut total_width: i32 = 0;
    let mut max_ascent: i32 = 0;
    let mut max_descent: i32 = 0;
    for ch in text.chars() {
        let (metrics, _) = font.rasterize(ch, size);
        let ascent = metrics.height as i32 + metrics.ymin;
        let descent = -metrics.ymin;
        max_ascent = max_ascent.max(ascent);
        max_descent = max_descent.max(descent);
        total_width += metrics.advance_width as i32;
    }

    let canvas_w = total_width.max(1) as u32;
    let canvas_h = (max_ascent + max_descent).max(1) as u32;
    let mut layer = Frame::new(canvas_w, canvas_h);

    let mut cursor_x: i32 = 0;
    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, size);
        let glyph_x = cursor_x + metrics.xmin;
        let glyph_y = max_ascent - (metrics.height as i32 + metrics.ymin);
        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let coverage = bitmap[gy * metrics.width + gx];
                if coverage == 0 {
                    continue;
                }
                let px = glyph_x + gx as i32;
                let py = glyph_y + gy as i32;
                if px >= 0 && px < layer.width as i32 && py >= 0 && py < layer.height as i32 {
                    let alpha =
                        ((u16::from(coverage) * u16::from(a) + 127) / 255).min(255) as u8;
                    layer.put_pixel(px as u32, py as u32, [r, g, b, alpha]);
                }
            }
        }
        cursor_x += metrics.advance_width as i32;
    }

    layer
}

/// Unstyled fallback: one filled block per non-space character.
fn render_blocks(text: &str, size: f32, color: [u8; 4]) -> Frame {
    let advance = (size * 0.7).max(2.0) as u32;
    let glyph_w = (size * 0.55).max(1.0) as u32;
    let glyph_h = (size * 0.8).max(2.0) as u32;
    let count = text.chars().count() as u32;

    let canvas_w = (count * advance).max(1);
    let canvas_h = glyph_h.max(1);
    let mut layer = Frame::new(canvas_w, canvas_h);

    for (i, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let x0 = i as u32 * advance;
        for y in 0..glyph_h {
            for x in 0..glyph_w {
                layer.put_pixel(x0 + x, y, color);
            }
        }
    }
    layer
}
