use image::{Rgba, RgbaImage};

use crate::text::TextRasterizer;

/// Deterministic stand-in for a real font.
///
/// Every character advances `ceil(0.6 * size)` pixels and a line is exactly
/// `size` pixels tall. Non-whitespace characters are drawn as solid blocks
/// inset by one pixel, so layouts can be checked pixel by pixel.
pub(crate) struct BlockRasterizer;

impl BlockRasterizer {
    pub(crate) fn advance(size: u32) -> u32 {
        (size * 3).div_ceil(5)
    }
}

impl TextRasterizer for BlockRasterizer {
    fn line_width(&self, size: u32, line: &str) -> u32 {
        Self::advance(size) * line.chars().count() as u32
    }

    fn line_height(&self, size: u32) -> u32 {
        size
    }

    fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        size: u32,
        line: &str,
        color: Rgba<u8>,
    ) {
        let advance = Self::advance(size) as i32;
        for (i, ch) in line.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = x + advance * i as i32;
            for px in left + 1..left + advance - 1 {
                for py in y + 1..y + size as i32 - 1 {
                    let (Ok(px), Ok(py)) = (u32::try_from(px), u32::try_from(py)) else {
                        continue;
                    };
                    if px < canvas.width() && py < canvas.height() {
                        canvas.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}

/// The 189x45 canvas used throughout the label scenarios.
pub(crate) fn scenario_canvas() -> crate::CanvasSize {
    crate::CanvasSize::new(189, 45)
}
