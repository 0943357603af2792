//! Text measuring, wrapping and drawing for label canvases.
//!
//! [`TextRasterizer`] is the seam between the layout engine and the glyph
//! renderer. [`FontRasterizer`] implements it on top of `ab_glyph` and
//! `imageproc`.

use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

use crate::error::{LabelError, Result};

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Measures and draws single lines of text at a given font size.
pub trait TextRasterizer {
    /// Pixel width of `line` rendered at `size`.
    fn line_width(&self, size: u32, line: &str) -> u32;

    /// Natural line height at `size`.
    fn line_height(&self, size: u32) -> u32;

    /// Draw `line` with its top-left corner at `(x, y)`.
    fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        size: u32,
        line: &str,
        color: Rgba<u8>,
    );

    /// Size of a block of lines: widest line by line count x line height.
    fn measure_block(&self, size: u32, lines: &[String]) -> (u32, u32) {
        let width = lines
            .iter()
            .map(|line| self.line_width(size, line))
            .max()
            .unwrap_or(0);
        let height = self.line_height(size) * lines.len() as u32;
        (width, height)
    }

    /// Draw a block of lines, one line height apart, starting at `(x, y)`.
    fn draw_block(
        &self,
        canvas: &mut RgbaImage,
        x: i32,
        y: i32,
        size: u32,
        lines: &[String],
        color: Rgba<u8>,
    ) {
        let lh = self.line_height(size) as i32;
        for (i, line) in lines.iter().enumerate() {
            self.draw_line(canvas, x, y + lh * i as i32, size, line, color);
        }
    }
}

/// Rasterizer backed by a TrueType/OpenType font file.
pub struct FontRasterizer {
    font: FontVec,
}

impl FontRasterizer {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|e| LabelError::ResourceUnavailable(format!("invalid font data: {e}")))?;
        Ok(Self { font })
    }

    /// Load a font file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            LabelError::ResourceUnavailable(format!("cannot read font '{}': {e}", path.display()))
        })?;
        debug!(path = %path.display(), bytes = data.len(), "Loaded font file");
        Self::from_bytes(data)
    }

    /// Scale for a font size given in pixels per em.
    fn scale(&self, size: u32) -> PxScale {
        em_scale(&self.font, size as f32)
    }
}

impl TextRasterizer for FontRasterizer {
    fn line_width(&self, size: u32, line: &str) -> u32 {
        measure_text_width(&self.font, self.scale(size), line)
    }

    fn line_height(&self, size: u32) -> u32 {
        line_height(&self.font, self.scale(size))
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
        draw_text_mut(canvas, color, x, y, self.scale(size), &self.font, line);
    }
}

/// Convert an em size into the `PxScale` ab_glyph expects (ascent to descent).
pub fn em_scale(font: &impl Font, em_px: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(em_px * font.height_unscaled() / upem),
        _ => PxScale::from(em_px),
    }
}

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width(font: &impl Font, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Compute the line height for the given font and scale.
pub fn line_height(font: &impl Font, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
}

/// Greedily wrap `text` into lines of at most `width` characters.
///
/// Whitespace runs collapse to a single space and never start or end a line.
/// Words longer than `width` are split, with the first piece filling what is
/// left of the current line.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut rest = word;
        let mut rest_len = word.chars().count();
        let sep = usize::from(!current.is_empty());

        if current_len + sep + rest_len <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(rest);
            current_len += sep + rest_len;
            continue;
        }

        if rest_len > width {
            let space_left = width.saturating_sub(current_len + sep);
            if space_left > 0 {
                if sep == 1 {
                    current.push(' ');
                }
                let (head, tail) = split_at_char(rest, space_left);
                current.push_str(head);
                rest = tail;
                rest_len -= space_left;
            }
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        while rest_len > width {
            let (head, tail) = split_at_char(rest, width);
            lines.push(head.to_string());
            rest = tail;
            rest_len -= width;
        }

        current.push_str(rest);
        current_len = rest_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(idx)
}

/// Create a solid RGBA image.
pub fn filled_image(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}
