//! Single label composition: geometry, text placement, QR overlay and border.

use std::path::Path;

use image::{GrayImage, Rgba, RgbaImage};
use tracing::debug;

use crate::config::{CanvasSize, LayoutConfig};
use crate::error::{LabelError, Result};
use crate::fit::{self, FitResult};
use crate::output;
use crate::qr;
use crate::text::{BLACK, TextRasterizer, WHITE, filled_image};

/// Content of one label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelSpec {
    pub text: String,
    pub qr_data: Option<String>,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            qr_data: None,
        }
    }

    pub fn with_qr(mut self, data: impl Into<String>) -> Self {
        self.qr_data = Some(data.into());
        self
    }

    /// QR payload, treating an empty string as absent.
    pub fn qr_payload(&self) -> Option<&str> {
        self.qr_data.as_deref().filter(|data| !data.is_empty())
    }
}

/// Renders [`LabelSpec`]s onto fixed-size canvases.
pub struct LabelComposer<'a, R: ?Sized> {
    rasterizer: &'a R,
    config: LayoutConfig,
}

impl<'a, R> LabelComposer<'a, R>
where
    R: TextRasterizer + ?Sized,
{
    pub fn new(rasterizer: &'a R, config: LayoutConfig) -> Self {
        Self { rasterizer, config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Render one label. The result is always exactly the configured canvas size.
    pub fn compose(&self, spec: &LabelSpec) -> Result<RgbaImage> {
        let canvas = self.config.canvas;
        let border = self.config.border_px;

        let qr_img = match spec.qr_payload() {
            Some(data) => {
                let module_size = self.config.qr_module_size();
                debug!(module_size, "Generating QR code");
                Some(qr::render_qr(
                    data,
                    self.config.qr_ec_level,
                    module_size,
                    self.config.qr_border_modules,
                )?)
            }
            None => None,
        };
        let qr_width = qr_img.as_ref().map_or(0, GrayImage::width);

        let region = CanvasSize::new(
            canvas.width.saturating_sub(qr_width + 2 * border),
            canvas.height.saturating_sub(2 * border),
        );
        debug!(width = region.width, height = region.height, "Label text region");
        if region.width == 0 || region.height == 0 {
            return Err(LabelError::TextTooLarge {
                chars: spec.text.chars().count(),
            });
        }

        let fit = fit::fit(&spec.text, region, self.rasterizer, &self.config)?;
        let text_img = self.draw_text_region(region, &fit);

        let label = match qr_img {
            Some(qr_img) => self.composite_with_qr(&text_img, &qr_img),
            None => expand_border(&text_img, border, BLACK),
        };
        Ok(label)
    }

    /// Validate `path`, render the label and save it as PNG.
    pub fn render_to_file(&self, spec: &LabelSpec, path: &Path) -> Result<()> {
        output::validate_output_path(path)?;
        let label = self.compose(spec)?;
        output::save_png(&label, path)
    }

    /// White text region with the fitted block left-aligned and vertically
    /// centred against the full canvas height.
    fn draw_text_region(&self, region: CanvasSize, fit: &FitResult) -> RgbaImage {
        let mut img = filled_image(region.width, region.height, WHITE);
        let y = (self.config.canvas.height as i32 - fit.height as i32) / 2;
        self.rasterizer.draw_block(
            &mut img,
            self.config.border_px as i32,
            y,
            fit.font_size,
            &fit.lines,
            BLACK,
        );
        img
    }

    /// Black frame, white inset, text region, then the QR code right-aligned
    /// and vertically centred. The QR is pasted last and may cover the frame.
    fn composite_with_qr(&self, text_img: &RgbaImage, qr_img: &GrayImage) -> RgbaImage {
        let canvas = self.config.canvas;
        let border = self.config.border_px;

        let mut label = filled_image(canvas.width, canvas.height, BLACK);
        let inset = filled_image(
            canvas.width.saturating_sub(2 * border),
            canvas.height.saturating_sub(2 * border),
            WHITE,
        );
        paste(&mut label, &inset, border as i64, border as i64);
        paste(&mut label, text_img, border as i64, border as i64);

        let qr_rgba = image::DynamicImage::ImageLuma8(qr_img.clone()).to_rgba8();
        let qr_x = canvas.width as i64 - qr_rgba.width() as i64;
        let qr_y = (canvas.height as i64 - qr_rgba.height() as i64) / 2;
        debug!(qr_x, qr_y, size = qr_rgba.width(), "Placing QR code");
        paste(&mut label, &qr_rgba, qr_x, qr_y);

        label
    }
}

/// Copy `top` onto `base` with its top-left corner at `(x, y)`.
///
/// Parts falling outside `base` are clipped.
pub fn paste(base: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    image::imageops::replace(base, top, x, y);
}

/// Surround `img` with a solid frame `border` pixels wide.
pub fn expand_border(img: &RgbaImage, border: u32, color: Rgba<u8>) -> RgbaImage {
    let mut framed = filled_image(img.width() + 2 * border, img.height() + 2 * border, color);
    paste(&mut framed, img, border as i64, border as i64);
    framed
}
