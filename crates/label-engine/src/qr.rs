//! QR code generation for label images.

use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::error::{LabelError, Result};

/// Render `data` as a square QR bitmap.
///
/// Each module is `module_size` pixels wide and the code is surrounded by a
/// light quiet zone of `border_modules` modules. The smallest QR version that
/// holds `data` at `ec_level` is chosen.
pub fn render_qr(
    data: &str,
    ec_level: EcLevel,
    module_size: u32,
    border_modules: u32,
) -> Result<GrayImage> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level)
        .map_err(|e| LabelError::InputFormat(format!("QR encode error: {e}")))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = module_size.max(1);
    let img_size = (module_count + border_modules * 2) * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let x = (i as u32) % module_count + border_modules;
        let y = (i as u32) / module_count + border_modules;
        for dx in 0..scale {
            for dy in 0..scale {
                img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
            }
        }
    }

    debug!(
        modules = module_count,
        module_size = scale,
        size = img_size,
        "Generated QR code"
    );

    Ok(img)
}
