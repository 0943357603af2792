//! Output path validation and PNG persistence.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::error::{LabelError, Result};

/// Required extension of output files.
pub const OUTPUT_EXTENSION: &str = "png";

/// Reject any output path that does not end in `.png`.
pub fn validate_output_path(path: &Path) -> Result<()> {
    let valid = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(OUTPUT_EXTENSION));
    if valid {
        Ok(())
    } else {
        Err(LabelError::InvalidOutputPath(path.to_path_buf()))
    }
}

/// Encode an image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Save an image as PNG after checking the path's extension.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    validate_output_path(path)?;
    debug!(path = %path.display(), "Saving image");
    img.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), "Image saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{WHITE, filled_image};

    #[test]
    fn png_extension_is_accepted() {
        assert!(validate_output_path(Path::new("label.png")).is_ok());
        assert!(validate_output_path(Path::new("/tmp/out/LABEL.PNG")).is_ok());
    }

    #[test]
    fn other_extensions_are_rejected() {
        for path in ["label.jpg", "label", "label.png.bak", "png"] {
            let err = validate_output_path(Path::new(path)).unwrap_err();
            assert!(
                matches!(err, LabelError::InvalidOutputPath(ref p) if p == Path::new(path)),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn encoded_png_has_signature() {
        let bytes = encode_png(&filled_image(4, 4, WHITE)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn save_png_refuses_bad_extension_without_writing() {
        let path = std::env::temp_dir().join(format!("label-engine-{}.jpg", std::process::id()));
        let err = save_png(&filled_image(4, 4, WHITE), &path).unwrap_err();
        assert!(matches!(err, LabelError::InvalidOutputPath(_)));
        assert!(!path.exists());
    }
}
