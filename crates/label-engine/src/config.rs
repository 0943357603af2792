//! Layout configuration shared by the composer and the batch assembler.

use qrcode::EcLevel;

/// Millimetres covered by one pixel (96 DPI).
pub const MM_PER_PIXEL: f64 = 0.2645833333;

/// Default label width in millimetres.
pub const DEFAULT_LABEL_WIDTH_MM: f64 = 50.0;

/// Default label height in millimetres.
pub const DEFAULT_LABEL_HEIGHT_MM: f64 = 12.0;

/// Pixel dimensions of a label canvas or a region inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a physical size in millimetres to whole pixels (rounded down).
    pub fn from_mm(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width: mm_to_px(width_mm),
            height: mm_to_px(height_mm),
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::from_mm(DEFAULT_LABEL_WIDTH_MM, DEFAULT_LABEL_HEIGHT_MM)
    }
}

/// Convert millimetres to pixels. Negative or non-finite input yields 0.
pub fn mm_to_px(mm: f64) -> u32 {
    let px = (mm / MM_PER_PIXEL).floor();
    if px.is_finite() && px > 0.0 {
        px as u32
    } else {
        0
    }
}

/// Tunables for fitting and compositing a single label.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub canvas: CanvasSize,
    /// Solid border drawn around every label.
    pub border_px: u32,
    /// Space kept free between text and the label edges.
    pub padding_px: u32,
    /// Line-wrap width used at the start of the fit search.
    pub initial_max_chars: usize,
    /// Upper bound of the fit search.
    pub max_multiplier: u32,
    /// Smallest font size the fit search may try.
    pub min_font_size: u32,
    /// QR module size is `canvas.height / qr_module_divisor` (at least 1).
    pub qr_module_divisor: u32,
    /// Quiet zone around the QR code, in modules.
    pub qr_border_modules: u32,
    pub qr_ec_level: EcLevel,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            border_px: 1,
            padding_px: 6,
            initial_max_chars: 30,
            max_multiplier: 100,
            min_font_size: 8,
            qr_module_divisor: 45,
            qr_border_modules: 1,
            qr_ec_level: EcLevel::L,
        }
    }
}

impl LayoutConfig {
    /// Default configuration with a different canvas size.
    pub fn with_canvas(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    /// Pixel size of one QR module for the configured canvas.
    pub fn qr_module_size(&self) -> u32 {
        (self.canvas.height / self.qr_module_divisor.max(1)).max(1)
    }
}
