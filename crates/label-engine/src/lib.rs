//! Label layout engine.
//!
//! Fits word-wrapped text (and an optional QR code) onto fixed-size label
//! canvases, and stacks batches of labels into a single sheet.

pub mod batch;
pub mod compose;
pub mod config;
pub mod error;
pub mod fit;
pub mod output;
pub mod qr;
pub mod text;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use batch::{BatchAssembler, BatchRecord, read_records, read_records_from_path};
pub use compose::{LabelComposer, LabelSpec};
pub use config::{CanvasSize, LayoutConfig, MM_PER_PIXEL};
pub use error::{LabelError, Result};
pub use fit::{FitResult, fit};
pub use output::{encode_png, save_png, validate_output_path};
pub use text::{FontRasterizer, TextRasterizer};
