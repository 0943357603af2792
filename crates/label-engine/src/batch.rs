//! Batch rendering: CSV records stacked into one tall sheet.
//!
//! Records are rendered to in-memory canvases and pasted at
//! `index * canvas_height`. The first failing record aborts the batch.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use image::RgbaImage;
use rayon::prelude::*;
use tracing::debug;

use crate::compose::{LabelComposer, LabelSpec, paste};
use crate::error::{LabelError, Result};
use crate::output;
use crate::text::{TextRasterizer, WHITE, filled_image};

/// One row of batch input: label text and an optional QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchRecord {
    pub text: String,
    pub qr_data: Option<String>,
}

impl BatchRecord {
    pub fn new(text: impl Into<String>, qr_data: Option<&str>) -> Self {
        Self {
            text: text.into(),
            qr_data: qr_data.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }

    fn to_spec(&self) -> LabelSpec {
        LabelSpec {
            text: self.text.clone(),
            qr_data: self.qr_data.clone(),
        }
    }
}

/// Parse batch records from CSV.
///
/// The first row is a header and is skipped. Blank rows are ignored. Column
/// one is the text, column two the optional QR payload.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<BatchRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| LabelError::InputFormat(format!("unreadable CSV: {e}")))?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if row.len() > 2 {
            let line = row.position().map_or(0, |p| p.line());
            return Err(LabelError::InputFormat(format!(
                "line {line} has {} columns, expected text and optional QR data",
                row.len()
            )));
        }
        records.push(BatchRecord::new(row.get(0).unwrap_or_default(), row.get(1)));
    }

    debug!(count = records.len(), "Read batch records");
    Ok(records)
}

/// Open `path` and parse it with [`read_records`].
pub fn read_records_from_path(path: &Path) -> Result<Vec<BatchRecord>> {
    let file = File::open(path).map_err(|e| {
        LabelError::InputFormat(format!("cannot read '{}': {e}", path.display()))
    })?;
    read_records(file)
}

/// Stacks composed labels vertically in record order.
pub struct BatchAssembler<'a, R: ?Sized> {
    composer: LabelComposer<'a, R>,
}

impl<'a, R> BatchAssembler<'a, R>
where
    R: TextRasterizer + ?Sized,
{
    pub fn new(composer: LabelComposer<'a, R>) -> Self {
        Self { composer }
    }

    /// Render every record one after another.
    pub fn assemble(&self, records: &[BatchRecord]) -> Result<RgbaImage> {
        let mut sheet = self.blank_sheet(records.len())?;
        for (index, record) in records.iter().enumerate() {
            let label = self.render_record(index, record)?;
            self.place(&mut sheet, index, &label);
        }
        Ok(sheet)
    }

    /// Validate `path`, assemble the sheet and save it as PNG.
    pub fn render_to_file(&self, records: &[BatchRecord], path: &Path) -> Result<()> {
        output::validate_output_path(path)?;
        let sheet = self.assemble(records)?;
        output::save_png(&sheet, path)
    }

    fn blank_sheet(&self, count: usize) -> Result<RgbaImage> {
        if count == 0 {
            return Err(LabelError::InputFormat("no label records to render".into()));
        }
        let canvas = self.composer.config().canvas;
        let height = u32::try_from(count)
            .ok()
            .and_then(|n| n.checked_mul(canvas.height))
            .ok_or_else(|| LabelError::InputFormat(format!("{count} labels exceed image limits")))?;
        debug!(width = canvas.width, height, count, "Allocating batch sheet");
        Ok(filled_image(canvas.width, height, WHITE))
    }

    fn render_record(&self, index: usize, record: &BatchRecord) -> Result<RgbaImage> {
        debug!(index, text = %record.text, qr = ?record.qr_data, "Rendering batch label");
        self.composer
            .compose(&record.to_spec())
            .map_err(|e| LabelError::Record {
                index,
                source: Box::new(e),
            })
    }

    fn place(&self, sheet: &mut RgbaImage, index: usize, label: &RgbaImage) {
        let y = index as i64 * i64::from(self.composer.config().canvas.height);
        paste(sheet, label, 0, y);
    }
}

impl<'a, R> BatchAssembler<'a, R>
where
    R: TextRasterizer + Sync + ?Sized,
{
    /// Render records on the rayon pool, then paste them in record order.
    pub fn assemble_parallel(&self, records: &[BatchRecord]) -> Result<RgbaImage> {
        let mut sheet = self.blank_sheet(records.len())?;
        let rendered: Vec<Result<RgbaImage>> = records
            .par_iter()
            .enumerate()
            .map(|(index, record)| self.render_record(index, record))
            .collect();

        for (index, label) in rendered.into_iter().enumerate() {
            let label = label?;
            self.place(&mut sheet, index, &label);
        }
        Ok(sheet)
    }

    /// Parallel counterpart of [`BatchAssembler::render_to_file`].
    pub fn render_to_file_parallel(&self, records: &[BatchRecord], path: &Path) -> Result<()> {
        output::validate_output_path(path)?;
        let sheet = self.assemble_parallel(records)?;
        output::save_png(&sheet, path)
    }
}
