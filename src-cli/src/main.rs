//! # Label generator
//!
//! ```bash
//! # Single label
//! label-generator -t "SPARE FUSES 10A" -o fuses.png
//!
//! # With a QR code
//! label-generator -t "Router" --qr-data "https://wiki.example/router" -o router.png
//!
//! # One sheet from a CSV file (header row, then text,qr_data)
//! label-generator --from-csv labels.csv -o sheet.png --label-size 62 29
//! ```

mod cli;
mod config;
mod logging;

use anyhow::Context;
use clap::Parser;
use label_engine::{BatchAssembler, FontRasterizer, LabelComposer, read_records_from_path};

use cli::Cli;
use config::{AppConfig, Job};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    if let Ok(cwd) = std::env::current_dir() {
        tracing::debug!(cwd = %cwd.display(), "Executing label generator");
    }

    let config = AppConfig::from_cli(&cli);
    run(&config)
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    label_engine::validate_output_path(&config.output_path)?;

    let font = FontRasterizer::from_path(&config.font_path)
        .with_context(|| "Use --font or LABEL_GENERATOR_FONT to pick another font")?;
    tracing::debug!(
        width = config.layout.canvas.width,
        height = config.layout.canvas.height,
        font = %config.font_path.display(),
        "Label canvas"
    );
    let composer = LabelComposer::new(&font, config.layout.clone());

    match &config.job {
        Job::Single(spec) => composer.render_to_file(spec, &config.output_path)?,
        Job::Batch(csv_path) => {
            let records = read_records_from_path(csv_path)?;
            tracing::info!(count = records.len(), path = %csv_path.display(), "Rendering batch");
            let assembler = BatchAssembler::new(composer);
            let result = if config.parallel {
                assembler.render_to_file_parallel(&records, &config.output_path)
            } else {
                assembler.render_to_file(&records, &config.output_path)
            };
            result.map_err(|err| {
                tracing::error!(cause = %err.root(), "Batch aborted");
                err
            })?;
        }
    }

    Ok(())
}
