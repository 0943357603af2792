//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser};

/// Generate label images with word-wrapped text and an optional QR code.
#[derive(Parser, Debug)]
#[command(name = "label-generator")]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "from_csv"])))]
pub struct Cli {
    /// Text to add on the label
    #[arg(short, long, conflicts_with = "from_csv")]
    pub text: Option<String>,

    /// Data to embed on the label as QR code
    #[arg(long, alias = "qr_data", conflicts_with = "from_csv")]
    pub qr_data: Option<String>,

    /// Read labels from a CSV file (header row, then `text,qr_data` rows)
    #[arg(long, alias = "from_csv", value_name = "FILE")]
    pub from_csv: Option<PathBuf>,

    /// Where to write the PNG image
    #[arg(short, long, alias = "output_path", default_value = "./label.png")]
    pub output_path: PathBuf,

    /// Font file to render with
    #[arg(long, env = "LABEL_GENERATOR_FONT")]
    pub font: Option<PathBuf>,

    /// Label size in millimetres
    #[arg(
        long,
        alias = "label_size",
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        default_values_t = [50.0, 12.0]
    )]
    pub label_size: Vec<f64>,

    /// Render batch labels on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Diagnostic noise level, repeat for more (max 3)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
