//! Application configuration resolved once at startup from CLI arguments and
//! the environment.

use std::path::{Path, PathBuf};

use label_engine::{CanvasSize, LabelSpec, LayoutConfig};

use crate::cli::Cli;

#[cfg(target_os = "linux")]
const SYSTEM_FONT: &str = "/usr/share/fonts/truetype/ubuntu/Ubuntu-B.ttf";
#[cfg(target_os = "macos")]
const SYSTEM_FONT: &str = "/Library/Fonts/Arial.ttf";
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
const SYSTEM_FONT: &str = r"C:\Windows\Fonts\arial.ttf";

/// What to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Single(LabelSpec),
    Batch(PathBuf),
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub font_path: PathBuf,
    pub output_path: PathBuf,
    pub layout: LayoutConfig,
    pub parallel: bool,
    pub job: Job,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let font_path = cli.font.clone().unwrap_or_else(default_font_path);
        let output_path =
            std::path::absolute(&cli.output_path).unwrap_or_else(|_| cli.output_path.clone());

        let (width_mm, height_mm) = match cli.label_size.as_slice() {
            [w, h] => (*w, *h),
            _ => (
                label_engine::config::DEFAULT_LABEL_WIDTH_MM,
                label_engine::config::DEFAULT_LABEL_HEIGHT_MM,
            ),
        };
        let layout = LayoutConfig::with_canvas(CanvasSize::from_mm(width_mm, height_mm));

        let job = match &cli.from_csv {
            Some(path) => Job::Batch(path.clone()),
            None => Job::Single(LabelSpec {
                text: cli.text.clone().unwrap_or_default(),
                qr_data: cli.qr_data.clone().filter(|d| !d.is_empty()),
            }),
        };

        Self {
            font_path,
            output_path,
            layout,
            parallel: cli.parallel,
            job,
        }
    }
}

/// Platform font used when neither `--font` nor `LABEL_GENERATOR_FONT` is given.
///
/// Prefers the system-wide font, then the same file in the user's font
/// directory. Falls back to the system path so the error names it.
pub fn default_font_path() -> PathBuf {
    let system = PathBuf::from(SYSTEM_FONT);
    if system.exists() {
        return system;
    }
    user_font(&system).unwrap_or(system)
}

fn user_font(system: &Path) -> Option<PathBuf> {
    let candidate = dirs::font_dir()?.join(system.file_name()?);
    candidate.exists().then_some(candidate)
}
