//! Font size and line-wrap search for label text.
//!
//! The search walks a multiplier `m` from 1 upwards. At each step the font
//! size is `available_height - 2m` and every tenth step the wrap width loses
//! two characters. The first step whose wrapped block fits inside the
//! available region wins, so the result is the largest usable font under
//! this schedule rather than a global optimum.

use tracing::debug;

use crate::config::{CanvasSize, LayoutConfig};
use crate::error::{LabelError, Result};
use crate::text::{TextRasterizer, wrap_chars};

/// Accepted font size and wrapping for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitResult {
    pub font_size: u32,
    pub max_chars_per_line: usize,
    pub lines: Vec<String>,
    /// Width of the widest line in pixels.
    pub width: u32,
    /// Height of the whole block in pixels.
    pub height: u32,
    /// Search step that produced this fit.
    pub multiplier: u32,
}

/// Find the first font size and wrap width at which `text` fits in `available`.
///
/// Fails with [`LabelError::TextTooLarge`] when the font would drop below
/// `config.min_font_size` or the search runs out of steps.
pub fn fit<R>(
    text: &str,
    available: CanvasSize,
    rasterizer: &R,
    config: &LayoutConfig,
) -> Result<FitResult>
where
    R: TextRasterizer + ?Sized,
{
    let chars = text.chars().count();
    let max_width = i64::from(available.width) - i64::from(config.padding_px / 2);
    let max_height = i64::from(available.height) - i64::from(config.padding_px);
    let mut max_chars = config.initial_max_chars;

    for multiplier in 1..=config.max_multiplier {
        let font_size = i64::from(available.height) - 2 * i64::from(multiplier);
        if font_size < i64::from(config.min_font_size) {
            debug!(font_size, chars, "Font size below readable minimum");
            return Err(LabelError::TextTooLarge { chars });
        }
        let font_size = font_size as u32;

        if multiplier % 10 == 0 {
            max_chars = max_chars.saturating_sub(2).max(1);
        }

        let lines = wrap_chars(text, max_chars);
        let (width, height) = rasterizer.measure_block(font_size, &lines);

        if i64::from(width) <= max_width && i64::from(height) <= max_height {
            debug!(max_width, max_height, width, height, "Text block fits");
            debug!(font_size, max_chars, multiplier, chars, "Accepted fit");
            return Ok(FitResult {
                font_size,
                max_chars_per_line: max_chars,
                lines,
                width,
                height,
                multiplier,
            });
        }
    }

    debug!(chars, steps = config.max_multiplier, "Fit search exhausted");
    Err(LabelError::TextTooLarge { chars })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::BlockRasterizer;
    use pretty_assertions::assert_eq;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn single_word_takes_largest_font_that_fits_height() {
        let result = fit("HELLO", CanvasSize::new(187, 43), &BlockRasterizer, &config()).unwrap();
        // Height limit is 43 - 6 = 37 and block line height equals font size
        assert_eq!(result.font_size, 37);
        assert_eq!(result.multiplier, 3);
        assert_eq!(result.lines, vec!["HELLO"]);
        assert_eq!(result.max_chars_per_line, 30);
        assert_eq!(result.height, 37);
    }

    #[test]
    fn result_respects_both_limits() {
        let texts = [
            "HI",
            "PART 4711 SHELF B",
            "the quick brown fox jumps over the lazy dog",
            "Warehouse 12, aisle 7, bin 3 - fragile glassware inside",
        ];
        let available = CanvasSize::new(300, 60);
        for text in texts {
            let result = fit(text, available, &BlockRasterizer, &config()).unwrap();
            assert!(result.width <= available.width - 3, "{text}: width {}", result.width);
            assert!(result.height <= available.height - 6, "{text}: height {}", result.height);
            assert!(result.font_size >= 8);
        }
    }

    #[test]
    fn wrap_width_shrinks_every_ten_steps() {
        // 45 characters need at least two lines, so the search runs past m = 10
        let text = "aaaaaaaaaaaaaa bbbbbbbbbbbbbb cccccccccccccc";
        let result = fit(text, CanvasSize::new(400, 70), &BlockRasterizer, &config()).unwrap();
        assert!(result.multiplier >= 10);
        let expected = 30 - 2 * (result.multiplier / 10) as usize;
        assert_eq!(result.max_chars_per_line, expected);
    }

    #[test]
    fn long_text_is_too_large() {
        let text = "A VERY LONG STRING ".repeat(11);
        let text = &text[..200];
        let err = fit(text, CanvasSize::new(187, 43), &BlockRasterizer, &config()).unwrap_err();
        assert!(matches!(err, LabelError::TextTooLarge { chars: 200 }));
        assert!(err.to_string().contains("200"));
    }

    #[test]
    fn fits_exactly_at_minimum_font_size() {
        // Three 20-character words always wrap to three lines. With a 30px
        // region the limit is 24px, reached only at the 8px font.
        let text = "aaaaaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbbbbb cccccccccccccccccccc";
        let result = fit(text, CanvasSize::new(200, 30), &BlockRasterizer, &config()).unwrap();
        assert_eq!(result.font_size, 8);
        assert_eq!(result.lines.len(), 3);
        assert_eq!(result.height, 24);
    }

    #[test]
    fn needing_seven_pixel_font_fails() {
        // Same text in a 29px region: 9px is too tall and the next step is 7px.
        let text = "aaaaaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbbbbb cccccccccccccccccccc";
        let err = fit(text, CanvasSize::new(200, 29), &BlockRasterizer, &config()).unwrap_err();
        assert!(matches!(err, LabelError::TextTooLarge { chars: 62 }));
    }

    #[test]
    fn fills_width_exactly_at_minimum_font_size() {
        // At 8px each glyph advances 5px, so a 20-character line is 100px:
        // exactly the 103 - 3 width limit.
        let text = "aaaaaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbbbbb cccccccccccccccccccc";
        let result = fit(text, CanvasSize::new(103, 30), &BlockRasterizer, &config()).unwrap();
        assert_eq!(result.font_size, 8);
        assert_eq!(result.lines.len(), 3);
        assert_eq!((result.width, result.height), (100, 24));

        let err = fit(text, CanvasSize::new(102, 30), &BlockRasterizer, &config()).unwrap_err();
        assert!(matches!(err, LabelError::TextTooLarge { chars: 62 }));
    }

    #[test]
    fn one_pixel_taller_region_can_skip_the_only_fitting_size() {
        // 30px reaches the 8px font; 31px steps from 9px straight to 7px.
        let text = "aaaaaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbbbbb cccccccccccccccccccc";
        let result = fit(text, CanvasSize::new(600, 30), &BlockRasterizer, &config()).unwrap();
        assert_eq!(result.font_size, 8);

        let err = fit(text, CanvasSize::new(600, 31), &BlockRasterizer, &config()).unwrap_err();
        assert!(matches!(err, LabelError::TextTooLarge { chars: 62 }));
    }

    #[test]
    fn taller_region_never_turns_fit_into_failure() {
        let texts = [
            "HELLO WORLD",
            "aaaaaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbbbbb cccccccccccccccccccc",
        ];
        for text in texts {
            // Same parity as the first success, since font sizes step by two
            for start in [20u32, 21] {
                let mut seen_fit = false;
                for height in (start..=90).step_by(2) {
                    let ok = fit(text, CanvasSize::new(600, height), &BlockRasterizer, &config()).is_ok();
                    assert!(!seen_fit || ok, "{text}: fit lost at height {height}");
                    seen_fit |= ok;
                }
                assert!(seen_fit, "{text}: never fits from {start}");
            }
        }
    }

    #[test]
    fn empty_text_fits_immediately() {
        let result = fit("", CanvasSize::new(187, 43), &BlockRasterizer, &config()).unwrap();
        assert_eq!(result.multiplier, 1);
        assert!(result.lines.is_empty());
        assert_eq!((result.width, result.height), (0, 0));
    }

    #[test]
    fn search_bound_is_configurable() {
        let config = LayoutConfig {
            max_multiplier: 2,
            ..LayoutConfig::default()
        };
        let err = fit("HELLO", CanvasSize::new(187, 43), &BlockRasterizer, &config).unwrap_err();
        assert!(matches!(err, LabelError::TextTooLarge { chars: 5 }));
    }

    #[test]
    fn tiny_region_fails_without_panicking() {
        let err = fit("HI", CanvasSize::new(0, 0), &BlockRasterizer, &config()).unwrap_err();
        assert!(matches!(err, LabelError::TextTooLarge { chars: 2 }));
    }
}
