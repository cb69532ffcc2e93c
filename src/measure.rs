//! Text measurement seam.
//!
//! Glyph metrics belong to the host (canvas, font database, GPU atlas); the
//! layout only needs the pixel box a term occupies at a given font size.

use serde::{Deserialize, Serialize};

/// Pixel extent of a rendered term.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Measures the pixel box of `text` rendered at `font_size`.
pub trait TextMeasurer {
    fn measure(&self, font_size: f64, text: &str) -> TextSize;
}

impl<F> TextMeasurer for F
where
    F: Fn(f64, &str) -> TextSize,
{
    fn measure(&self, font_size: f64, text: &str) -> TextSize {
        self(font_size, text)
    }
}

/// Fixed advance-width approximation: every character is
/// `font_size * char_width_ratio` wide and the box is one font size tall.
///
/// # Examples
///
/// ```rust
/// use tagmap::measure::{MonospaceMeasurer, TextMeasurer};
///
/// let measurer = MonospaceMeasurer::default();
/// let size = measurer.measure(20.0, "#tag");
/// assert_eq!(size.height, 20.0);
/// assert_eq!(size.width, 4.0 * 20.0 * 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub char_width_ratio: f64,
}

impl MonospaceMeasurer {
    const DEFAULT_CHAR_WIDTH_RATIO: f64 = 0.6;

    pub fn new(char_width_ratio: f64) -> Self {
        Self { char_width_ratio }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHAR_WIDTH_RATIO)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, font_size: f64, text: &str) -> TextSize {
        let chars = text.chars().count() as f64;
        TextSize::new(chars * font_size * self.char_width_ratio, font_size)
    }
}
