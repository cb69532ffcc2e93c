//! Font size to palette colour.
//!
//! The font range is cut into as many equal-width buckets as the palette has
//! colours, lightest bucket first. Palette entries are any CSS colour string
//! the `color` crate understands ("#41b6c4", "rgb(65 182 196 / 0.5)", "teal").

use crate::config::VisParams;
use crate::error::{Result, TagMapError};
use color::{DynamicColor, Srgb};
use std::str::FromStr;

/// Parse every palette entry to straight-alpha RGBA bytes.
///
/// # Errors
///
/// [`TagMapError::InvalidConfig`] for an empty palette or any entry that is
/// not a valid CSS colour.
pub fn parse_palette(colors: &[String]) -> Result<Vec<[u8; 4]>> {
    if colors.is_empty() {
        return Err(TagMapError::InvalidConfig(
            "color_scheme must contain at least one color".into(),
        ));
    }

    colors
        .iter()
        .map(|entry| {
            let parsed = DynamicColor::from_str(entry).map_err(|err| {
                TagMapError::InvalidConfig(format!("Invalid color '{entry}': {err}"))
            })?;
            let rgba = parsed.to_alpha_color::<Srgb>().to_rgba8();
            Ok([rgba.r, rgba.g, rgba.b, rgba.a])
        })
        .collect()
}

/// Quantile colour scale over `[min_font_size, max_font_size]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapper {
    min: f64,
    max: f64,
    palette: Vec<[u8; 4]>,
}

impl ColorMapper {
    /// Validate `params` and build the scale over their font range.
    ///
    /// # Errors
    ///
    /// [`TagMapError::InvalidConfig`] when `params` fail validation.
    pub fn new(params: &VisParams) -> Result<Self> {
        Ok(Self {
            min: params.min_font_size,
            max: params.max_font_size,
            palette: params.checked_palette()?,
        })
    }

    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Bucket index for `font_size`.
    ///
    /// Bucket `i` starts at `min + (max - min) * i / n`; a size sitting exactly
    /// on a boundary belongs to the upper bucket. Sizes outside the range fall
    /// into the first or last bucket, and NaN into the first.
    pub fn bucket(&self, font_size: f64) -> usize {
        let n = self.palette.len();
        let span = self.max - self.min;
        (1..n)
            .take_while(|&i| self.min + span * i as f64 / n as f64 <= font_size)
            .count()
    }

    pub fn color_for(&self, font_size: f64) -> [u8; 4] {
        self.palette[self.bucket(font_size)]
    }
}
