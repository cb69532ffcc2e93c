//! Weight to font-size mapping.

use super::aggregate::Tag;

/// Font-size scale over one pass's tag weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontScale {
    /// Every weight maps to the same size (all tags equally heavy).
    Constant(f64),
    /// Natural-log interpolation between the weight bounds, clamped.
    Log {
        min_weight: f64,
        max_weight: f64,
        min_font_size: f64,
        max_font_size: f64,
    },
    /// Linear interpolation, used when the weight domain reaches zero and a
    /// logarithm is undefined.
    Linear {
        min_weight: f64,
        max_weight: f64,
        min_font_size: f64,
        max_font_size: f64,
    },
}

impl FontScale {
    /// Scale mapping `[min_weight, max_weight]` onto `[min_font_size, max_font_size]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tagmap::compute::scale::FontScale;
    ///
    /// let scale = FontScale::new(1.0, 100.0, 10.0, 30.0);
    /// assert_eq!(scale.font_size(1.0), 10.0);
    /// assert_eq!(scale.font_size(100.0), 30.0);
    /// assert!((scale.font_size(10.0) - 20.0).abs() < 1e-9);
    ///
    /// // Equal weights get the midpoint.
    /// assert_eq!(FontScale::new(5.0, 5.0, 14.0, 32.0).font_size(5.0), 23.0);
    /// ```
    pub fn new(min_weight: f64, max_weight: f64, min_font_size: f64, max_font_size: f64) -> Self {
        if min_weight == max_weight {
            return FontScale::Constant((min_font_size + max_font_size) * 0.5);
        }
        if min_weight > 0.0 {
            FontScale::Log {
                min_weight,
                max_weight,
                min_font_size,
                max_font_size,
            }
        } else {
            FontScale::Linear {
                min_weight,
                max_weight,
                min_font_size,
                max_font_size,
            }
        }
    }

    /// Scale spanning the lightest and heaviest of `tags`.
    ///
    /// An empty slice yields the midpoint constant, which is never consulted.
    pub fn from_tags(tags: &[Tag], min_font_size: f64, max_font_size: f64) -> Self {
        let (min_weight, max_weight) = tags
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), tag| {
                (lo.min(tag.weight), hi.max(tag.weight))
            });
        if tags.is_empty() {
            return FontScale::Constant((min_font_size + max_font_size) * 0.5);
        }
        Self::new(min_weight, max_weight, min_font_size, max_font_size)
    }

    pub fn font_size(&self, weight: f64) -> f64 {
        match *self {
            FontScale::Constant(size) => size,
            FontScale::Log {
                min_weight,
                max_weight,
                min_font_size,
                max_font_size,
            } => {
                let w = weight.clamp(min_weight, max_weight);
                let t = (w.ln() - min_weight.ln()) / (max_weight.ln() - min_weight.ln());
                min_font_size + t * (max_font_size - min_font_size)
            }
            FontScale::Linear {
                min_weight,
                max_weight,
                min_font_size,
                max_font_size,
            } => {
                let w = weight.clamp(min_weight, max_weight);
                let t = (w - min_weight) / (max_weight - min_weight);
                min_font_size + t * (max_font_size - min_font_size)
            }
        }
    }
}
