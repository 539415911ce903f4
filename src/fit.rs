//! Shrink-to-fit font sizing

/// Anything that can report how wide a string is when set at a font size
pub trait TextMeasure {
    /// Width in points of `text` at `size` points
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// Limits for shrinking a name onto its tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRule {
    /// Size tried first
    pub default_size: f32,
    /// The fitted width must be strictly below this
    pub max_width: f32,
    /// Smallest size the search may reach; `None` searches without a floor
    pub min_size: Option<f32>,
}

/// Outcome of a shrink-to-fit search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSize {
    pub size: f32,
    /// Width of the text at `size`
    pub width: f32,
    /// False when the floor stopped the search before the text fit
    pub fits: bool,
}

/// Step the size down one point at a time until `text` is narrower than the rule allows
///
/// Text measured as zero-width at every size keeps the default. Without a
/// floor the search always ends, at the latest at size zero where the width
/// is zero too.
pub fn fit_font_size<M: TextMeasure + ?Sized>(measure: &M, text: &str, rule: &FitRule) -> FittedSize {
    let mut size = rule.default_size;
    let mut width = measure.text_width(text, size);

    while width >= rule.max_width {
        if let Some(floor) = rule.min_size {
            if size - 1.0 < floor {
                return FittedSize { size, width, fits: false };
            }
        }
        size -= 1.0;
        width = measure.text_width(text, size);
        if size <= 0.0 && width >= rule.max_width {
            // Only a measure that is not proportional to size gets here
            return FittedSize { size, width, fits: false };
        }
    }

    FittedSize { size, width, fits: true }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is `advance` em wide
    struct Monospace {
        advance: f32,
    }

    impl TextMeasure for Monospace {
        fn text_width(&self, text: &str, size: f32) -> f32 {
            text.chars().count() as f32 * self.advance * size
        }
    }

    const MEASURE: Monospace = Monospace { advance: 0.5 };

    fn rule(min_size: Option<f32>) -> FitRule {
        FitRule {
            default_size: 24.0,
            max_width: 225.0,
            min_size,
        }
    }

    #[test]
    fn test_short_name_keeps_default_size() {
        let fitted = fit_font_size(&MEASURE, "Alice", &rule(Some(1.0)));
        assert_eq!(fitted.size, 24.0);
        assert_eq!(fitted.width, 60.0);
        assert!(fitted.fits);
    }

    #[test]
    fn test_long_name_picks_largest_fitting_size() {
        // 30 chars at 0.5em: width = 15 * size, must be < 225 → size 14
        let name = "x".repeat(30);
        let fitted = fit_font_size(&MEASURE, &name, &rule(None));

        assert_eq!(fitted.size, 14.0);
        assert!(fitted.width < 225.0);
        assert!(MEASURE.text_width(&name, fitted.size + 1.0) >= 225.0);
        assert!(fitted.fits);
    }

    #[test]
    fn test_width_exactly_at_limit_shrinks() {
        // 15 chars at 0.5em and size 30: width = 225, not strictly below
        let name = "x".repeat(15);
        let fitted = fit_font_size(
            &MEASURE,
            &name,
            &FitRule { default_size: 30.0, max_width: 225.0, min_size: None },
        );
        assert_eq!(fitted.size, 29.0);
    }

    #[test]
    fn test_pathological_name_without_floor_ends_below_one() {
        // Too wide at every size from 24 down to 1
        let name = "x".repeat(1000);
        let fitted = fit_font_size(&MEASURE, &name, &rule(None));

        assert!(fitted.size <= 1.0);
        assert!(fitted.width < 225.0);
    }

    #[test]
    fn test_floor_stops_search() {
        let name = "x".repeat(1000);
        let fitted = fit_font_size(&MEASURE, &name, &rule(Some(6.0)));

        assert_eq!(fitted.size, 6.0);
        assert!(!fitted.fits);
        assert!(fitted.width >= 225.0);
    }

    #[test]
    fn test_empty_name() {
        let fitted = fit_font_size(&MEASURE, "", &rule(Some(1.0)));
        assert_eq!(fitted.size, 24.0);
        assert_eq!(fitted.width, 0.0);
    }
}
