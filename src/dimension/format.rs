/// How a dimension value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimFormat {
    pub prefix: &'static str,
    pub precision: usize,
    pub suffix: &'static str,
}

impl DimFormat {
    /// Linear inch, `%.4f"`.
    pub const INCH: Self = Self::new("", 4, "\"");
    /// Linear millimeter, `%.3fmm`.
    pub const MM: Self = Self::new("", 3, "mm");
    /// Angle, `%.2f°`.
    pub const ANGLE: Self = Self::new("", 2, "°");
    /// Radius inch.
    pub const RADIUS_INCH: Self = Self::new("R", 4, "\"");
    /// Radius millimeter.
    pub const RADIUS_MM: Self = Self::new("R", 3, "mm");
    /// Diameter inch.
    pub const DIAMETER_INCH: Self = Self::new("Ø", 4, "\"");
    /// Diameter millimeter.
    pub const DIAMETER_MM: Self = Self::new("Ø", 3, "mm");

    #[must_use]
    pub const fn new(prefix: &'static str, precision: usize, suffix: &'static str) -> Self {
        Self {
            prefix,
            precision,
            suffix,
        }
    }

    /// Formats `value`, trimming trailing zeros down to one fractional digit.
    ///
    /// `3.0` with [`DimFormat::MM`] prints `3.0mm`, `3.14` prints `3.14mm`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let mut number = format!("{value:.*}", self.precision);
        if number.contains('.') {
            let trimmed = number.trim_end_matches('0').len();
            number.truncate(trimmed);
            if number.ends_with('.') {
                number.push('0');
            }
        }
        format!("{}{}{}", self.prefix, number, self.suffix)
    }
}

impl Default for DimFormat {
    fn default() -> Self {
        Self::MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_one_trailing_zero() {
        assert_eq!(DimFormat::MM.format(3.0), "3.0mm");
        assert_eq!(DimFormat::MM.format(3.14), "3.14mm");
        assert_eq!(DimFormat::INCH.format(0.5), "0.5\"");
        assert_eq!(DimFormat::ANGLE.format(118.0), "118.0°");
    }

    #[test]
    fn rounds_to_precision() {
        assert_eq!(DimFormat::INCH.format(0.123_456), "0.1235\"");
        assert_eq!(DimFormat::ANGLE.format(7.005_1), "7.01°");
    }

    #[test]
    fn prefixes_are_kept() {
        assert_eq!(DimFormat::DIAMETER_INCH.format(0.47), "Ø0.47\"");
        assert_eq!(DimFormat::RADIUS_MM.format(100.0), "R100.0mm");
    }

    #[test]
    fn zero_precision_is_not_trimmed() {
        assert_eq!(DimFormat::new("", 0, "").format(100.0), "100");
    }
}
