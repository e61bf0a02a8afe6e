use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, ToolpathError};

/// Most rough plunges allowed over one grind length.
pub const MAX_ROUGH_PASSES: usize = 10_000;

/// Wheel and feed settings shared by every program generator.
///
/// Lengths are inches, feeds inches per minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrindSettings {
    pub wheel_width: f64,
    /// Fraction of the wheel width advanced per rough plunge.
    pub wheel_overlap: f64,
    /// Extra depth at the front of a spun diameter, tapering to zero at the
    /// shoulder.
    pub back_taper: f64,
    pub plunge_feed: f64,
    pub seg1_feed: f64,
    pub seg2_feed: f64,
    pub seg3_feed: f64,
    /// Depth left on rough plunges in simulation programs so the finished
    /// profile stays visible.
    pub sim_offset: f64,
}

impl Default for GrindSettings {
    fn default() -> Self {
        Self {
            wheel_width: 0.25,
            wheel_overlap: 0.9,
            back_taper: 0.0005,
            plunge_feed: 0.05,
            seg1_feed: 0.05,
            seg2_feed: 0.05,
            seg3_feed: 0.05,
            sim_offset: 0.0003,
        }
    }
}

impl GrindSettings {
    /// Axial advance between rough plunges.
    #[must_use]
    pub fn plunge_step(&self) -> f64 {
        self.wheel_width * self.wheel_overlap
    }

    /// Number of plunge steps needed to cover `length`.
    ///
    /// A non-positive length needs no steps.
    ///
    /// # Errors
    ///
    /// Returns [`ToolpathError::InvalidStep`] when the step is not a positive
    /// finite number or would need more than [`MAX_ROUGH_PASSES`] plunges.
    pub fn rough_passes(&self, length: f64) -> Result<usize> {
        let step = self.plunge_step();
        let passes = (length / step).ceil();
        #[allow(clippy::cast_precision_loss)]
        let too_many = passes.is_nan() || passes > MAX_ROUGH_PASSES as f64;
        if step <= 0.0 || !step.is_finite() || too_many {
            return Err(ToolpathError::InvalidStep {
                width: self.wheel_width,
                overlap: self.wheel_overlap,
            }
            .into());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let passes = passes.max(0.0) as usize;
        Ok(passes)
    }

    /// Checks every setting against the range the machine accepts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the first setting out of
    /// range. The overlap lower bound is exclusive.
    pub fn validate(&self) -> Result<()> {
        check("wheel_width", self.wheel_width, 0.03, 1.0)?;
        if self.wheel_overlap <= 0.0 {
            return Err(out_of_range("wheel_overlap", self.wheel_overlap, 0.0, 1.0));
        }
        check("wheel_overlap", self.wheel_overlap, 0.0, 1.0)?;
        check("back_taper", self.back_taper, 0.0, 0.002)?;
        check("plunge_feed", self.plunge_feed, 0.01, 1.0)?;
        check("seg1_feed", self.seg1_feed, 0.01, 5.0)?;
        check("seg2_feed", self.seg2_feed, 0.01, 5.0)?;
        check("seg3_feed", self.seg3_feed, 0.01, 5.0)?;
        check("sim_offset", self.sim_offset, 0.0, 0.01)?;
        Ok(())
    }
}

fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(out_of_range(field, value, min, max))
    }
}

fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> crate::error::GrindError {
    ConfigError::OutOfRange {
        field,
        value,
        min,
        max,
    }
    .into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GrindError;

    #[test]
    fn defaults_are_valid() {
        GrindSettings::default().validate().unwrap();
        assert!((GrindSettings::default().plunge_step() - 0.225).abs() < 1e-12);
    }

    #[test]
    fn wheel_width_range() {
        let s = GrindSettings {
            wheel_width: 1.5,
            ..GrindSettings::default()
        };
        assert!(matches!(
            s.validate(),
            Err(GrindError::Config(ConfigError::OutOfRange {
                field: "wheel_width",
                ..
            }))
        ));
    }

    #[test]
    fn zero_overlap_rejected() {
        let s = GrindSettings {
            wheel_overlap: 0.0,
            ..GrindSettings::default()
        };
        assert!(s.validate().is_err());
        let s = GrindSettings {
            wheel_overlap: 1.0,
            ..GrindSettings::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rough_passes_cover_length() {
        let s = GrindSettings::default();
        assert_eq!(s.rough_passes(1.0).unwrap(), 5);
        assert_eq!(s.rough_passes(0.0).unwrap(), 0);
        assert_eq!(s.rough_passes(-0.5).unwrap(), 0);
    }

    #[test]
    fn rough_passes_reject_degenerate_steps() {
        for (wheel_width, wheel_overlap) in [
            (0.25, 0.0),
            (0.0, 0.9),
            (-0.25, 0.9),
            (0.25, f64::NAN),
            (f64::INFINITY, 0.9),
            (1e-12, 0.9),
        ] {
            let s = GrindSettings {
                wheel_width,
                wheel_overlap,
                ..GrindSettings::default()
            };
            assert!(
                matches!(
                    s.rough_passes(1.0),
                    Err(GrindError::Toolpath(ToolpathError::InvalidStep { .. }))
                ),
                "width {wheel_width} overlap {wheel_overlap}"
            );
        }
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s: GrindSettings = toml::from_str("wheel_width = 0.5\nseg2_feed = 2.0\n").unwrap();
        assert!((s.wheel_width - 0.5).abs() < 1e-12);
        assert!((s.seg2_feed - 2.0).abs() < 1e-12);
        assert!((s.wheel_overlap - 0.9).abs() < 1e-12);
    }
}
