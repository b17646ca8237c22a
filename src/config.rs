//! Plot configuration.

use serde::{Deserialize, Serialize};

use crate::clip::{DIRECTION_EPSILON, PARALLEL_EPSILON};
use crate::dye_lines::DyeLineOptions;
use crate::error::ConfigError;
use crate::limits::AxisLimitMode;
use crate::style::Theme;

/// Configuration for spot plots and their dye lines.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Norm below which a dye is invisible on a channel pair.
    pub direction_epsilon: f64,
    /// Direction component below which a dye line is treated as axis-parallel.
    pub parallel_epsilon: f64,
    /// Padding fraction applied when auto-fitting data.
    pub padding_frac: f64,
    /// Minimum padding applied when auto-fitting data.
    pub min_padding: f64,
    /// Lower percentile for percentile axis limits.
    pub percentile_low: f64,
    /// Upper percentile for percentile axis limits.
    pub percentile_high: f64,
    /// Dye line stroke width in pixels.
    pub dye_line_width: f32,
    /// Dye label font size in pixels.
    pub label_size: f32,
    /// Spot marker size in pixels.
    pub marker_size: f32,
    /// Draw dye lines on new plots.
    pub show_dye_lines: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            direction_epsilon: DIRECTION_EPSILON,
            parallel_epsilon: PARALLEL_EPSILON,
            padding_frac: 0.05,
            min_padding: 1e-6,
            percentile_low: 1.0,
            percentile_high: 99.0,
            dye_line_width: 1.5,
            label_size: 12.0,
            marker_size: 3.0,
            show_dye_lines: true,
        }
    }
}

impl PlotConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.direction_epsilon.is_finite() && self.direction_epsilon > 0.0) {
            return Err(ConfigError::Invalid("direction_epsilon must be positive"));
        }
        if !(self.parallel_epsilon.is_finite() && self.parallel_epsilon > 0.0) {
            return Err(ConfigError::Invalid("parallel_epsilon must be positive"));
        }
        if !(self.padding_frac.is_finite() && self.padding_frac >= 0.0) {
            return Err(ConfigError::Invalid("padding_frac must be non-negative"));
        }
        if !(self.min_padding.is_finite() && self.min_padding >= 0.0) {
            return Err(ConfigError::Invalid("min_padding must be non-negative"));
        }
        let low_ok = (0.0..=100.0).contains(&self.percentile_low);
        let high_ok = (0.0..=100.0).contains(&self.percentile_high);
        if !(low_ok && high_ok && self.percentile_low < self.percentile_high) {
            return Err(ConfigError::Invalid(
                "percentiles must satisfy 0 <= low < high <= 100",
            ));
        }
        Ok(())
    }

    /// Thresholds for the dye line builder.
    pub fn dye_line_options(&self) -> DyeLineOptions {
        DyeLineOptions {
            direction_epsilon: self.direction_epsilon,
            parallel_epsilon: self.parallel_epsilon,
        }
    }

    /// Percentile axis limits with the configured bounds.
    pub fn percentile_limits(&self) -> AxisLimitMode {
        AxisLimitMode::Percentile {
            low: self.percentile_low,
            high: self.percentile_high,
        }
    }

    /// Default theme with this config's sizes applied.
    pub fn theme(&self) -> Theme {
        let mut theme = Theme::default();
        theme.dye_line.width = self.dye_line_width;
        theme.dye_label.size = self.label_size;
        theme.spot.size = self.marker_size;
        theme.reassigned_spot.size = self.marker_size + 1.0;
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = PlotConfig::from_json(r#"{"percentile_low": 5, "show_dye_lines": false}"#)
            .expect("config");
        assert_eq!(config.percentile_low, 5.0);
        assert!(!config.show_dye_lines);
        assert_eq!(config.percentile_high, 99.0);
        assert_eq!(config.dye_line_options(), DyeLineOptions::default());
    }

    #[test]
    fn percentile_limits_use_configured_bounds() {
        let config = PlotConfig::default();
        assert_eq!(
            config.percentile_limits(),
            AxisLimitMode::Percentile {
                low: 1.0,
                high: 99.0
            }
        );
    }

    #[test]
    fn rejects_inverted_percentiles() {
        let err = PlotConfig::from_json(r#"{"percentile_low": 90, "percentile_high": 10}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_epsilon() {
        let err = PlotConfig::from_json(r#"{"direction_epsilon": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn theme_picks_up_sizes() {
        let config = PlotConfig {
            label_size: 16.0,
            ..PlotConfig::default()
        };
        assert_eq!(config.theme().dye_label.size, 16.0);
    }
}
