//! Tunables for the compression search.
//!
//! [`CompressConfig::default`] is the stock tuning: a 1 MiB
//! ceiling, 1% headroom on the lossy search, six scale probes in
//! `[0.5, 0.99]`, and seven quality probes in `[0.5, 1.0]`.

use serde::{Deserialize, Serialize};

use super::CompressError;
use crate::render::FilterType;

/// Default size ceiling: 1 MiB.
pub const DEFAULT_BUDGET_BYTES: u64 = 1024 * 1024;

/// Fixed-iteration bisection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchRange {
    /// Lower bound; the search never probes below it.
    pub min: f64,
    /// Upper bound; the search never probes at or above it.
    pub max: f64,
    /// Number of probes. Bounds total work instead of a convergence epsilon.
    pub iterations: u32,
}

impl SearchRange {
    pub const fn new(min: f64, max: f64, iterations: u32) -> Self {
        Self {
            min,
            max,
            iterations,
        }
    }

    /// Width of the interval left after all iterations.
    pub fn precision(&self) -> f64 {
        (self.max - self.min) / 2f64.powi(self.iterations as i32)
    }
}

/// Compression engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressConfig {
    /// Hard output ceiling in bytes. Inputs strictly below it pass through.
    pub budget_bytes: u64,
    /// Fraction of the budget the lossy quality search aims under.
    pub lossy_margin: f64,
    /// Scale bisection for lossless (PNG) originals.
    pub scale_search: SearchRange,
    /// Quality bisection for the lossy path.
    pub quality_search: SearchRange,
    /// Quality used while stepping dimensions down.
    pub fallback_quality: f32,
    /// Scale of the unchecked last-resort encode.
    pub last_resort_scale: f64,
    /// Quality of the unchecked last-resort encode.
    pub last_resort_quality: f32,
    /// Resampling filter for scaled renders.
    pub filter: FilterType,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            budget_bytes: DEFAULT_BUDGET_BYTES,
            lossy_margin: 0.99,
            scale_search: SearchRange::new(0.5, 0.99, 6),
            quality_search: SearchRange::new(0.5, 1.0, 7),
            fallback_quality: 0.8,
            last_resort_scale: 0.5,
            last_resort_quality: 0.5,
            filter: FilterType::default(),
        }
    }
}

impl CompressConfig {
    /// Config with the default search and a custom ceiling.
    pub fn with_budget(budget_bytes: u64) -> Self {
        Self {
            budget_bytes,
            ..Self::default()
        }
    }

    /// Largest size the lossy quality search accepts.
    pub fn lossy_target(&self) -> f64 {
        self.budget_bytes as f64 * self.lossy_margin
    }

    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.budget_bytes == 0 {
            return Err(invalid("budget must be greater than zero"));
        }
        if !(self.lossy_margin > 0.0 && self.lossy_margin <= 1.0) {
            return Err(invalid("lossy margin must be in (0, 1]"));
        }

        let scale = &self.scale_search;
        if !(scale.min > 0.0 && scale.min < scale.max && scale.max <= 1.0) {
            return Err(invalid("scale search bounds must satisfy 0 < min < max <= 1"));
        }

        let quality = &self.quality_search;
        if !(quality.min > 0.0 && quality.min < quality.max && quality.max <= 1.0) {
            return Err(invalid("quality search bounds must satisfy 0 < min < max <= 1"));
        }

        if !is_unit_fraction(self.fallback_quality as f64)
            || !is_unit_fraction(self.last_resort_quality as f64)
        {
            return Err(invalid("fallback qualities must be in (0, 1]"));
        }
        if !is_unit_fraction(self.last_resort_scale) {
            return Err(invalid("last resort scale must be in (0, 1]"));
        }
        Ok(())
    }
}

fn is_unit_fraction(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn invalid(reason: &str) -> CompressError {
    CompressError::InvalidConfig(reason.to_string())
}
