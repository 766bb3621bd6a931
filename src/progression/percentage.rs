//! Percentage-of-level codec
//!
//! A [`Percentage`] keeps the exact ratio `experience / span` and only rounds
//! when it is turned into a float or text. Going from a typed percentage back
//! to experience is lossy: `to_percentage(from_percentage(l, p))` can land a
//! hair below `p`, which is accepted.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{ExpError, ExpResult};
use super::table::EXPERIENCE;

/// Fixed-point resolution used for float conversion (1e-7 percent)
const UNITS_PER_PERCENT: u128 = 10_000_000;
const UNITS_PER_WHOLE: u128 = 100 * UNITS_PER_PERCENT;

/// Progress through a level as an exact ratio
#[derive(Debug, Clone, Copy)]
pub struct Percentage {
    experience: u64,
    span: u64,
}

impl Percentage {
    pub const ZERO: Percentage = Percentage { experience: 0, span: 1 };

    /// Progress in 1e-7 percent units, rounded down
    fn units(&self) -> u128 {
        self.experience as u128 * UNITS_PER_WHOLE / self.span as u128
    }

    /// Value in `[0, 100)`
    pub fn as_f64(&self) -> f64 {
        self.units() as f64 / UNITS_PER_PERCENT as f64
    }

    /// Format with `decimals` fractional digits, truncating
    pub fn format(&self, decimals: u8) -> String {
        let decimals = decimals.min(7) as u32;
        let scale = 10u128.pow(decimals);
        let scaled = self.experience as u128 * 100 * scale / self.span as u128;
        let whole = scaled / scale;
        if decimals == 0 {
            whole.to_string()
        } else {
            let frac = scaled % scale;
            format!("{}.{:0width$}", whole, frac, width = decimals as usize)
        }
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Percentage {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Percentage {}

impl PartialOrd for Percentage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percentage {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.experience as u128 * other.span as u128;
        let rhs = other.experience as u128 * self.span as u128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Percentage {
    /// Truncates to the formatter precision (default 3 digits)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = f.precision().unwrap_or(3).min(7) as u8;
        f.write_str(&self.format(decimals))
    }
}

/// Progress through `level` after gaining `experience` inside it
pub fn to_percentage(level: u32, experience: u64) -> ExpResult<Percentage> {
    let span = EXPERIENCE.level_span(level)?;
    if experience >= span {
        return Err(ExpError::InvalidExperience { level, experience, span });
    }
    Ok(Percentage { experience, span })
}

/// Within-level experience for a typed percentage
///
/// The percentage is first rounded to the nearest 1e-7 percent, then the
/// experience is floored, so `66.66666666666` of a 15-point span reads as
/// `66.6666667` and yields 10 rather than 9. Values outside `[0, 100)` are
/// clamped into the level.
pub fn from_percentage(level: u32, percent: f64) -> ExpResult<u64> {
    if !percent.is_finite() {
        return Err(ExpError::InvalidPercentage(percent));
    }
    let span = EXPERIENCE.level_span(level)?;
    let units = (percent.clamp(0.0, 100.0) * UNITS_PER_PERCENT as f64).round() as u128;
    let experience = (units * span as u128 / UNITS_PER_WHOLE) as u64;
    Ok(experience.min(span - 1))
}
