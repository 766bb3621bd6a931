//! Level codec
//!
//! Converts between (level, within-level experience) and total experience.
//! Experience outside the level's span is rejected, never clamped.

use crate::error::{ExpError, ExpResult};
use super::table::EXPERIENCE;

/// Total experience for `level` plus `experience` gained inside it
pub fn level_to_exp(level: u32, experience: u64) -> ExpResult<u64> {
    let span = EXPERIENCE.level_span(level)?;
    if experience >= span {
        log::debug!("Rejected {} experience at level {} (span {})", experience, level, span);
        return Err(ExpError::InvalidExperience { level, experience, span });
    }
    Ok(EXPERIENCE.requirement(level)? + experience)
}

/// Split a total into (level, within-level experience)
pub fn exp_to_level(total: u64) -> ExpResult<(u32, u64)> {
    let level = EXPERIENCE.level_at(total)?;
    let experience = total - EXPERIENCE.requirement(level)?;
    Ok((level, experience))
}
