//! Engine error type
//!
//! Every conversion in the engine is a local validation; nothing here is
//! transient, so callers inspect the error and keep their previous state.

use thiserror::Error;

/// Errors produced by the experience and potion engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpError {
    /// Experience is not inside `[0, span)` for the given level
    #[error("experience {experience} is outside level {level} (span {span})")]
    InvalidExperience { level: u32, experience: u64, span: u64 },

    /// Level is not covered by the experience table
    #[error("level {level} is outside the supported range 1..={max}")]
    OutOfRange { level: u32, max: u32 },

    /// Total experience is at or past the end of the table
    #[error("total experience {total} exceeds the table limit {limit}")]
    LevelOverflow { total: u64, limit: u64 },

    /// Total experience would drop below what level 1 allows
    #[error("total experience {total} cannot be reduced below level 1")]
    LevelUnderflow { total: u64 },

    /// No starting total maps onto this total with the given potion
    #[error("total experience {total} cannot be reached with {potion}")]
    Unreachable { total: u64, potion: &'static str },

    /// Percentage input is NaN or infinite
    #[error("percentage {0} is not a finite number")]
    InvalidPercentage(f64),

    /// Potion key outside the closed set
    #[error("unknown potion '{0}'")]
    UnknownPotion(String),
}

/// Engine result alias
pub type ExpResult<T> = Result<T, ExpError>;
