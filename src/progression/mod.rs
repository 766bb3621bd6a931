//! Experience curve
//!
//! The table plus the two codecs built on it: level/experience and
//! percentage-of-level.

pub mod table;
pub mod level;
pub mod percentage;

pub use table::{ExperienceTable, EXPERIENCE, MAX_LEVEL};
pub use level::{level_to_exp, exp_to_level};
pub use percentage::{Percentage, to_percentage, from_percentage};
