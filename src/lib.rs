//! Hiyaku - growth potion calculator
//!
//! Converts between level/experience, total experience and
//! percentage-of-level, and applies or undoes growth potions on a total with
//! an exact inverse.

pub mod error;
pub mod progression;
pub mod potions;
pub mod calc;
pub mod save;
pub mod config;
pub mod ui;

// Re-export commonly used types
pub use error::{ExpError, ExpResult};
pub use progression::{level_to_exp, exp_to_level, to_percentage, from_percentage, Percentage};
pub use potions::{apply_potion, apply_potions, unapply_potion, unapply_potions};
pub use potions::{PotionCount, PotionDescriptor, PotionId, POTION_DATA};
pub use calc::{Action, CalcState};
