//! Growth potions
//!
//! Catalog of potion kinds and the apply/unapply pipeline.

pub mod catalog;
pub mod pipeline;

pub use catalog::{PotionCount, PotionDescriptor, PotionId, POTION_DATA};
pub use pipeline::{apply_potion, apply_potions, unapply_potion, unapply_potions};
