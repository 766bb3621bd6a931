//! Potion transform pipeline
//!
//! Below its cap a potion grants the span of the current level, so the
//! character moves up exactly one level and keeps the same within-level
//! experience. At or above the cap it grants the cap level's span. Spans
//! never shrink, so the transform is strictly increasing and has an exact
//! inverse on the totals it can produce.
//!
//! `apply_potions` walks kinds in `PotionId::ALL` order; `unapply_potions`
//! walks them in reverse.

use crate::error::{ExpError, ExpResult};
use crate::progression::EXPERIENCE;
use super::catalog::{PotionCount, PotionDescriptor};

/// Use one potion
pub fn apply_potion(total: u64, potion: &PotionDescriptor) -> ExpResult<u64> {
    let level = EXPERIENCE.level_at(total)?;
    let gain = EXPERIENCE.level_span(level.min(potion.max_level))?;
    let limit = EXPERIENCE.limit();
    match total.checked_add(gain) {
        Some(next) if next < limit => Ok(next),
        _ => {
            log::debug!("{} at total {} overflows the table", potion.id, total);
            Err(ExpError::LevelOverflow { total: total.saturating_add(gain), limit })
        }
    }
}

/// Undo one potion, recovering the total it was applied to
pub fn unapply_potion(total: u64, potion: &PotionDescriptor) -> ExpResult<u64> {
    let level = EXPERIENCE.level_at(total)?;
    let capped_from = EXPERIENCE.requirement(potion.max_level + 1)?;

    // Came from the cap level or beyond: a flat cap-span gain
    if total >= capped_from {
        return Ok(total - EXPERIENCE.level_span(potion.max_level)?);
    }

    if level == 1 {
        return Err(ExpError::LevelUnderflow { total });
    }

    // Came from one level below with the same within-level experience
    let within = total - EXPERIENCE.requirement(level)?;
    let previous_span = EXPERIENCE.level_span(level - 1)?;
    if within >= previous_span {
        log::debug!("{} cannot produce total {} (level {})", potion.id, total, level);
        return Err(ExpError::Unreachable { total, potion: potion.id.key() });
    }
    Ok(total - previous_span)
}

/// Use every potion in `potions`, kinds in canonical order
pub fn apply_potions(total: u64, potions: &PotionCount) -> ExpResult<u64> {
    let mut total = total;
    for (id, count) in potions.iter() {
        for _ in 0..count {
            let next = apply_potion(total, id.descriptor())?;
            log::trace!("apply {}: {} -> {}", id, total, next);
            total = next;
        }
    }
    Ok(total)
}

/// Undo every potion in `potions`, kinds in reverse canonical order
pub fn unapply_potions(total: u64, potions: &PotionCount) -> ExpResult<u64> {
    let mut total = total;
    for (id, count) in potions.iter().rev() {
        for _ in 0..count {
            let previous = unapply_potion(total, id.descriptor())?;
            log::trace!("unapply {}: {} -> {}", id, total, previous);
            total = previous;
        }
    }
    Ok(total)
}
