//! Before/after calculator state
//!
//! Holds the two mirrored (level, experience, percentage) triples and routes
//! each edit to the forward or reverse pipeline depending on which side the
//! user touched last.

use serde::{Deserialize, Serialize};

use crate::error::ExpResult;
use crate::potions::{apply_potions, unapply_potions, PotionCount, PotionId};
use crate::progression::{exp_to_level, from_percentage, level_to_exp, to_percentage, Percentage};

/// Editable inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    LevelBefore,
    ExperienceBefore,
    PercentageBefore,
    LevelAfter,
    ExperienceAfter,
    PercentageAfter,
}

impl Field {
    pub fn direction(self) -> Direction {
        match self {
            Field::LevelBefore | Field::ExperienceBefore | Field::PercentageBefore => Direction::Forward,
            Field::LevelAfter | Field::ExperienceAfter | Field::PercentageAfter => Direction::Reverse,
        }
    }
}

/// Which side was edited last, and so which pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Before side is the source; after = apply(before)
    Forward,
    /// After side is the source; before = unapply(after)
    Reverse,
}

/// One side of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: u32,
    pub experience: u64,
    /// Percentage exactly as typed, when the user edited it on this side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typed_percentage: Option<f64>,
}

impl Snapshot {
    fn new(level: u32, experience: u64) -> Self {
        Self { level, experience, typed_percentage: None }
    }

    fn from_total(total: u64) -> ExpResult<Self> {
        let (level, experience) = exp_to_level(total)?;
        Ok(Self::new(level, experience))
    }

    pub fn total(&self) -> ExpResult<u64> {
        level_to_exp(self.level, self.experience)
    }

    pub fn percentage(&self) -> ExpResult<Percentage> {
        to_percentage(self.level, self.experience)
    }
}

/// A single user edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    LevelBefore(u32),
    ExperienceBefore(u64),
    PercentageBefore(f64),
    LevelAfter(u32),
    ExperienceAfter(u64),
    PercentageAfter(f64),
    Potion(PotionId, u32),
}

/// Full calculator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcState {
    pub before: Snapshot,
    pub after: Snapshot,
    pub potions: PotionCount,
    /// Field edited last
    pub change: Field,
}

impl Default for CalcState {
    fn default() -> Self {
        Self {
            before: Snapshot::new(200, 0),
            after: Snapshot::new(200, 0),
            potions: PotionCount::new(),
            change: Field::LevelBefore,
        }
    }
}

impl CalcState {
    pub fn direction(&self) -> Direction {
        self.change.direction()
    }

    /// State after `action`; on error the caller keeps `self`
    pub fn reduce(&self, action: Action) -> ExpResult<CalcState> {
        let before = self.before;
        let after = self.after;
        match action {
            Action::LevelBefore(level) => {
                self.forward(Snapshot::new(level, before.experience), self.potions, Field::LevelBefore)
            }
            Action::ExperienceBefore(experience) => {
                self.forward(Snapshot::new(before.level, experience), self.potions, Field::ExperienceBefore)
            }
            Action::PercentageBefore(percent) => {
                let experience = from_percentage(before.level, percent)?;
                let source = Snapshot { typed_percentage: Some(percent), ..Snapshot::new(before.level, experience) };
                self.forward(source, self.potions, Field::PercentageBefore)
            }
            Action::LevelAfter(level) => {
                self.reverse(Snapshot::new(level, after.experience), self.potions, Field::LevelAfter)
            }
            Action::ExperienceAfter(experience) => {
                self.reverse(Snapshot::new(after.level, experience), self.potions, Field::ExperienceAfter)
            }
            Action::PercentageAfter(percent) => {
                let experience = from_percentage(after.level, percent)?;
                let source = Snapshot { typed_percentage: Some(percent), ..Snapshot::new(after.level, experience) };
                self.reverse(source, self.potions, Field::PercentageAfter)
            }
            Action::Potion(id, count) => {
                let potions = self.potions.with(id, count);
                match self.direction() {
                    Direction::Forward => {
                        self.forward(Snapshot::new(before.level, before.experience), potions, self.change)
                    }
                    Direction::Reverse => {
                        self.reverse(Snapshot::new(after.level, after.experience), potions, self.change)
                    }
                }
            }
        }
    }

    /// Recompute the derived side from the source side
    ///
    /// Used on loaded state, which may have been edited by hand.
    pub fn refresh(&self) -> ExpResult<CalcState> {
        match self.direction() {
            Direction::Forward => self.forward(self.before, self.potions, self.change),
            Direction::Reverse => self.reverse(self.after, self.potions, self.change),
        }
    }

    fn forward(&self, before: Snapshot, potions: PotionCount, change: Field) -> ExpResult<CalcState> {
        let total = apply_potions(before.total()?, &potions)?;
        Ok(CalcState { before, after: Snapshot::from_total(total)?, potions, change })
    }

    fn reverse(&self, after: Snapshot, potions: PotionCount, change: Field) -> ExpResult<CalcState> {
        let total = unapply_potions(after.total()?, &potions)?;
        Ok(CalcState { before: Snapshot::from_total(total)?, after, potions, change })
    }
}
