//! Potion catalog
//!
//! Static descriptors for the closed set of growth potions, and the
//! per-kind quantity map the pipeline consumes.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExpError;

/// Growth potion kinds, in canonical application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PotionId {
    #[serde(rename = "POTION0")]
    Potion0,
    #[serde(rename = "POTION1")]
    Potion1,
    #[serde(rename = "POTION2")]
    Potion2,
    #[serde(rename = "POTION3")]
    Potion3,
    #[serde(rename = "POTION4")]
    Potion4,
    #[serde(rename = "POTION5")]
    Potion5,
}

impl PotionId {
    pub const COUNT: usize = 6;

    /// Every kind, in the order potions are applied
    pub const ALL: [PotionId; Self::COUNT] = [
        PotionId::Potion0,
        PotionId::Potion1,
        PotionId::Potion2,
        PotionId::Potion3,
        PotionId::Potion4,
        PotionId::Potion5,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Stable key used in saved state
    pub fn key(self) -> &'static str {
        match self {
            PotionId::Potion0 => "POTION0",
            PotionId::Potion1 => "POTION1",
            PotionId::Potion2 => "POTION2",
            PotionId::Potion3 => "POTION3",
            PotionId::Potion4 => "POTION4",
            PotionId::Potion5 => "POTION5",
        }
    }

    pub fn descriptor(self) -> &'static PotionDescriptor {
        &POTION_DATA[self.index()]
    }
}

impl fmt::Display for PotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PotionId {
    type Err = ExpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PotionId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| ExpError::UnknownPotion(s.to_string()))
    }
}

/// What a potion kind does and how far it is useful
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotionDescriptor {
    pub id: PotionId,
    /// Display name
    pub label: &'static str,
    /// Grants a full level up to this level; past it, this level's span
    pub max_level: u32,
    /// Most of this kind anyone sensibly uses at once
    pub max_count: u32,
}

/// Descriptor table, indexed by `PotionId`
pub static POTION_DATA: [PotionDescriptor; PotionId::COUNT] = [
    PotionDescriptor { id: PotionId::Potion0, label: "成長の秘薬1", max_level: 209, max_count: 30 },
    PotionDescriptor { id: PotionId::Potion1, label: "成長の秘薬2", max_level: 219, max_count: 30 },
    PotionDescriptor { id: PotionId::Potion2, label: "成長の秘薬3", max_level: 229, max_count: 30 },
    PotionDescriptor { id: PotionId::Potion3, label: "典型的成長の秘薬", max_level: 239, max_count: 30 },
    PotionDescriptor { id: PotionId::Potion4, label: "極限成長の秘薬", max_level: 249, max_count: 30 },
    PotionDescriptor { id: PotionId::Potion5, label: "超越成長の秘薬", max_level: 269, max_count: 30 },
];

/// How many of each potion kind to use
///
/// Every kind is always present; an unused kind has count 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<PotionId, u32>", into = "BTreeMap<PotionId, u32>")]
pub struct PotionCount {
    counts: [u32; PotionId::COUNT],
}

impl PotionCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with one kind's count replaced
    pub fn with(mut self, id: PotionId, count: u32) -> Self {
        self[id] = count;
        self
    }

    /// (kind, count) pairs in canonical order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PotionId, u32)> + '_ {
        PotionId::ALL.into_iter().map(move |id| (id, self[id]))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| count as u64).sum()
    }
}

impl Index<PotionId> for PotionCount {
    type Output = u32;

    fn index(&self, id: PotionId) -> &u32 {
        &self.counts[id.index()]
    }
}

impl IndexMut<PotionId> for PotionCount {
    fn index_mut(&mut self, id: PotionId) -> &mut u32 {
        &mut self.counts[id.index()]
    }
}

impl From<BTreeMap<PotionId, u32>> for PotionCount {
    fn from(map: BTreeMap<PotionId, u32>) -> Self {
        let mut counts = PotionCount::new();
        for (id, count) in map {
            counts[id] = count;
        }
        counts
    }
}

impl From<PotionCount> for BTreeMap<PotionId, u32> {
    fn from(counts: PotionCount) -> Self {
        counts.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_match_ids() {
        for id in PotionId::ALL {
            assert_eq!(id.descriptor().id, id);
        }
    }

    #[test]
    fn test_caps_increase_in_canonical_order() {
        let caps: Vec<u32> = POTION_DATA.iter().map(|d| d.max_level).collect();
        assert!(caps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("POTION3".parse::<PotionId>(), Ok(PotionId::Potion3));
        assert_eq!(
            "POTION9".parse::<PotionId>(),
            Err(ExpError::UnknownPotion("POTION9".to_string()))
        );
    }

    #[test]
    fn test_count_with() {
        let counts = PotionCount::new().with(PotionId::Potion2, 4);
        assert_eq!(counts[PotionId::Potion2], 4);
        assert_eq!(counts[PotionId::Potion0], 0);
        assert_eq!(counts.total(), 4);
        assert!(!counts.is_empty());
        assert!(PotionCount::new().is_empty());
    }

    #[test]
    fn test_count_serializes_every_key() {
        let json = serde_json::to_string(&PotionCount::new().with(PotionId::Potion5, 2)).unwrap();
        assert_eq!(
            json,
            r#"{"POTION0":0,"POTION1":0,"POTION2":0,"POTION3":0,"POTION4":0,"POTION5":2}"#
        );
    }

    #[test]
    fn test_count_missing_keys_default_to_zero() {
        let counts: PotionCount = serde_json::from_str(r#"{"POTION1":3}"#).unwrap();
        assert_eq!(counts, PotionCount::new().with(PotionId::Potion1, 3));
        assert!(serde_json::from_str::<PotionCount>(r#"{"POTION7":1}"#).is_err());
    }
}
