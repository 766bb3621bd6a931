//! Experience table
//!
//! Cumulative experience required to reach each level. The table is built at
//! compile time and shared through [`EXPERIENCE`].

use crate::error::{ExpError, ExpResult};

/// Highest level the table covers
pub const MAX_LEVEL: u32 = 300;

/// Spans for levels 1..=9
const EARLY_SPANS: [u64; 9] = [15, 34, 57, 92, 135, 372, 560, 840, 1242];

/// Level 200 restarts the curve at a fixed value
const LEVEL_200_SPAN: u64 = 2_207_026_470;

/// Growth segments: (first level, last level, percent of previous span)
const SEGMENTS: [(u32, u32, u64); 37] = [
    (10, 14, 100),
    (15, 29, 120),
    (30, 34, 100),
    (35, 39, 120),
    (40, 59, 108),
    (60, 64, 100),
    (65, 74, 110),
    (75, 99, 107),
    (100, 104, 100),
    (105, 139, 107),
    (140, 199, 103),
    (201, 209, 112),
    (210, 210, 160),
    (211, 219, 111),
    (220, 220, 160),
    (221, 229, 108),
    (230, 230, 160),
    (231, 239, 106),
    (240, 240, 150),
    (241, 249, 106),
    (250, 250, 150),
    (251, 259, 106),
    (260, 260, 150),
    (261, 269, 106),
    (270, 270, 200),
    (271, 274, 110),
    (275, 275, 200),
    (276, 279, 110),
    (280, 280, 200),
    (281, 284, 110),
    (285, 285, 200),
    (286, 289, 110),
    (290, 290, 200),
    (291, 294, 110),
    (295, 295, 200),
    (296, 299, 110),
    (300, 300, 100),
];

const LEN: usize = MAX_LEVEL as usize + 2;

/// The shared experience table
pub static EXPERIENCE: ExperienceTable = ExperienceTable::build();

/// Cumulative requirements for levels `1..=MAX_LEVEL + 1`
///
/// `requirements[level]` is the total experience needed to reach `level`;
/// index 0 is unused.
#[derive(Debug)]
pub struct ExperienceTable {
    requirements: [u64; LEN],
}

const fn segment_percent(level: u32) -> u64 {
    let mut i = 0;
    while i < SEGMENTS.len() {
        let (first, last, percent) = SEGMENTS[i];
        if level >= first && level <= last {
            return percent;
        }
        i += 1;
    }
    panic!("level has no growth segment");
}

impl ExperienceTable {
    const fn build() -> Self {
        let mut spans = [0u64; LEN];
        let mut level = 1;
        while level <= MAX_LEVEL as usize {
            spans[level] = if level <= EARLY_SPANS.len() {
                EARLY_SPANS[level - 1]
            } else if level == 200 {
                LEVEL_200_SPAN
            } else {
                spans[level - 1] * segment_percent(level as u32) / 100
            };
            level += 1;
        }

        let mut requirements = [0u64; LEN];
        let mut level = 2;
        while level < LEN {
            requirements[level] = requirements[level - 1] + spans[level - 1];
            level += 1;
        }

        Self { requirements }
    }

    /// Total experience needed to reach `level`
    pub fn requirement(&self, level: u32) -> ExpResult<u64> {
        check_level(level)?;
        Ok(self.requirements[level as usize])
    }

    /// Experience needed to go from `level` to `level + 1`
    pub fn level_span(&self, level: u32) -> ExpResult<u64> {
        check_level(level)?;
        let level = level as usize;
        Ok(self.requirements[level + 1] - self.requirements[level])
    }

    /// First total that no longer fits in the table
    pub fn limit(&self) -> u64 {
        self.requirements[LEN - 1]
    }

    /// Highest level whose requirement does not exceed `total`
    pub fn level_at(&self, total: u64) -> ExpResult<u32> {
        if total >= self.limit() {
            return Err(ExpError::LevelOverflow { total, limit: self.limit() });
        }
        // requirements[1..] is sorted; count the entries <= total
        let reached = self.requirements[1..LEN].partition_point(|&req| req <= total);
        Ok(reached as u32)
    }
}

fn check_level(level: u32) -> ExpResult<()> {
    if (1..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        log::debug!("Rejected level {} outside table", level);
        Err(ExpError::OutOfRange { level, max: MAX_LEVEL })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_starts_at_zero() {
        assert_eq!(EXPERIENCE.requirement(1), Ok(0));
        assert_eq!(EXPERIENCE.requirement(2), Ok(15));
        assert_eq!(EXPERIENCE.requirement(3), Ok(49));
    }

    #[test]
    fn test_requirement_strictly_increasing() {
        for level in 1..MAX_LEVEL {
            let here = EXPERIENCE.requirement(level).unwrap();
            let next = EXPERIENCE.requirement(level + 1).unwrap();
            assert!(next > here, "level {} -> {}", level, level + 1);
        }
    }

    #[test]
    fn test_spans_never_shrink() {
        // Potions rely on this to stay injective
        for level in 1..MAX_LEVEL {
            assert!(EXPERIENCE.level_span(level).unwrap() <= EXPERIENCE.level_span(level + 1).unwrap());
        }
    }

    #[test]
    fn test_level_200_span() {
        assert_eq!(EXPERIENCE.level_span(200), Ok(2_207_026_470));
        assert_eq!(EXPERIENCE.level_span(201), Ok(2_207_026_470 * 112 / 100));
    }

    #[test]
    fn test_out_of_range_levels() {
        assert_eq!(EXPERIENCE.requirement(0), Err(ExpError::OutOfRange { level: 0, max: MAX_LEVEL }));
        assert!(EXPERIENCE.level_span(MAX_LEVEL + 1).is_err());
        assert!(EXPERIENCE.level_span(MAX_LEVEL).is_ok());
    }

    #[test]
    fn test_level_at_boundaries() {
        assert_eq!(EXPERIENCE.level_at(0), Ok(1));
        assert_eq!(EXPERIENCE.level_at(14), Ok(1));
        assert_eq!(EXPERIENCE.level_at(15), Ok(2));
        let req_200 = EXPERIENCE.requirement(200).unwrap();
        assert_eq!(EXPERIENCE.level_at(req_200 - 1), Ok(199));
        assert_eq!(EXPERIENCE.level_at(req_200), Ok(200));
        assert_eq!(EXPERIENCE.level_at(EXPERIENCE.limit() - 1), Ok(MAX_LEVEL));
    }

    #[test]
    fn test_level_at_overflow() {
        let limit = EXPERIENCE.limit();
        assert_eq!(EXPERIENCE.level_at(limit), Err(ExpError::LevelOverflow { total: limit, limit }));
    }
}
