//! XP thresholds and level lookup
//!
//! The threshold table and the rounding rules are part of the save format:
//! the level cached in a learner record must match what [`level_for`]
//! recomputes from the same total.

use serde::{Deserialize, Serialize};

/// XP required to reach each level (index = level)
pub const LEVEL_THRESHOLDS: [u64; 15] = [
    0, 100, 250, 500, 1000, 2000, 3500, 5500, 8000, 11000, 15000, 20000, 26000, 33000, 41000,
];

/// Label for each level; levels past the table reuse the last one
pub const LEVEL_LABELS: [&str; 15] = [
    "Novice",
    "Rookie",
    "Apprentice",
    "Student",
    "Adept",
    "Skilled",
    "Expert",
    "Master",
    "Elite",
    "Champion",
    "Legend",
    "Grandmaster",
    "Sage",
    "Virtuoso",
    "Supreme",
];

pub const MAX_LEVEL: u32 = (LEVEL_THRESHOLDS.len() - 1) as u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u32,
    pub current_xp: u64,
    /// XP still needed for the next level (0 at max level)
    pub xp_to_next: u64,
    /// Width of the current level band in XP
    pub total_xp_for_next_level: u64,
    /// Progress through the current band, 0-100 with two decimals
    pub progress: f64,
    pub label: String,
}

pub fn label_for(level: u32) -> &'static str {
    LEVEL_LABELS
        .get(level as usize)
        .copied()
        .unwrap_or(LEVEL_LABELS[LEVEL_LABELS.len() - 1])
}

/// Level index whose threshold is the highest one not above `total_xp`
pub fn level_index(total_xp: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| total_xp >= threshold)
        .unwrap_or(0) as u32
}

/// Look up level, band progress and label for an XP total
pub fn level_for(total_xp: u64) -> LevelInfo {
    let level = level_index(total_xp);
    let current_threshold = LEVEL_THRESHOLDS[level as usize];

    if level >= MAX_LEVEL {
        return LevelInfo {
            level,
            current_xp: total_xp,
            xp_to_next: 0,
            total_xp_for_next_level: 0,
            progress: 100.0,
            label: label_for(level).to_string(),
        };
    }

    let next_threshold = LEVEL_THRESHOLDS[level as usize + 1];
    let band = next_threshold - current_threshold;
    let raw = (total_xp - current_threshold) as f64 / band as f64 * 100.0;
    let progress = ((raw * 100.0).round() / 100.0).clamp(0.0, 100.0);

    LevelInfo {
        level,
        current_xp: total_xp,
        xp_to_next: next_threshold - total_xp,
        total_xp_for_next_level: band,
        progress,
        label: label_for(level).to_string(),
    }
}

/// Compact XP display: `950`, `1.5k`, `41.0k`
pub fn format_xp(xp: u64) -> String {
    if xp >= 1000 {
        format!("{:.1}k", xp as f64 / 1000.0)
    } else {
        xp.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_xp_is_novice() {
        let info = level_for(0);
        assert_eq!(info.level, 0);
        assert_eq!(info.label, "Novice");
        assert_eq!(info.xp_to_next, 100);
        assert_eq!(info.total_xp_for_next_level, 100);
        assert_eq!(info.progress, 0.0);
    }

    #[test]
    fn test_exact_threshold_starts_level() {
        let info = level_for(250);
        assert_eq!(info.level, 2);
        assert_eq!(info.label, "Apprentice");
        assert_eq!(info.progress, 0.0);
        assert_eq!(info.xp_to_next, 250);
    }

    #[test]
    fn test_progress_rounds_to_two_decimals() {
        // 1/3 of the way through 250..500
        let info = level_for(250 + 83);
        assert_eq!(info.level, 2);
        assert_eq!(info.progress, 33.2);

        let info = level_for(101);
        assert_eq!(info.progress, 0.67);
    }

    #[test]
    fn test_max_level() {
        let info = level_for(41000);
        assert_eq!(info.level, MAX_LEVEL);
        assert_eq!(info.label, "Supreme");
        assert_eq!(info.progress, 100.0);
        assert_eq!(info.xp_to_next, 0);

        let info = level_for(1_000_000);
        assert_eq!(info.level, 14);
        assert_eq!(info.xp_to_next, 0);
    }

    #[test]
    fn test_labels_beyond_table_reuse_last() {
        assert_eq!(label_for(14), "Supreme");
        assert_eq!(label_for(15), "Supreme");
        assert_eq!(label_for(99), "Supreme");
        assert_eq!(label_for(10), "Legend");
    }

    #[test]
    fn test_format_xp() {
        assert_eq!(format_xp(0), "0");
        assert_eq!(format_xp(999), "999");
        assert_eq!(format_xp(1000), "1.0k");
        assert_eq!(format_xp(1540), "1.5k");
    }

    proptest! {
        #[test]
        fn prop_level_brackets_total(total in 0u64..100_000) {
            let info = level_for(total);
            let idx = info.level as usize;
            prop_assert!(LEVEL_THRESHOLDS[idx] <= total);
            if info.level < MAX_LEVEL {
                prop_assert!(total < LEVEL_THRESHOLDS[idx + 1]);
            } else {
                prop_assert!(total >= LEVEL_THRESHOLDS[LEVEL_THRESHOLDS.len() - 1]);
            }
            prop_assert!((0.0..=100.0).contains(&info.progress));
        }

        #[test]
        fn prop_level_is_monotonic(a in 0u64..60_000, b in 0u64..60_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for(lo).level <= level_for(hi).level);
        }
    }
}
