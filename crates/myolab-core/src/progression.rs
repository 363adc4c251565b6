//! Trainee progression.
//!
//! Level and XP counters shared by the mission and quiz loops. Levelling
//! uses a single fixed threshold: every 100 XP crosses into the next level
//! and the remainder carries over.

use serde::{Deserialize, Serialize};

use crate::error::{ProgressionError, ProgressionResult};

/// Result of crediting XP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    /// Level after the credit
    pub level: u32,
    /// XP after the credit, always `< 100`
    pub xp: u32,
    /// True iff at least one level threshold was crossed
    pub leveled_up: bool,
}

/// Level/XP counters.
///
/// Invariant: `xp < 100` at all times; `level >= 1`. The only mutation
/// path is [`Progression::credit`] (and its checked wrapper
/// [`Progression::add_xp`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    level: u32,
    xp: u32,
}

impl Progression {
    /// XP required to cross into the next level.
    pub const XP_PER_LEVEL: u32 = 100;

    /// Fresh progression: level 1, no XP.
    #[must_use]
    pub const fn new() -> Self {
        Self { level: 1, xp: 0 }
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Current XP toward the next level.
    #[must_use]
    pub const fn xp(&self) -> u32 {
        self.xp
    }

    /// Credit a non-negative XP amount.
    ///
    /// The threshold check loops, so a single large credit can cross
    /// several levels; the `xp < 100` invariant holds for any amount.
    pub fn credit(&mut self, amount: u32) -> XpGain {
        // Widened so xp + amount cannot overflow near u32::MAX.
        let mut xp = u64::from(self.xp) + u64::from(amount);
        let mut leveled_up = false;

        while xp >= u64::from(Self::XP_PER_LEVEL) {
            xp -= u64::from(Self::XP_PER_LEVEL);
            self.level += 1;
            leveled_up = true;
        }

        // xp < 100 after the loop, so the narrowing is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let xp = xp as u32;

        self.xp = xp;
        XpGain {
            level: self.level,
            xp: self.xp,
            leveled_up,
        }
    }

    /// Credit an XP amount, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressionError::InvalidAmount`] for a negative amount;
    /// XP is never deducted.
    pub fn add_xp(&mut self, amount: i64) -> ProgressionResult<XpGain> {
        if amount < 0 {
            return Err(ProgressionError::InvalidAmount { amount });
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        Ok(self.credit(amount))
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_below_threshold() {
        let mut progression = Progression::new();
        let gain = progression.credit(30);

        assert_eq!(gain, XpGain { level: 1, xp: 30, leveled_up: false });
    }

    #[test]
    fn test_threshold_crossing_carries_remainder() {
        let mut progression = Progression::new();
        progression.credit(85);

        let gain = progression.credit(30);
        assert_eq!(gain, XpGain { level: 2, xp: 15, leveled_up: true });
        assert_eq!(progression.level(), 2);
        assert_eq!(progression.xp(), 15);
    }

    #[test]
    fn test_large_credit_crosses_multiple_levels() {
        let mut progression = Progression::new();
        let gain = progression.credit(230);

        assert_eq!(gain, XpGain { level: 3, xp: 30, leveled_up: true });
    }

    #[test]
    fn test_exact_threshold_leaves_zero_xp() {
        let mut progression = Progression::new();
        let gain = progression.credit(100);

        assert_eq!(gain, XpGain { level: 2, xp: 0, leveled_up: true });
    }

    #[test]
    fn test_zero_credit_changes_nothing() {
        let mut progression = Progression::new();
        let gain = progression.credit(0);

        assert_eq!(gain, XpGain { level: 1, xp: 0, leveled_up: false });
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let mut progression = Progression::new();
        let result = progression.add_xp(-10);

        assert_eq!(result, Err(ProgressionError::InvalidAmount { amount: -10 }));
        assert_eq!(progression.xp(), 0);
    }

    #[test]
    fn test_add_xp_accepts_non_negative() {
        let mut progression = Progression::new();
        let gain = progression.add_xp(20).unwrap();

        assert_eq!(gain.xp, 20);
        assert!(!gain.leveled_up);
    }
}
