//! Scoring module - sum-to-ten reward rule and combo tracking
//!
//! Rules:
//! - A committed selection matches when its values sum to exactly `MATCH_TARGET`.
//! - Every match awards `BASE_REWARD`; from the second consecutive match on it
//!   also awards `COMBO_BONUS`.
//! - Any non-matching commit resets the combo to zero.

use crate::types::{BASE_REWARD, COMBO_BONUS, MATCH_TARGET};

/// Result of recording one committed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// Sum hit the target; cells are to be cleared.
    Matched {
        /// Points added by this match
        awarded: u32,
        /// Combo after this match (1 for the first in a run)
        combo: u32,
    },
    /// Sum missed; combo was reset.
    Missed,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }
}

/// Points for a match given the combo value *before* it is incremented.
///
/// `previous_combo >= 1` means the previous commit was also a match.
pub fn match_reward(previous_combo: u32) -> u32 {
    if previous_combo >= 1 {
        BASE_REWARD + COMBO_BONUS
    } else {
        BASE_REWARD
    }
}

/// Score and combo counters for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoring {
    score: u32,
    combo: u32,
    matches: u32,
}

impl Scoring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Total matches this session
    pub fn matches(&self) -> u32 {
        self.matches
    }

    /// Apply the reward rule to a committed selection's sum.
    pub fn record(&mut self, sum: u32) -> MatchOutcome {
        if sum != MATCH_TARGET {
            self.combo = 0;
            return MatchOutcome::Missed;
        }

        let awarded = match_reward(self.combo);
        self.combo = self.combo.saturating_add(1);
        self.score = self.score.saturating_add(awarded);
        self.matches = self.matches.saturating_add(1);
        MatchOutcome::Matched {
            awarded,
            combo: self.combo,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_scores_base_only() {
        let mut s = Scoring::new();
        assert_eq!(
            s.record(10),
            MatchOutcome::Matched {
                awarded: 10,
                combo: 1
            }
        );
        assert_eq!(s.score(), 10);
        assert_eq!(s.combo(), 1);
    }

    #[test]
    fn test_bonus_starts_at_second_consecutive_match() {
        let mut s = Scoring::new();
        s.record(10);
        assert_eq!(
            s.record(10),
            MatchOutcome::Matched {
                awarded: 15,
                combo: 2
            }
        );
        s.record(10);
        assert_eq!(s.score(), 10 + 15 + 15);
        assert_eq!(s.combo(), 3);
        assert_eq!(s.matches(), 3);
    }

    #[test]
    fn test_miss_resets_combo_and_keeps_score() {
        let mut s = Scoring::new();
        s.record(10);
        s.record(10);
        assert_eq!(s.record(9), MatchOutcome::Missed);
        assert_eq!(s.combo(), 0);
        assert_eq!(s.score(), 25);

        // The run restarts without the bonus.
        assert_eq!(
            s.record(10),
            MatchOutcome::Matched {
                awarded: 10,
                combo: 1
            }
        );
        assert_eq!(s.score(), 35);
    }

    #[test]
    fn test_overshoot_is_a_miss() {
        let mut s = Scoring::new();
        assert!(!s.record(11).is_match());
        assert!(!s.record(0).is_match());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_match_reward_table() {
        assert_eq!(match_reward(0), 10);
        assert_eq!(match_reward(1), 15);
        assert_eq!(match_reward(7), 15);
    }

    #[test]
    fn test_reset() {
        let mut s = Scoring::new();
        s.record(10);
        s.reset();
        assert_eq!(s, Scoring::default());
    }
}
