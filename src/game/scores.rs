use crate::config::{GOOD_ACCURACY_WEIGHT, GREAT_ACCURACY_WEIGHT, PERFECT_ACCURACY_WEIGHT};
use crate::game::judgment::{Grade, base_score_for};
use std::collections::HashMap;

/// Running score for one play of a chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub counts: HashMap<Grade, u32>,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            counts: HashMap::from_iter(Grade::ALL.map(|grade| (grade, 0))),
        }
    }
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one judgment. Hits grow the combo and score `base * combo`;
    /// a miss breaks the combo and scores nothing.
    pub fn apply(&mut self, grade: Grade) {
        *self.counts.entry(grade).or_insert(0) += 1;
        if grade.is_hit() {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);
            self.score += base_score_for(grade) * self.combo as u64;
        } else {
            self.combo = 0;
        }
    }

    pub fn count(&self, grade: Grade) -> u32 {
        self.counts.get(&grade).copied().unwrap_or(0)
    }

    pub fn judged_notes(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Weighted accuracy in percent over every judged note, misses included.
    pub fn accuracy(&self) -> f64 {
        let judged = self.judged_notes();
        if judged == 0 {
            return 0.0;
        }
        let earned = self.count(Grade::Perfect) as f64 * PERFECT_ACCURACY_WEIGHT
            + self.count(Grade::Great) as f64 * GREAT_ACCURACY_WEIGHT
            + self.count(Grade::Good) as f64 * GOOD_ACCURACY_WEIGHT;
        earned / judged as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_perfects_multiply_by_combo() {
        let mut scores = ScoreState::new();
        for _ in 0..3 {
            scores.apply(Grade::Perfect);
        }
        assert_eq!(scores.score, 6000);
        assert_eq!(scores.combo, 3);
        assert_eq!(scores.max_combo, 3);
        assert_eq!(scores.count(Grade::Perfect), 3);
    }

    #[test]
    fn miss_resets_combo_but_keeps_score_and_max() {
        let mut scores = ScoreState::new();
        scores.apply(Grade::Great); // 700 * 1
        scores.apply(Grade::Good); // 300 * 2
        scores.apply(Grade::Miss);
        assert_eq!(scores.combo, 0);
        assert_eq!(scores.max_combo, 2);
        assert_eq!(scores.score, 1300);
        assert_eq!(scores.count(Grade::Miss), 1);

        scores.apply(Grade::Perfect); // 1000 * 1
        assert_eq!(scores.combo, 1);
        assert_eq!(scores.score, 2300);
        assert_eq!(scores.max_combo, 2);
    }

    #[test]
    fn accuracy_weights_grades() {
        let mut scores = ScoreState::new();
        assert_eq!(scores.accuracy(), 0.0);
        scores.apply(Grade::Perfect);
        scores.apply(Grade::Great);
        scores.apply(Grade::Good);
        scores.apply(Grade::Miss);
        assert_eq!(scores.judged_notes(), 4);
        assert!((scores.accuracy() - 56.25).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_everything() {
        let mut scores = ScoreState::new();
        scores.apply(Grade::Perfect);
        scores.reset();
        assert_eq!(scores, ScoreState::default());
        assert_eq!(scores.counts.len(), 4);
    }
}
