use crate::config::{
    GOOD_SCORE, GOOD_WINDOW_MS, GREAT_SCORE, GREAT_WINDOW_MS, PERFECT_SCORE, PERFECT_WINDOW_MS,
};
use crate::core::input::Lane;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Perfect,
    Great,
    Good,
    Miss,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Perfect, Grade::Great, Grade::Good, Grade::Miss];

    pub const fn is_hit(self) -> bool {
        !matches!(self, Grade::Miss)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Judgment {
    /// Signed press error: positive when the press came after the target.
    pub offset_ms: i64,
    pub grade: Grade,
    pub lane: Lane,
    pub target_time_ms: i64,
}

/// Outcome of a lane press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitResult {
    /// Nothing unresolved in the lane; the press is ignored.
    NoNoteInLane,
    Judged(Judgment),
}

impl HitResult {
    pub fn grade(&self) -> Option<Grade> {
        match self {
            HitResult::NoNoteInLane => None,
            HitResult::Judged(judgment) => Some(judgment.grade),
        }
    }
}

pub fn grade_for_offset(offset_ms: i64) -> Grade {
    let diff = offset_ms.abs();
    if diff <= PERFECT_WINDOW_MS {
        Grade::Perfect
    } else if diff <= GREAT_WINDOW_MS {
        Grade::Great
    } else if diff <= GOOD_WINDOW_MS {
        Grade::Good
    } else {
        Grade::Miss
    }
}

/// Per-hit base score before the combo multiplier. Misses score nothing.
pub fn base_score_for(grade: Grade) -> u64 {
    match grade {
        Grade::Perfect => PERFECT_SCORE,
        Grade::Great => GREAT_SCORE,
        Grade::Good => GOOD_SCORE,
        Grade::Miss => 0,
    }
}
