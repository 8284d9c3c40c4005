use crate::core::input::Lane;
use crate::game::song::{Melody, Song};
use log::debug;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Minimum spacing between emitted notes, in beats.
    pub const fn tolerance_beats(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 0.5,
            Difficulty::Hard => 0.25,
        }
    }

    /// Chance that an otherwise eligible melody note becomes a chart note.
    pub const fn inclusion_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Medium => 0.8,
            Difficulty::Hard => 1.0,
        }
    }

    pub fn min_interval_secs(self, bpm: f64) -> f64 {
        self.tolerance_beats() * (60.0 / bpm)
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Out-of-range indices clamp to the nearest difficulty.
    pub fn from_index_clamped(index: i64) -> Difficulty {
        match index {
            i64::MIN..=0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    pub fn next(self) -> Difficulty {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Difficulty {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Difficulty value is empty".to_string());
        }
        if let Ok(index) = trimmed.parse::<i64>() {
            return Ok(Difficulty::from_index_clamped(index));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!(
                "Difficulty '{}' must be Easy, Medium, Hard or an index",
                trimmed
            )),
        }
    }
}

/// One hit event: the lane to press and when the press is due.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledNote {
    pub target_time_ms: i64,
    pub lane: Lane,
}

/// Precomputed chart for one (melody, difficulty) pair.
///
/// `notes` is sorted by `target_time_ms` ascending; `duration_ms` is the full
/// melody length, which is at or after the last target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub notes: Vec<ScheduledNote>,
    pub duration_ms: i64,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Converts a melody into a chart.
///
/// A melody note becomes a chart note only when at least the difficulty's
/// minimum interval has elapsed since the previous emission and the
/// inclusion roll succeeds. The roll is skipped for notes that fail the
/// spacing test, so the RNG stream only advances on eligible notes.
pub fn generate<R: Rng + ?Sized>(
    melody: &Melody,
    bpm: f64,
    difficulty: Difficulty,
    rng: &mut R,
) -> Schedule {
    let min_interval = difficulty.min_interval_secs(bpm);
    let chance = difficulty.inclusion_probability();

    let mut notes = Vec::new();
    let mut elapsed_secs = 0.0_f64;
    let mut last_emitted_secs = -min_interval;

    for note in melody.notes() {
        if elapsed_secs - last_emitted_secs >= min_interval && rng.random::<f64>() < chance {
            notes.push(ScheduledNote {
                target_time_ms: secs_to_ms(elapsed_secs),
                lane: note.pitch.lane(),
            });
            last_emitted_secs = elapsed_secs;
        }
        elapsed_secs += note.duration_secs;
    }

    debug!(
        "Generated {} chart notes from {} melody notes ({}, {:.0} BPM, min interval {:.3}s).",
        notes.len(),
        melody.len(),
        difficulty,
        bpm,
        min_interval
    );

    Schedule {
        notes,
        duration_ms: secs_to_ms(elapsed_secs),
    }
}

/// Convenience wrapper using the song's own BPM.
pub fn generate_for_song<R: Rng + ?Sized>(song: &Song, difficulty: Difficulty, rng: &mut R) -> Schedule {
    generate(&song.melody, song.bpm, difficulty, rng)
}

#[inline(always)]
fn secs_to_ms(secs: f64) -> i64 {
    (secs * 1000.0).round() as i64
}
