use crate::core::input::Lane;
use crate::game::chart::ScheduledNote;

/// A chart note that has spawned and is travelling toward the hit line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveNote {
    pub lane: Lane,
    pub target_time_ms: i64,
    pub spawn_time_ms: i64,
    pub resolved: bool,
}

impl LiveNote {
    pub fn spawn(scheduled: &ScheduledNote, approach_ms: i64) -> Self {
        Self {
            lane: scheduled.lane,
            target_time_ms: scheduled.target_time_ms,
            spawn_time_ms: scheduled.target_time_ms - approach_ms,
            resolved: false,
        }
    }

    /// Fraction of the approach travelled: 0 at spawn, 1 at the hit line,
    /// above 1 once the note has passed it.
    pub fn progress(&self, now_ms: i64, approach_ms: i64) -> f32 {
        if approach_ms <= 0 {
            return 1.0;
        }
        ((now_ms - self.spawn_time_ms) as f32 / approach_ms as f32).max(0.0)
    }

    /// Marks the note resolved. Returns false if it already was.
    pub fn resolve(&mut self) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> LiveNote {
        LiveNote::spawn(
            &ScheduledNote {
                target_time_ms: 5000,
                lane: Lane::Up,
            },
            2000,
        )
    }

    #[test]
    fn spawn_time_is_target_minus_approach() {
        let note = note();
        assert_eq!(note.spawn_time_ms, 3000);
        assert_eq!(note.lane, Lane::Up);
        assert!(!note.resolved);
    }

    #[test]
    fn progress_tracks_travel() {
        let note = note();
        assert_eq!(note.progress(2000, 2000), 0.0);
        assert_eq!(note.progress(3000, 2000), 0.0);
        assert_eq!(note.progress(4000, 2000), 0.5);
        assert_eq!(note.progress(5000, 2000), 1.0);
        assert!(note.progress(5500, 2000) > 1.0);
    }

    #[test]
    fn resolves_exactly_once() {
        let mut note = note();
        assert!(note.resolve());
        assert!(!note.resolve());
        assert!(note.resolved);
    }
}
