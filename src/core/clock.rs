use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic milliseconds since an arbitrary epoch.
///
/// The frame loop samples this exactly once per frame and hands the value to
/// every engine call made during that frame.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by `Instant`, epoch at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        self.epoch.elapsed().as_millis() as i64
    }
}

/// Clock that moves forward by a fixed step on every sample.
///
/// Lets a headless session run faster than real time while still seeing a
/// strictly increasing frame timeline.
#[derive(Debug)]
pub struct SteppedClock {
    now: Cell<i64>,
    step_ms: i64,
}

impl SteppedClock {
    pub fn new(step_ms: i64) -> Self {
        Self {
            now: Cell::new(0),
            step_ms,
        }
    }
}

impl Clock for SteppedClock {
    fn now_ms(&self) -> i64 {
        let now = self.now.get();
        self.now.set(now + self.step_ms);
        now
    }
}

/// Maps frame timestamps onto song time and supports freezing it.
///
/// Song time is `now - origin`, negative before the music starts. Pausing
/// records the pause instant; resuming shifts the origin forward by the
/// paused span so song time continues where it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackClock {
    origin_ms: i64,
    paused_at_ms: Option<i64>,
}

impl PlaybackClock {
    /// Song time 0 happens at frame time `origin_ms`.
    pub fn starting_at(origin_ms: i64) -> Self {
        Self {
            origin_ms,
            paused_at_ms: None,
        }
    }

    pub fn song_time_ms(&self, now_ms: i64) -> i64 {
        match self.paused_at_ms {
            Some(paused_at) => paused_at - self.origin_ms,
            None => now_ms - self.origin_ms,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at_ms.is_some()
    }

    pub fn pause(&mut self, now_ms: i64) {
        if self.paused_at_ms.is_none() {
            self.paused_at_ms = Some(now_ms);
        }
    }

    pub fn resume(&mut self, now_ms: i64) {
        if let Some(paused_at) = self.paused_at_ms.take() {
            self.origin_ms += (now_ms - paused_at).max(0);
        }
    }
}
