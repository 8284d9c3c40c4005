use crate::game::judgment::Grade;
use log::{debug, info};

/// Fire-and-forget audio collaborator.
///
/// The session calls these on state transitions and judgments; nothing is
/// awaited and no return value is consumed.
pub trait AudioSink {
    fn play_hit_sound(&mut self, grade: Grade);
    fn start_music(&mut self);
    fn stop_music(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
}

/// Hit sound pitch per grade, in Hz. Misses get the low thud.
pub fn hit_sound_frequency(grade: Grade) -> f32 {
    match grade {
        Grade::Perfect => 880.0,
        Grade::Great => 660.0,
        Grade::Good => 440.0,
        Grade::Miss => 220.0,
    }
}

/// Audio sink for headless runs: every command becomes a log line.
#[derive(Debug, Clone)]
pub struct LogAudio {
    volume: f32,
    music_playing: bool,
}

impl LogAudio {
    pub fn new(volume: f32) -> Self {
        info!("Audio: logging sink initialized (volume {:.2}).", volume);
        Self {
            volume,
            music_playing: false,
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }
}

impl AudioSink for LogAudio {
    fn play_hit_sound(&mut self, grade: Grade) {
        debug!(
            "Audio: hit sound {:?} ({:.0} Hz, volume {:.2})",
            grade,
            hit_sound_frequency(grade),
            self.volume
        );
    }

    fn start_music(&mut self) {
        self.music_playing = true;
        info!("Audio: music started.");
    }

    fn stop_music(&mut self) {
        if self.music_playing {
            info!("Audio: music stopped.");
        }
        self.music_playing = false;
    }

    fn pause_music(&mut self) {
        self.music_playing = false;
        info!("Audio: music paused.");
    }

    fn resume_music(&mut self) {
        self.music_playing = true;
        info!("Audio: music resumed.");
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_hit_sound(&mut self, _grade: Grade) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn better_grades_sound_higher() {
        assert!(hit_sound_frequency(Grade::Perfect) > hit_sound_frequency(Grade::Great));
        assert!(hit_sound_frequency(Grade::Great) > hit_sound_frequency(Grade::Good));
        assert!(hit_sound_frequency(Grade::Good) > hit_sound_frequency(Grade::Miss));
    }

    #[test]
    fn log_audio_tracks_music_state() {
        let mut audio = LogAudio::new(0.5);
        assert!(!audio.is_music_playing());
        audio.start_music();
        assert!(audio.is_music_playing());
        audio.pause_music();
        assert!(!audio.is_music_playing());
        audio.resume_music();
        assert!(audio.is_music_playing());
        audio.stop_music();
        assert!(!audio.is_music_playing());
    }
}
