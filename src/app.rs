use crate::config::{AUTOPLAY_JITTER_MS, AUTOPLAY_MISS_CHANCE, FRAME_INTERVAL, FRAME_INTERVAL_MS};
use crate::core::audio::LogAudio;
use crate::core::clock::{Clock, SteppedClock, SystemClock};
use crate::core::input::{KeyBindings, Lane, LaneEvent};
use crate::game::gameplay;
use crate::game::profile::Settings;
use crate::game::song::Song;
use crate::screens::{MenuInput, Screen, Session, evaluation};
use log::{debug, info, trace};
use rand::Rng;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Command-line options for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub song_index: usize,
    /// Step the clock one frame per iteration instead of waiting on the wall clock.
    pub fast: bool,
}

impl RunOptions {
    pub fn from_args<I, S>(args: I) -> Result<RunOptions, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = RunOptions::default();
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--fast" => options.fast = true,
                _ => {
                    options.song_index = arg
                        .parse()
                        .map_err(|_| format!("Unrecognized argument '{}'", arg))?;
                }
            }
        }
        Ok(options)
    }
}

/// Input source that plays the chart by itself.
///
/// Each note gets one plan when first seen: either a press offset drawn
/// from `[-jitter, jitter]` or a deliberate miss. Presses come out as the
/// key codes bound to each lane, like a keyboard would report them.
struct Autoplay<R: Rng> {
    rng: R,
    jitter_ms: i64,
    miss_chance: f64,
    plans: HashMap<(Lane, i64), Option<i64>>,
}

impl<R: Rng> Autoplay<R> {
    fn new(rng: R, jitter_ms: i64, miss_chance: f64) -> Self {
        Self {
            rng,
            jitter_ms,
            miss_chance,
            plans: HashMap::new(),
        }
    }

    fn presses(
        &mut self,
        state: &gameplay::State,
        bindings: &KeyBindings,
        song_time_ms: i64,
    ) -> Vec<String> {
        let mut lanes: Vec<Lane> = Vec::new();
        for note in state.active.iter().filter(|note| !note.resolved) {
            let rng = &mut self.rng;
            let (jitter, miss_chance) = (self.jitter_ms, self.miss_chance);
            let plan = *self
                .plans
                .entry((note.lane, note.target_time_ms))
                .or_insert_with(|| {
                    if rng.random::<f64>() < miss_chance {
                        None
                    } else {
                        Some(rng.random_range(-jitter..=jitter))
                    }
                });

            let Some(offset_ms) = plan else { continue };
            let due = song_time_ms >= note.target_time_ms + offset_ms;
            if due && !lanes.contains(&note.lane) {
                lanes.push(note.lane);
            }
        }
        lanes
            .into_iter()
            .map(|lane| bindings.code_for(lane).to_string())
            .collect()
    }
}

pub struct App {
    settings: Settings,
    songs: Vec<Arc<Song>>,
    options: RunOptions,
}

impl App {
    pub fn new(settings: Settings, songs: Vec<Arc<Song>>, options: RunOptions) -> Self {
        Self {
            settings,
            songs,
            options,
        }
    }

    /// Plays the selected song to the end with autoplay input.
    pub fn run(self) -> Result<evaluation::State, Box<dyn Error>> {
        let song_count = self.songs.len();
        if song_count == 0 {
            return Err("No songs available".into());
        }

        let mut session = Session::new(self.songs, &self.settings, rand::rng());
        if !session.select_song(self.options.song_index) {
            return Err(format!(
                "Song index {} is out of range ({} songs)",
                self.options.song_index, song_count
            )
            .into());
        }

        let clock: Box<dyn Clock> = if self.options.fast {
            Box::new(SteppedClock::new(FRAME_INTERVAL_MS))
        } else {
            Box::new(SystemClock::new())
        };
        let mut audio = LogAudio::new(self.settings.volume);
        let mut autoplay = Autoplay::new(rand::rng(), AUTOPLAY_JITTER_MS, AUTOPLAY_MISS_CHANCE);

        info!(
            "Autoplaying song {} ({}, speed {}, {} mode).",
            self.options.song_index,
            session.menu().difficulty,
            session.menu().scroll_speed,
            if self.options.fast { "fast" } else { "real-time" }
        );
        for lane in Lane::ALL {
            debug!(
                "Lane {} bound to '{}'.",
                lane,
                self.settings.key_bindings.code_for(lane)
            );
        }
        session.handle_input(MenuInput::Confirm, clock.now_ms(), &mut audio);

        let mut frames: u64 = 0;
        while matches!(session.screen(), Screen::Countdown | Screen::Playing) {
            let frame_start = Instant::now();
            let now = clock.now_ms();

            let codes = match (session.gameplay(), session.song_time_ms(now)) {
                (Some(state), Some(song_time)) => {
                    autoplay.presses(state, &self.settings.key_bindings, song_time)
                }
                _ => Vec::new(),
            };
            let presses: Vec<LaneEvent> = codes
                .iter()
                .filter_map(|code| {
                    let event = self.settings.key_bindings.press(code, now);
                    if event.is_none() {
                        debug!("Ignoring unbound key '{}'.", code);
                    }
                    event
                })
                .collect();
            session.frame(now, &presses, &mut audio);

            if let Some(snapshot) = session.snapshot(now) {
                trace!(
                    "Frame {}: song time {} ms, {} notes on screen, score {}",
                    frames,
                    snapshot.song_time_ms,
                    snapshot.notes.len(),
                    snapshot.scores.score
                );
            }
            frames += 1;

            if !self.options.fast {
                let elapsed = frame_start.elapsed();
                if elapsed < FRAME_INTERVAL {
                    thread::sleep(FRAME_INTERVAL - elapsed);
                }
            }
        }

        info!("Session left play after {} frames.", frames);
        session
            .results()
            .cloned()
            .ok_or_else(|| Box::<dyn Error>::from("Play ended without results"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::chart::Difficulty;
    use crate::game::song::Melody;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parses_song_index_and_fast_flag() {
        assert_eq!(RunOptions::from_args(Vec::<String>::new()), Ok(RunOptions::default()));
        assert_eq!(
            RunOptions::from_args(["2", "--fast"]),
            Ok(RunOptions {
                song_index: 2,
                fast: true
            })
        );
        assert!(RunOptions::from_args(["--loud"]).is_err());
    }

    #[test]
    fn autoplay_presses_once_per_lane_when_due() {
        let melody = Melody::parse(&[("C4", 0.5), ("G4", 0.5)]).unwrap();
        let song = Arc::new(Song::new("Pair", 60.0, melody).unwrap());
        let mut state = gameplay::init(
            song,
            Difficulty::Hard,
            Default::default(),
            &mut StdRng::seed_from_u64(3),
        );
        gameplay::update(&mut state, 0);
        assert_eq!(state.active.len(), 2);

        let bindings = KeyBindings::default();
        let mut autoplay = Autoplay::new(StdRng::seed_from_u64(4), 0, 0.0);
        assert!(autoplay.presses(&state, &bindings, -10).is_empty());
        let codes = autoplay.presses(&state, &bindings, 500);
        assert_eq!(codes, vec!["D".to_string()]);
        assert_eq!(
            bindings.press(&codes[0], 600),
            Some(LaneEvent {
                lane: Lane::Left,
                timestamp_ms: 600
            })
        );
    }

    #[test]
    fn fast_run_judges_every_note() {
        let melody = Melody::parse(&[("C4", 0.5), ("D4", 0.5), ("E4", 0.5), ("F4", 0.5)]).unwrap();
        let song = Arc::new(Song::new("Scale", 120.0, melody).unwrap());
        let mut settings = Settings::default();
        settings.difficulty = Difficulty::Hard;
        let app = App::new(
            settings,
            vec![song],
            RunOptions {
                song_index: 0,
                fast: true,
            },
        );

        let results = app.run().unwrap();
        assert_eq!(results.song_name, "Scale");
        assert_eq!(results.total_notes, 4);
        assert_eq!(results.scores.judged_notes(), 4);
    }

    #[test]
    fn rejects_out_of_range_song() {
        let melody = Melody::parse(&[("C4", 0.5)]).unwrap();
        let song = Arc::new(Song::new("One", 120.0, melody).unwrap());
        let app = App::new(
            Settings::default(),
            vec![song],
            RunOptions {
                song_index: 5,
                fast: true,
            },
        );
        assert!(app.run().is_err());
        assert!(App::new(Settings::default(), Vec::new(), RunOptions::default()).run().is_err());
    }
}
