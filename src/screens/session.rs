use crate::core::audio::AudioSink;
use crate::core::clock::PlaybackClock;
use crate::core::input::{Lane, LaneEvent};
use crate::game::gameplay::{self, PlayfieldSnapshot};
use crate::game::judgment::HitResult;
use crate::game::profile::Settings;
use crate::game::song::Song;
use crate::screens::{MenuInput, Screen, ScreenAction, evaluation, menu, pause};
use log::{info, warn};
use rand::Rng;
use std::sync::Arc;

/// Owns one player's trip through Menu, Countdown, Playing, Paused and
/// Results.
///
/// Every method takes the frame timestamp `now_ms` sampled once by the
/// caller. Song time is derived from it through a pausable playback clock.
pub struct Session<R: Rng> {
    songs: Vec<Arc<Song>>,
    screen: Screen,
    menu: menu::State,
    pause: pause::State,
    results: Option<evaluation::State>,
    gameplay: Option<gameplay::State>,
    clock: PlaybackClock,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(songs: Vec<Arc<Song>>, settings: &Settings, rng: R) -> Self {
        info!("Session ready with {} songs.", songs.len());
        Self {
            menu: menu::init(songs.len(), settings),
            songs,
            screen: Screen::Menu,
            pause: pause::init(),
            results: None,
            gameplay: None,
            clock: PlaybackClock::default(),
            rng,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn songs(&self) -> &[Arc<Song>] {
        &self.songs
    }

    pub fn menu(&self) -> &menu::State {
        &self.menu
    }

    pub fn pause_menu(&self) -> &pause::State {
        &self.pause
    }

    pub fn results(&self) -> Option<&evaluation::State> {
        self.results.as_ref()
    }

    pub fn gameplay(&self) -> Option<&gameplay::State> {
        self.gameplay.as_ref()
    }

    /// Song time for `now_ms`, or `None` outside a play.
    pub fn song_time_ms(&self, now_ms: i64) -> Option<i64> {
        self.gameplay
            .as_ref()
            .map(|_| self.clock.song_time_ms(now_ms))
    }

    pub fn select_song(&mut self, index: usize) -> bool {
        menu::select_song(&mut self.menu, index)
    }

    /// Routes a navigation input to the current screen and applies the
    /// resulting transition. Returns the screen actually reached.
    pub fn handle_input<A: AudioSink + ?Sized>(
        &mut self,
        input: MenuInput,
        now_ms: i64,
        audio: &mut A,
    ) -> ScreenAction {
        let action = match self.screen {
            Screen::Menu => menu::handle_input(&mut self.menu, input),
            Screen::Countdown => match input {
                MenuInput::Back => ScreenAction::Navigate(Screen::Menu),
                _ => ScreenAction::None,
            },
            Screen::Playing => match input {
                MenuInput::Back => ScreenAction::Navigate(Screen::Paused),
                _ => ScreenAction::None,
            },
            Screen::Paused => pause::handle_input(&mut self.pause, input),
            Screen::Results => match self.results.as_mut() {
                Some(results) => evaluation::handle_input(results, input),
                None => ScreenAction::Navigate(Screen::Menu),
            },
        };

        match action {
            ScreenAction::Navigate(target) => {
                ScreenAction::Navigate(self.navigate(target, now_ms, audio))
            }
            other => other,
        }
    }

    /// Judges a lane press. Presses outside Countdown and Playing are dropped.
    pub fn press_lane<A: AudioSink + ?Sized>(
        &mut self,
        lane: Lane,
        now_ms: i64,
        audio: &mut A,
    ) -> Option<HitResult> {
        if !matches!(self.screen, Screen::Countdown | Screen::Playing) {
            return None;
        }
        let song_time = self.clock.song_time_ms(now_ms);
        let state = self.gameplay.as_mut()?;
        Some(gameplay::judge_lane_press(state, lane, song_time, audio))
    }

    /// Advances the engine one frame and handles the timed transitions.
    pub fn update<A: AudioSink + ?Sized>(&mut self, now_ms: i64, audio: &mut A) -> ScreenAction {
        if !matches!(self.screen, Screen::Countdown | Screen::Playing) {
            return ScreenAction::None;
        }
        let song_time = self.clock.song_time_ms(now_ms);
        let Some(state) = self.gameplay.as_mut() else {
            return ScreenAction::None;
        };
        gameplay::update(state, song_time);
        let finished = gameplay::is_finished(state, song_time);

        let mut action = ScreenAction::None;
        if self.screen == Screen::Countdown && song_time >= 0 {
            action = ScreenAction::Navigate(self.navigate(Screen::Playing, now_ms, audio));
        }
        if finished {
            action = ScreenAction::Navigate(self.navigate(Screen::Results, now_ms, audio));
        }
        action
    }

    /// One full frame: advance, then the presses polled this frame.
    pub fn frame<A: AudioSink + ?Sized>(
        &mut self,
        now_ms: i64,
        presses: &[LaneEvent],
        audio: &mut A,
    ) -> ScreenAction {
        let action = self.update(now_ms, audio);
        for press in presses {
            self.press_lane(press.lane, press.timestamp_ms, audio);
        }
        action
    }

    pub fn snapshot(&self, now_ms: i64) -> Option<PlayfieldSnapshot> {
        let state = self.gameplay.as_ref()?;
        Some(gameplay::snapshot(state, self.clock.song_time_ms(now_ms)))
    }

    fn navigate<A: AudioSink + ?Sized>(&mut self, target: Screen, now_ms: i64, audio: &mut A) -> Screen {
        match (self.screen, target) {
            (_, Screen::Countdown) => self.start_song(now_ms, audio),
            (Screen::Countdown, Screen::Playing) => {
                audio.start_music();
                self.screen = Screen::Playing;
            }
            (Screen::Paused, Screen::Playing) => {
                self.clock.resume(now_ms);
                audio.resume_music();
                self.screen = Screen::Playing;
                info!("Resumed at song time {} ms.", self.clock.song_time_ms(now_ms));
            }
            (Screen::Playing, Screen::Paused) => {
                self.clock.pause(now_ms);
                audio.pause_music();
                self.pause = pause::init();
                self.screen = Screen::Paused;
                info!("Paused at song time {} ms.", self.clock.song_time_ms(now_ms));
            }
            (_, Screen::Results) => self.finish(audio),
            (_, Screen::Menu) => {
                audio.stop_music();
                self.gameplay = None;
                self.results = None;
                self.screen = Screen::Menu;
                info!("Returned to menu.");
            }
            (from, to) => warn!("Ignoring transition {:?} -> {:?}.", from, to),
        }
        self.screen
    }

    fn start_song<A: AudioSink + ?Sized>(&mut self, now_ms: i64, audio: &mut A) {
        let Some(song) = self.songs.get(self.menu.song_index).cloned() else {
            warn!("Song index {} is out of range.", self.menu.song_index);
            return;
        };
        if matches!(self.screen, Screen::Playing | Screen::Paused) {
            audio.stop_music();
        }

        let speed = self.menu.scroll_speed;
        let state = gameplay::init(song, self.menu.difficulty, speed, &mut self.rng);
        let delay_ms = speed.music_start_delay_ms();
        let empty = state.waiting.is_empty() && state.duration_ms == 0;

        self.clock = PlaybackClock::starting_at(now_ms + delay_ms);
        self.gameplay = Some(state);
        self.results = None;
        self.screen = Screen::Countdown;
        info!("Countdown started; music in {} ms.", delay_ms);

        if empty {
            info!("Chart is empty; going straight to results.");
            self.finish(audio);
        }
    }

    fn finish<A: AudioSink + ?Sized>(&mut self, audio: &mut A) {
        audio.stop_music();
        let Some(state) = self.gameplay.take() else {
            warn!("No play in progress to finish.");
            return;
        };
        self.results = Some(evaluation::init(
            &state.song.name,
            state.difficulty,
            state.total_notes,
            state.scores,
        ));
        self.screen = Screen::Results;
    }
}
