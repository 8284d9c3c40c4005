use crate::game::chart::Difficulty;
use crate::game::profile::Settings;
use crate::game::scroll::ScrollSpeedSetting;
use crate::screens::{MenuInput, Screen, ScreenAction, step_wrapping};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuField {
    Song,
    Difficulty,
    Speed,
}

impl MenuField {
    pub fn next(self) -> MenuField {
        match self {
            MenuField::Song => MenuField::Difficulty,
            MenuField::Difficulty => MenuField::Speed,
            MenuField::Speed => MenuField::Song,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub song_index: usize,
    pub difficulty: Difficulty,
    pub scroll_speed: ScrollSpeedSetting,
    pub focus: MenuField,
    song_count: usize,
}

pub fn init(song_count: usize, settings: &Settings) -> State {
    State {
        song_index: 0,
        difficulty: settings.difficulty,
        scroll_speed: settings.scroll_speed,
        focus: MenuField::Song,
        song_count,
    }
}

/// Selects a song by index. Returns false when the index is out of range.
pub fn select_song(state: &mut State, index: usize) -> bool {
    if index >= state.song_count {
        return false;
    }
    state.song_index = index;
    true
}

pub fn handle_input(state: &mut State, input: MenuInput) -> ScreenAction {
    match input {
        MenuInput::Up | MenuInput::Down => {
            let forward = input == MenuInput::Down;
            match state.focus {
                MenuField::Song => {
                    state.song_index = step_wrapping(state.song_index, state.song_count, forward);
                }
                MenuField::Difficulty => {
                    state.difficulty = if forward {
                        state.difficulty.next()
                    } else {
                        state.difficulty.prev()
                    };
                }
                MenuField::Speed => {
                    state.scroll_speed = if forward {
                        state.scroll_speed.slower()
                    } else {
                        state.scroll_speed.faster()
                    };
                }
            }
        }
        MenuInput::Left => state.scroll_speed = state.scroll_speed.slower(),
        MenuInput::Right => state.scroll_speed = state.scroll_speed.faster(),
        MenuInput::NextField => state.focus = state.focus.next(),
        MenuInput::Confirm => {
            if state.song_count == 0 {
                warn!("No songs available; cannot start.");
                return ScreenAction::None;
            }
            return ScreenAction::Navigate(Screen::Countdown);
        }
        MenuInput::Back => return ScreenAction::Exit,
    }
    debug!(
        "Menu: song {}, difficulty {}, speed {}, focus {:?}",
        state.song_index, state.difficulty, state.scroll_speed, state.focus
    );
    ScreenAction::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(song_count: usize) -> State {
        init(song_count, &Settings::default())
    }

    #[test]
    fn starts_from_settings() {
        let mut settings = Settings::default();
        settings.difficulty = Difficulty::Hard;
        settings.scroll_speed = ScrollSpeedSetting::clamped(8);
        let state = init(3, &settings);
        assert_eq!(state.song_index, 0);
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.scroll_speed.value(), 8);
        assert_eq!(state.focus, MenuField::Song);
    }

    #[test]
    fn song_selection_wraps() {
        let mut state = menu(3);
        handle_input(&mut state, MenuInput::Up);
        assert_eq!(state.song_index, 2);
        handle_input(&mut state, MenuInput::Down);
        assert_eq!(state.song_index, 0);
    }

    #[test]
    fn focus_cycles_and_difficulty_wraps() {
        let mut state = menu(3);
        handle_input(&mut state, MenuInput::NextField);
        assert_eq!(state.focus, MenuField::Difficulty);
        handle_input(&mut state, MenuInput::Down);
        assert_eq!(state.difficulty, Difficulty::Hard);
        handle_input(&mut state, MenuInput::Down);
        assert_eq!(state.difficulty, Difficulty::Easy);
        handle_input(&mut state, MenuInput::NextField);
        handle_input(&mut state, MenuInput::NextField);
        assert_eq!(state.focus, MenuField::Song);
    }

    #[test]
    fn speed_clamps_at_both_ends() {
        let mut state = menu(1);
        for _ in 0..20 {
            handle_input(&mut state, MenuInput::Right);
        }
        assert_eq!(state.scroll_speed.value(), 10);
        for _ in 0..20 {
            handle_input(&mut state, MenuInput::Left);
        }
        assert_eq!(state.scroll_speed.value(), 2);
    }

    #[test]
    fn confirm_needs_a_song() {
        assert_eq!(
            handle_input(&mut menu(2), MenuInput::Confirm),
            ScreenAction::Navigate(Screen::Countdown)
        );
        assert_eq!(handle_input(&mut menu(0), MenuInput::Confirm), ScreenAction::None);
        assert_eq!(handle_input(&mut menu(2), MenuInput::Back), ScreenAction::Exit);
    }

    #[test]
    fn select_song_checks_range() {
        let mut state = menu(3);
        assert!(select_song(&mut state, 2));
        assert_eq!(state.song_index, 2);
        assert!(!select_song(&mut state, 3));
        assert_eq!(state.song_index, 2);
    }
}
