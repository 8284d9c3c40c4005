use crate::game::chart::Difficulty;
use crate::game::judgment::Grade;
use crate::game::scores::ScoreState;
use crate::screens::{MenuInput, Screen, ScreenAction, step_wrapping};
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsOption {
    Replay,
    BackToMenu,
}

impl ResultsOption {
    pub const ALL: [ResultsOption; 2] = [ResultsOption::Replay, ResultsOption::BackToMenu];
}

/// Frozen outcome of a finished play.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub song_name: String,
    pub difficulty: Difficulty,
    pub total_notes: usize,
    pub scores: ScoreState,
    pub selected_index: usize,
}

pub fn init(song_name: &str, difficulty: Difficulty, total_notes: usize, scores: ScoreState) -> State {
    info!(
        "Results for '{}' ({}): score {}, max combo {}, accuracy {:.2}%",
        song_name,
        difficulty,
        scores.score,
        scores.max_combo,
        scores.accuracy()
    );
    info!(
        "Perfect {}, Great {}, Good {}, Miss {} ({} chart notes)",
        scores.count(Grade::Perfect),
        scores.count(Grade::Great),
        scores.count(Grade::Good),
        scores.count(Grade::Miss),
        total_notes
    );
    State {
        song_name: song_name.to_string(),
        difficulty,
        total_notes,
        scores,
        selected_index: 0,
    }
}

pub fn selected(state: &State) -> ResultsOption {
    ResultsOption::ALL[state.selected_index % ResultsOption::ALL.len()]
}

pub fn handle_input(state: &mut State, input: MenuInput) -> ScreenAction {
    match input {
        MenuInput::Up | MenuInput::Down => {
            state.selected_index = step_wrapping(
                state.selected_index,
                ResultsOption::ALL.len(),
                input == MenuInput::Down,
            );
            ScreenAction::None
        }
        MenuInput::Confirm => match selected(state) {
            ResultsOption::Replay => ScreenAction::Navigate(Screen::Countdown),
            ResultsOption::BackToMenu => ScreenAction::Navigate(Screen::Menu),
        },
        MenuInput::Back => ScreenAction::Navigate(Screen::Menu),
        _ => ScreenAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> State {
        let mut scores = ScoreState::new();
        scores.apply(Grade::Perfect);
        scores.apply(Grade::Miss);
        init("Slow Melody", Difficulty::Easy, 2, scores)
    }

    #[test]
    fn keeps_final_scores() {
        let state = results();
        assert_eq!(state.song_name, "Slow Melody");
        assert_eq!(state.scores.score, 1000);
        assert_eq!(state.scores.judged_notes(), 2);
        assert_eq!(selected(&state), ResultsOption::Replay);
    }

    #[test]
    fn replay_or_back_to_menu() {
        let mut state = results();
        assert_eq!(
            handle_input(&mut state, MenuInput::Confirm),
            ScreenAction::Navigate(Screen::Countdown)
        );
        handle_input(&mut state, MenuInput::Up);
        assert_eq!(selected(&state), ResultsOption::BackToMenu);
        assert_eq!(
            handle_input(&mut state, MenuInput::Confirm),
            ScreenAction::Navigate(Screen::Menu)
        );
        assert_eq!(
            handle_input(&mut results(), MenuInput::Back),
            ScreenAction::Navigate(Screen::Menu)
        );
    }
}
