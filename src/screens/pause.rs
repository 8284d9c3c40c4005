use crate::screens::{MenuInput, Screen, ScreenAction, step_wrapping};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOption {
    Resume,
    Restart,
    ExitToMenu,
}

impl PauseOption {
    pub const ALL: [PauseOption; 3] = [
        PauseOption::Resume,
        PauseOption::Restart,
        PauseOption::ExitToMenu,
    ];

    /// Screen the session should move to when this option is chosen.
    pub const fn target(self) -> Screen {
        match self {
            PauseOption::Resume => Screen::Playing,
            PauseOption::Restart => Screen::Countdown,
            PauseOption::ExitToMenu => Screen::Menu,
        }
    }
}

impl fmt::Display for PauseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PauseOption::Resume => "Resume",
            PauseOption::Restart => "Restart",
            PauseOption::ExitToMenu => "Exit to Menu",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    pub selected_index: usize,
}

pub fn init() -> State {
    State::default()
}

pub fn selected(state: &State) -> PauseOption {
    PauseOption::ALL[state.selected_index % PauseOption::ALL.len()]
}

pub fn handle_input(state: &mut State, input: MenuInput) -> ScreenAction {
    match input {
        MenuInput::Up | MenuInput::Down => {
            state.selected_index = step_wrapping(
                state.selected_index,
                PauseOption::ALL.len(),
                input == MenuInput::Down,
            );
            ScreenAction::None
        }
        MenuInput::Confirm => ScreenAction::Navigate(selected(state).target()),
        MenuInput::Back => ScreenAction::Navigate(Screen::Playing),
        _ => ScreenAction::None,
    }
}
