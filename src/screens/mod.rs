pub mod evaluation;
pub mod menu;
pub mod pause;
pub mod session;

pub use session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Navigate(Screen),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Menu,
    Countdown,
    Playing,
    Paused,
    Results,
}

/// Navigation input, already decoded from whatever device produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    NextField,
    Confirm,
    Back,
}

/// Moves a list cursor one step with wraparound.
pub(crate) fn step_wrapping(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
