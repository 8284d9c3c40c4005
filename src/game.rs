pub mod chart;
pub mod gameplay;
pub mod judgment;
pub mod note;
pub mod pitch;
pub mod profile;
pub mod scores;
pub mod scroll;
pub mod song;
