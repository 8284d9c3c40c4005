use std::time::Duration;

pub const APP_NAME: &str = "notefall";

// Asset Paths
pub const SETTINGS_INI_PATH: &str = "save/settings.ini";
pub const CUSTOM_SONGS_PATH: &str = "songs.json";

// Gameplay Constants
pub const LANE_COUNT: usize = 4;
pub const PERFECT_WINDOW_MS: i64 = 50;
pub const GREAT_WINDOW_MS: i64 = 100;
pub const GOOD_WINDOW_MS: i64 = 150;

pub const PERFECT_SCORE: u64 = 1000;
pub const GREAT_SCORE: u64 = 700;
pub const GOOD_SCORE: u64 = 300;

// A note stays hittable this long after its target time before it times out.
// Zero gives the strict rule: a miss exactly when the note reaches the hit line.
pub const LATE_WINDOW_MS: i64 = GOOD_WINDOW_MS;

// Scroll speed is an abstract 2..=10 dial; 5 travels in exactly BASE_APPROACH_MS.
pub const MIN_SCROLL_SPEED: u32 = 2;
pub const MAX_SCROLL_SPEED: u32 = 10;
pub const REFERENCE_SCROLL_SPEED: u32 = 5;
pub const BASE_APPROACH_MS: i64 = 2000;
pub const MUSIC_START_DELAY_MS: i64 = 2000;

// Accuracy weights (percent credit per grade)
pub const PERFECT_ACCURACY_WEIGHT: f64 = 100.0;
pub const GREAT_ACCURACY_WEIGHT: f64 = 75.0;
pub const GOOD_ACCURACY_WEIGHT: f64 = 50.0;

// Misc
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
pub const FRAME_INTERVAL_MS: i64 = 16;
pub const STATUS_LOG_INTERVAL_MS: i64 = 1000;
pub const DEFAULT_VOLUME: f32 = 1.0;

// Autoplay
pub const AUTOPLAY_JITTER_MS: i64 = 40;
pub const AUTOPLAY_MISS_CHANCE: f64 = 0.05;
