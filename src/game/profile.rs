use crate::config::DEFAULT_VOLUME;
use crate::core::input::{KeyBindings, Lane};
use crate::game::chart::Difficulty;
use crate::game::scroll::ScrollSpeedSetting;
use configparser::ini::Ini;
use log::{info, warn};
use std::fs;
use std::path::Path;

const OPTIONS_SECTION: &str = "Options";
const KEYS_SECTION: &str = "KeyBindings";

/// Player settings persisted as a flat ini file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scroll_speed: ScrollSpeedSetting,
    pub difficulty: Difficulty,
    pub volume: f32,
    pub key_bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scroll_speed: ScrollSpeedSetting::default(),
            difficulty: Difficulty::default(),
            volume: DEFAULT_VOLUME,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Reads settings out of a parsed ini, falling back per field.
    ///
    /// Out-of-range values are clamped, unparsable ones replaced by the
    /// default; both are logged.
    pub fn from_ini(conf: &Ini) -> Self {
        let mut settings = Settings::default();

        if let Some(raw) = conf.get(OPTIONS_SECTION, "ScrollSpeed") {
            match raw.parse::<ScrollSpeedSetting>() {
                Ok(speed) => {
                    let in_range = raw
                        .trim()
                        .parse::<f64>()
                        .is_ok_and(|v| ScrollSpeedSetting::is_in_range(v.round() as i64));
                    if !in_range {
                        warn!("ScrollSpeed '{}' out of range, clamped to {}.", raw, speed);
                    }
                    settings.scroll_speed = speed;
                }
                Err(e) => warn!("{}; using default {}.", e, settings.scroll_speed),
            }
        }

        if let Some(raw) = conf.get(OPTIONS_SECTION, "Difficulty") {
            match raw.parse::<Difficulty>() {
                Ok(difficulty) => settings.difficulty = difficulty,
                Err(e) => warn!("{}; using default {}.", e, settings.difficulty),
            }
        }

        if let Some(raw) = conf.get(OPTIONS_SECTION, "Volume") {
            match raw.trim().parse::<f32>() {
                Ok(volume) if volume.is_finite() => {
                    let clamped = volume.clamp(0.0, 1.0);
                    if clamped != volume {
                        warn!("Volume '{}' out of range, clamped to {:.2}.", raw, clamped);
                    }
                    settings.volume = clamped;
                }
                _ => warn!(
                    "Volume '{}' is not a valid number; using default {:.2}.",
                    raw, settings.volume
                ),
            }
        }

        let codes = Lane::ALL.map(|lane| {
            conf.get(KEYS_SECTION, lane.setting_key())
                .unwrap_or_else(|| settings.key_bindings.code_for(lane).to_string())
        });
        match KeyBindings::from_codes(codes) {
            Ok(bindings) => settings.key_bindings = bindings,
            Err(e) => warn!("{}; using default key bindings.", e),
        }

        settings
    }

    pub fn to_ini(&self) -> Ini {
        let mut conf = Ini::new();
        conf.set(OPTIONS_SECTION, "ScrollSpeed", Some(self.scroll_speed.to_string()));
        conf.set(OPTIONS_SECTION, "Difficulty", Some(self.difficulty.to_string()));
        conf.set(OPTIONS_SECTION, "Volume", Some(format!("{:.2}", self.volume)));
        for lane in Lane::ALL {
            conf.set(
                KEYS_SECTION,
                lane.setting_key(),
                Some(self.key_bindings.code_for(lane).to_string()),
            );
        }
        conf
    }

    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        self.to_ini().write(path)
    }
}

/// Loads settings from `path`, writing a default file first if none exists.
///
/// Never fails: any I/O or parse problem is logged and defaults are used.
pub fn load(path: &Path) -> Settings {
    if !path.exists() {
        info!("Settings file not found, creating defaults at '{}'.", path.display());
        let defaults = Settings::default();
        if let Err(e) = defaults.save(path) {
            warn!("Failed to create default settings file: {}", e);
        }
        return defaults;
    }

    let mut conf = Ini::new();
    match conf.load(path) {
        Ok(_) => {
            let settings = Settings::from_ini(&conf);
            info!(
                "Loaded settings: speed {}, difficulty {}, volume {:.2}.",
                settings.scroll_speed, settings.difficulty, settings.volume
            );
            settings
        }
        Err(e) => {
            warn!("Failed to load '{}': {}. Using defaults.", path.display(), e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Settings {
        let mut conf = Ini::new();
        conf.read(text.to_string()).unwrap();
        Settings::from_ini(&conf)
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse(""), Settings::default());
    }

    #[test]
    fn reads_all_fields() {
        let settings = parse(
            "[Options]\nScrollSpeed=8\nDifficulty=Hard\nVolume=0.25\n\
             [KeyBindings]\nLeft=A\nDown=S\nUp=K\nRight=L\n",
        );
        assert_eq!(settings.scroll_speed.value(), 8);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!((settings.volume - 0.25).abs() < f32::EPSILON);
        assert_eq!(settings.key_bindings.lane_for("s"), Some(Lane::Down));
        assert_eq!(settings.key_bindings.lane_for("L"), Some(Lane::Right));
    }

    #[test]
    fn clamps_out_of_range_values() {
        let settings = parse("[Options]\nScrollSpeed=42\nDifficulty=9\nVolume=3.5\n");
        assert_eq!(settings.scroll_speed.value(), 10);
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.volume, 1.0);

        let settings = parse("[Options]\nScrollSpeed=-1\nDifficulty=-2\nVolume=-0.5\n");
        assert_eq!(settings.scroll_speed.value(), 2);
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.volume, 0.0);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let settings = parse("[Options]\nScrollSpeed=warp\nDifficulty=insane\nVolume=loud\n");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn duplicate_key_binding_is_ignored() {
        let settings = parse("[KeyBindings]\nLeft=F\n");
        assert_eq!(settings.key_bindings, KeyBindings::default());
    }

    #[test]
    fn swapped_key_bindings_are_accepted() {
        let settings = parse("[KeyBindings]\nLeft=F\nDown=D\n");
        assert_eq!(settings.key_bindings.lane_for("F"), Some(Lane::Left));
        assert_eq!(settings.key_bindings.lane_for("D"), Some(Lane::Down));
    }

    #[test]
    fn ini_round_trip_preserves_settings() {
        let mut original = Settings::default();
        original.scroll_speed = ScrollSpeedSetting::clamped(3);
        original.difficulty = Difficulty::Easy;
        original.volume = 0.5;
        let text = original.to_ini().writes();
        assert_eq!(parse(&text), original);
    }
}
