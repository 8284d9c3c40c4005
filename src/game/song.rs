use crate::game::pitch::Pitch;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MelodyNote {
    pub pitch: Pitch,
    pub duration_secs: f64,
}

/// Time-ordered (pitch, duration) sequence. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Melody {
    notes: Vec<MelodyNote>,
}

impl Melody {
    pub fn new(notes: Vec<MelodyNote>) -> Result<Self, String> {
        for (index, note) in notes.iter().enumerate() {
            if !note.duration_secs.is_finite() || note.duration_secs <= 0.0 {
                return Err(format!(
                    "Melody note {} ({}) has invalid duration {}",
                    index, note.pitch, note.duration_secs
                ));
            }
        }
        Ok(Self { notes })
    }

    /// Builds a melody from authored `("E4", 0.25)` pairs.
    pub fn parse<S: AsRef<str>>(pairs: &[(S, f64)]) -> Result<Self, String> {
        let notes = pairs
            .iter()
            .map(|(name, duration_secs)| {
                Ok(MelodyNote {
                    pitch: name.as_ref().parse::<Pitch>()?,
                    duration_secs: *duration_secs,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;
        Self::new(notes)
    }

    pub fn notes(&self) -> &[MelodyNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.notes.iter().map(|n| n.duration_secs).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub name: String,
    pub bpm: f64,
    pub melody: Melody,
}

impl Song {
    pub fn new(name: impl Into<String>, bpm: f64, melody: Melody) -> Result<Self, String> {
        let name = name.into();
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(format!("Song '{}' has invalid BPM {}", name, bpm));
        }
        Ok(Self { name, bpm, melody })
    }

    /// Formats the song length as `m:ss` for menus and logs.
    pub fn formatted_length(&self) -> String {
        let total = self.melody.total_duration_secs().round() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }
}

// --- Built-in catalog ---

static BUILTIN_SONGS: Lazy<Result<Vec<Arc<Song>>, String>> = Lazy::new(build_catalog);

/// The songs compiled into the game. Fails if any authored melody is invalid.
pub fn builtin_catalog() -> Result<Vec<Arc<Song>>, String> {
    (*BUILTIN_SONGS).clone()
}

fn build_catalog() -> Result<Vec<Arc<Song>>, String> {
    let songs = vec![
        Song::new("Slow Melody", 120.0, slow_melody()?)?,
        Song::new("Fast Beats", 180.0, fast_melody()?)?,
        Song::new("Waltz Time", 140.0, waltz_melody()?)?,
    ];
    Ok(songs.into_iter().map(Arc::new).collect())
}

fn repeat(section: &[(&'static str, f64)], times: usize) -> Vec<(&'static str, f64)> {
    section.iter().copied().cycle().take(section.len() * times).collect()
}

fn slow_melody() -> Result<Melody, String> {
    const Q: f64 = 0.25;
    const H: f64 = Q * 2.0;
    const E: f64 = Q / 2.0;

    let main_theme = [
        ("E4", Q), ("G4", Q), ("A4", H),
        ("C5", Q), ("B4", Q), ("A4", H),
        ("G4", Q), ("E4", Q), ("G4", H),
        ("A4", Q), ("C5", Q), ("B4", H),
    ];
    let verse = [
        ("E4", E), ("G4", E), ("A4", Q),
        ("B4", E), ("A4", E), ("G4", Q),
        ("E5", E), ("D5", E), ("C5", Q),
        ("A4", E), ("G4", E), ("E4", Q),
        ("A4", Q), ("B4", Q), ("C5", H),
    ];
    let chorus = [
        ("C5", Q), ("E5", Q), ("G5", H),
        ("F5", Q), ("E5", Q), ("D5", H),
        ("E5", Q), ("D5", Q), ("C5", H),
        ("B4", Q), ("C5", Q), ("D5", H),
    ];
    let bridge = [
        ("E5", E), ("D5", E), ("C5", Q),
        ("B4", E), ("A4", E), ("G4", Q),
        ("A4", E), ("B4", E), ("C5", Q),
        ("D5", E), ("E5", E), ("F5", Q),
        ("E5", H), ("G5", H),
    ];
    let finale = [
        ("C5", Q), ("E5", Q), ("G5", H),
        ("F5", Q), ("D5", Q), ("B4", H),
        ("C5", Q), ("E5", Q), ("G5", H),
        ("C6", Q), ("G5", Q), ("C5", H * 2.0),
    ];

    let mut pairs = repeat(&main_theme, 2);
    pairs.extend_from_slice(&verse);
    pairs.extend_from_slice(&chorus);
    pairs.extend_from_slice(&verse);
    pairs.extend_from_slice(&chorus);
    pairs.extend_from_slice(&bridge);
    pairs.extend(repeat(&chorus, 2));
    pairs.extend_from_slice(&finale);
    Melody::parse(&pairs)
}

fn fast_melody() -> Result<Melody, String> {
    const E: f64 = 0.125;
    const Q: f64 = E * 2.0;

    let main_theme = [
        ("E4", E), ("G4", E), ("A4", Q),
        ("C5", E), ("B4", E), ("A4", Q),
        ("G4", E), ("E4", E), ("G4", Q),
        ("A4", E), ("C5", E), ("B4", Q),
    ];
    let verse = [
        ("C5", E), ("E5", E), ("G5", E), ("A5", E),
        ("G5", E), ("E5", E), ("C5", Q),
        ("B4", E), ("D5", E), ("F5", E), ("G5", E),
        ("F5", E), ("D5", E), ("B4", Q),
    ];
    let chorus = [
        ("A5", E), ("G5", E), ("E5", E), ("C5", E),
        ("D5", E), ("E5", E), ("F5", Q),
        ("E5", E), ("D5", E), ("C5", E), ("B4", E),
        ("C5", Q), ("G4", Q),
    ];

    let mut pairs = repeat(&main_theme, 2);
    pairs.extend(repeat(&verse, 2));
    pairs.extend(repeat(&chorus, 2));
    Melody::parse(&pairs)
}

fn waltz_melody() -> Result<Melody, String> {
    const B: f64 = 0.2;

    let theme = [
        ("C4", B), ("E4", B), ("G4", B),
        ("G4", B), ("C5", B), ("E5", B),
        ("E5", B), ("C5", B), ("G4", B),
        ("G4", B), ("E4", B), ("C4", B),
    ];
    let variation = [
        ("F4", B), ("A4", B), ("C5", B),
        ("C5", B), ("F5", B), ("A5", B),
        ("G5", B), ("E5", B), ("C5", B),
        ("C4", B), ("E4", B), ("G4", B),
    ];

    let mut pairs = repeat(&theme, 2);
    pairs.extend(repeat(&variation, 2));
    pairs.extend(repeat(&theme, 2));
    Melody::parse(&pairs)
}

// --- Custom songs (JSON) ---

/// On-disk song entry: `{"name": "...", "bpm": 120, "notes": [["E4", 0.25], ...]}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SongDefinition {
    pub name: String,
    pub bpm: f64,
    pub notes: Vec<(String, f64)>,
}

impl SongDefinition {
    pub fn into_song(self) -> Result<Song, String> {
        let melody = Melody::parse(&self.notes)
            .map_err(|e| format!("Song '{}': {}", self.name, e))?;
        Song::new(self.name, self.bpm, melody)
    }
}

pub fn parse_song_definitions(json: &str) -> Result<Vec<Song>, String> {
    let definitions: Vec<SongDefinition> =
        serde_json::from_str(json).map_err(|e| format!("Invalid song file: {}", e))?;
    definitions
        .into_iter()
        .map(SongDefinition::into_song)
        .collect()
}

/// Loads extra songs from `path`. A missing file is not an error.
pub fn load_custom_songs(path: &Path) -> Result<Vec<Song>, Box<dyn Error>> {
    if !path.exists() {
        info!("No custom song file at '{}'.", path.display());
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)?;
    let songs = parse_song_definitions(&json)?;
    if songs.is_empty() {
        warn!("Custom song file '{}' contains no songs.", path.display());
    } else {
        info!("Loaded {} custom song(s) from '{}'.", songs.len(), path.display());
    }
    Ok(songs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Lane;

    #[test]
    fn builtin_catalog_is_valid() {
        let songs = builtin_catalog().unwrap();
        let names: Vec<&str> = songs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Slow Melody", "Fast Beats", "Waltz Time"]);
        for song in &songs {
            assert!(!song.melody.is_empty(), "{} has no notes", song.name);
            assert!(song.bpm > 0.0);
        }
    }

    #[test]
    fn waltz_has_expected_shape() {
        let songs = builtin_catalog().unwrap();
        let waltz = &songs[2];
        // theme*2 + variation*2 + theme*2, twelve notes each
        assert_eq!(waltz.melody.len(), 72);
        assert!((waltz.melody.total_duration_secs() - 14.4).abs() < 1e-9);
        assert_eq!(waltz.melody.notes()[0].pitch.lane(), Lane::Left);
        assert_eq!(waltz.formatted_length(), "0:14");
    }

    #[test]
    fn melody_rejects_bad_durations() {
        assert!(Melody::parse(&[("C4", 0.0)]).is_err());
        assert!(Melody::parse(&[("C4", -1.0)]).is_err());
        assert!(Melody::parse(&[("C4", f64::NAN)]).is_err());
        assert!(Melody::parse(&[("X4", 1.0)]).is_err());
        assert!(Melody::parse::<&str>(&[]).unwrap().is_empty());
    }

    #[test]
    fn song_rejects_bad_bpm() {
        let melody = Melody::parse(&[("C4", 1.0)]).unwrap();
        assert!(Song::new("zero", 0.0, melody.clone()).is_err());
        assert!(Song::new("inf", f64::INFINITY, melody.clone()).is_err());
        assert!(Song::new("ok", 90.0, melody).is_ok());
    }

    #[test]
    fn parses_custom_song_json() {
        let json = r#"[
            {"name": "Scale", "bpm": 100, "notes": [["C4", 0.5], ["D4", 0.5], ["E4", 1.0]]}
        ]"#;
        let songs = parse_song_definitions(json).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].name, "Scale");
        assert_eq!(songs[0].melody.len(), 3);
        assert!((songs[0].melody.total_duration_secs() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn custom_song_errors_name_the_song() {
        let json = r#"[{"name": "Broken", "bpm": 100, "notes": [["Q4", 0.5]]}]"#;
        let err = parse_song_definitions(json).unwrap_err();
        assert!(err.contains("Broken"), "{err}");

        assert!(parse_song_definitions("not json").is_err());
    }

    #[test]
    fn missing_custom_song_file_yields_nothing() {
        let songs = load_custom_songs(Path::new("definitely/not/here/songs.json")).unwrap();
        assert!(songs.is_empty());
    }
}
