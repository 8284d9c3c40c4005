use crate::core::input::Lane;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchClass {
    /// Fixed letter -> lane table. Seven letters fold onto four lanes.
    pub const fn lane(self) -> Lane {
        match self {
            PitchClass::C | PitchClass::G => Lane::Left,
            PitchClass::D | PitchClass::A => Lane::Down,
            PitchClass::E | PitchClass::B => Lane::Up,
            PitchClass::F => Lane::Right,
        }
    }

    pub fn from_letter(letter: char) -> Option<PitchClass> {
        match letter.to_ascii_uppercase() {
            'C' => Some(PitchClass::C),
            'D' => Some(PitchClass::D),
            'E' => Some(PitchClass::E),
            'F' => Some(PitchClass::F),
            'G' => Some(PitchClass::G),
            'A' => Some(PitchClass::A),
            'B' => Some(PitchClass::B),
            _ => None,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            PitchClass::C => 'C',
            PitchClass::D => 'D',
            PitchClass::E => 'E',
            PitchClass::F => 'F',
            PitchClass::G => 'G',
            PitchClass::A => 'A',
            PitchClass::B => 'B',
        }
    }
}

/// A natural note such as `E4`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: u8,
}

pub const MAX_OCTAVE: u8 = 8;

impl Pitch {
    pub const fn lane(self) -> Lane {
        self.class.lane()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.letter(), self.octave)
    }
}

impl FromStr for Pitch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let Some(letter) = chars.next() else {
            return Err("Pitch name is empty".to_string());
        };
        let class = PitchClass::from_letter(letter)
            .ok_or_else(|| format!("Pitch '{}' has unknown note letter '{}'", trimmed, letter))?;

        let octave_str = chars.as_str();
        let octave: u8 = octave_str
            .parse()
            .map_err(|_| format!("Pitch '{}' has no valid octave number", trimmed))?;
        if octave > MAX_OCTAVE {
            return Err(format!(
                "Pitch '{}' octave must be at most {}",
                trimmed, MAX_OCTAVE
            ));
        }

        Ok(Pitch { class, octave })
    }
}
