use std::fmt;

use crate::config::LANE_COUNT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Lane {
    Left = 0,
    Down = 1,
    Up = 2,
    Right = 3,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Down, Lane::Up, Lane::Right];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Lane> {
        match index {
            0 => Some(Lane::Left),
            1 => Some(Lane::Down),
            2 => Some(Lane::Up),
            3 => Some(Lane::Right),
            _ => None,
        }
    }

    /// Name used for the lane's key binding entry in the settings file.
    pub const fn setting_key(self) -> &'static str {
        match self {
            Lane::Left => "Left",
            Lane::Down => "Down",
            Lane::Up => "Up",
            Lane::Right => "Right",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.setting_key())
    }
}

/// A debounced "lane pressed" edge, stamped with the frame it was polled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneEvent {
    pub lane: Lane,
    pub timestamp_ms: i64,
}

/// Lane -> input code mapping.
///
/// Codes are opaque strings owned by the input collaborator (keyboard key
/// names, GPIO button names). Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    codes: [String; LANE_COUNT],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            codes: ["D".to_string(), "F".to_string(), "J".to_string(), "K".to_string()],
        }
    }
}

impl KeyBindings {
    /// Builds bindings from one code per lane, in lane order.
    pub fn from_codes(codes: [String; LANE_COUNT]) -> Result<Self, String> {
        let mut bindings = KeyBindings {
            codes: Default::default(),
        };
        for (lane, code) in Lane::ALL.into_iter().zip(codes) {
            bindings.set(lane, &code)?;
        }
        Ok(bindings)
    }

    pub fn code_for(&self, lane: Lane) -> &str {
        &self.codes[lane.index()]
    }

    pub fn set(&mut self, lane: Lane, code: &str) -> Result<(), String> {
        let code = code.trim();
        if code.is_empty() {
            return Err(format!("Key binding for lane {} is empty", lane));
        }
        if let Some(other) = self.lane_for(code).filter(|other| *other != lane) {
            return Err(format!(
                "Key '{}' is already bound to lane {}",
                code, other
            ));
        }
        self.codes[lane.index()] = code.to_string();
        Ok(())
    }

    pub fn lane_for(&self, code: &str) -> Option<Lane> {
        let code = code.trim();
        Lane::ALL
            .into_iter()
            .find(|lane| self.codes[lane.index()].eq_ignore_ascii_case(code))
    }

    /// Turns a raw code press into a lane edge. Unbound codes yield `None`.
    pub fn press(&self, code: &str, timestamp_ms: i64) -> Option<LaneEvent> {
        self.lane_for(code).map(|lane| LaneEvent { lane, timestamp_ms })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_index_round_trips() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_index(lane.index()), Some(lane));
        }
        assert_eq!(Lane::from_index(4), None);
    }

    #[test]
    fn default_bindings_are_dfjk() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.lane_for("d"), Some(Lane::Left));
        assert_eq!(bindings.lane_for("F"), Some(Lane::Down));
        assert_eq!(bindings.lane_for(" j "), Some(Lane::Up));
        assert_eq!(bindings.lane_for("K"), Some(Lane::Right));
        assert_eq!(bindings.lane_for("Space"), None);
    }

    #[test]
    fn rebinding_rejects_duplicates_and_blanks() {
        let mut bindings = KeyBindings::default();
        assert!(bindings.set(Lane::Left, "F").is_err());
        assert!(bindings.set(Lane::Left, "  ").is_err());
        assert!(bindings.set(Lane::Left, "A").is_ok());
        assert_eq!(bindings.code_for(Lane::Left), "A");
        assert_eq!(bindings.lane_for("a"), Some(Lane::Left));
        // Rebinding a lane to its own key is fine.
        assert!(bindings.set(Lane::Down, "f").is_ok());
    }

    #[test]
    fn from_codes_allows_swaps_but_not_duplicates() {
        let swapped = KeyBindings::from_codes(["F", "D", "J", "K"].map(String::from)).unwrap();
        assert_eq!(swapped.lane_for("F"), Some(Lane::Left));
        assert_eq!(swapped.lane_for("D"), Some(Lane::Down));

        assert!(KeyBindings::from_codes(["A", "A", "J", "K"].map(String::from)).is_err());
        assert!(KeyBindings::from_codes(["A", "", "J", "K"].map(String::from)).is_err());
    }

    #[test]
    fn press_resolves_code_to_lane_event() {
        let mut bindings = KeyBindings::default();
        bindings.set(Lane::Right, "Space").unwrap();
        assert_eq!(
            bindings.press("space", 1234),
            Some(LaneEvent {
                lane: Lane::Right,
                timestamp_ms: 1234
            })
        );
        assert_eq!(bindings.press("K", 1234), None);
        assert_eq!(bindings.press("d", 7).map(|event| event.lane), Some(Lane::Left));
    }
}
