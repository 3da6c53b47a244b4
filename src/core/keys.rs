//! Hardware keys forwarded by the host shell.
//!
//! The host maps platform key codes to names (`back`, `menu`, ...) and asks the
//! core whether it consumed the key. [`KeyDisposition::Default`] tells the host
//! to run its own behavior, which for Back at the root screen means exiting.

use std::fmt;
use std::str::FromStr;

// Android `KeyEvent` codes.
pub const KEYCODE_BACK: i32 = 4;
pub const KEYCODE_VOLUME_UP: i32 = 24;
pub const KEYCODE_VOLUME_DOWN: i32 = 25;
pub const KEYCODE_MENU: i32 = 82;
pub const KEYCODE_SEARCH: i32 = 84;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareKey {
    Back,
    Menu,
    Search,
    VolumeDown,
    VolumeUp,
    /// Anything without a name, passed through as its raw key code.
    Raw(i32),
}

impl HardwareKey {
    pub fn from_code(code: i32) -> Self {
        match code {
            KEYCODE_BACK => HardwareKey::Back,
            KEYCODE_MENU => HardwareKey::Menu,
            KEYCODE_SEARCH => HardwareKey::Search,
            KEYCODE_VOLUME_DOWN => HardwareKey::VolumeDown,
            KEYCODE_VOLUME_UP => HardwareKey::VolumeUp,
            other => HardwareKey::Raw(other),
        }
    }

    pub fn name(self) -> Option<&'static str> {
        match self {
            HardwareKey::Back => Some("back"),
            HardwareKey::Menu => Some("menu"),
            HardwareKey::Search => Some("search"),
            HardwareKey::VolumeDown => Some("volume_down"),
            HardwareKey::VolumeUp => Some("volume_up"),
            HardwareKey::Raw(_) => None,
        }
    }
}

impl fmt::Display for HardwareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareKey::Raw(code) => write!(f, "keycode {code}"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

/// Parses a key name as forwarded by the host, or a bare numeric key code.
impl FromStr for HardwareKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "back" => HardwareKey::Back,
            "menu" => HardwareKey::Menu,
            "search" => HardwareKey::Search,
            "volume_down" => HardwareKey::VolumeDown,
            "volume_up" => HardwareKey::VolumeUp,
            other => HardwareKey::from_code(other.parse()?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Suppress the host's default handling.
    Consumed,
    /// Let the host handle the key.
    Default,
}

impl KeyDisposition {
    pub fn is_consumed(self) -> bool {
        self == KeyDisposition::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_codes() {
        assert_eq!(HardwareKey::from_code(4), HardwareKey::Back);
        assert_eq!(HardwareKey::from_code(25), HardwareKey::VolumeDown);
        assert_eq!(HardwareKey::from_code(24), HardwareKey::VolumeUp);
        assert_eq!(HardwareKey::from_code(82), HardwareKey::Menu);
        assert_eq!(HardwareKey::from_code(84), HardwareKey::Search);
        assert_eq!(HardwareKey::from_code(66), HardwareKey::Raw(66));
    }

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!("back".parse(), Ok(HardwareKey::Back));
        assert_eq!("volume_up".parse(), Ok(HardwareKey::VolumeUp));
        assert_eq!("4".parse(), Ok(HardwareKey::Back));
        assert_eq!("131".parse(), Ok(HardwareKey::Raw(131)));
        assert!("fly".parse::<HardwareKey>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(HardwareKey::VolumeDown.to_string(), "volume_down");
        assert_eq!(HardwareKey::Raw(7).to_string(), "keycode 7");
    }
}
