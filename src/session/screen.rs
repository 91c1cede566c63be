//! Screen names for the session state machine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::GameError;

/// Active screen.
///
/// Screens cycle `Start → Select → Play → Stats → Start`; `end` from Play or
/// Stats returns to Start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Title screen.
    #[default]
    Start,
    /// Player count and difficulty selection.
    Select,
    /// One or two boards in play.
    Play,
    /// Win/lose banners.
    Stats,
}

impl Screen {
    /// Every screen, in cycle order.
    pub const ALL: [Screen; 4] = [Screen::Start, Screen::Select, Screen::Play, Screen::Stats];

    /// The screen's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::Select => "select",
            Screen::Play => "play",
            Screen::Stats => "stats",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = GameError;

    /// Parse a screen name. Anything else is an unreachable state.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.name() == s)
            .ok_or_else(|| GameError::UnknownScreen(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for screen in Screen::ALL {
            assert_eq!(screen.to_string().parse::<Screen>().unwrap(), screen);
        }
    }

    #[test]
    fn test_unknown_screen() {
        let err = "lobby".parse::<Screen>().unwrap_err();
        assert_eq!(err, GameError::UnknownScreen("lobby".into()));
        assert!("Play".parse::<Screen>().is_err());
    }

    #[test]
    fn test_serde_uses_names() {
        assert_eq!(serde_json::to_string(&Screen::Stats).unwrap(), "\"stats\"");
    }
}
