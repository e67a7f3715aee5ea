//! Player, Gender and PlayerView data structures.

use crate::models::system::Zone;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a player (used in groups, courts and the zone index).
pub type PlayerId = Uuid;

/// Lowest selectable skill level.
pub const MIN_LEVEL: u8 = 1;
/// Highest selectable skill level.
pub const MAX_LEVEL: u8 = 14;
/// Level given to new players when none is chosen.
pub const DEFAULT_LEVEL: u8 = 7;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl FromStr for Gender {
    type Err = std::convert::Infallible;

    /// Lenient parse used for roster imports; anything unrecognised is `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Unknown,
        })
    }
}

fn default_enabled() -> bool {
    true
}

fn default_level() -> u8 {
    DEFAULT_LEVEL
}

/// A player on the club roster.
///
/// Where the player currently is (standby, queue or court) is not stored here;
/// the system's zone index owns that.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default = "default_level")]
    pub level: u8,
    /// Disabled players are kept on the roster but sit in no zone.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub games_played: u32,
}

impl Player {
    /// Create a new enabled player with no games played.
    pub fn new(name: impl Into<String>, gender: Gender, level: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            gender,
            level,
            enabled: true,
            games_played: 0,
        }
    }

    /// Case-insensitive name match, ignoring surrounding whitespace.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    pub fn is_valid_level(level: u8) -> bool {
        (MIN_LEVEL..=MAX_LEVEL).contains(&level)
    }

    /// Record one finished game. The count saturates instead of wrapping.
    pub fn record_game(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }
}

/// Display view of a player, with status flags resolved from the zone index.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub gender: Gender,
    pub level: u8,
    pub enabled: bool,
    pub games_played: u32,
    pub is_playing: bool,
    pub is_queuing: bool,
}

impl PlayerView {
    pub fn from_player(p: &Player, zone: Option<Zone>) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            gender: p.gender,
            level: p.level,
            enabled: p.enabled,
            games_played: p.games_played,
            is_playing: matches!(zone, Some(Zone::Court(_))),
            is_queuing: matches!(zone, Some(Zone::Queue(_))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_is_lenient() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" f ".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("other".parse::<Gender>().unwrap(), Gender::Unknown);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let json = r#"{"id":"6f1c1b3e-1111-4a2b-9c3d-000000000001","name":"Amy"}"#;
        let p: Player = serde_json::from_str(json).unwrap();
        assert_eq!(p.gender, Gender::Unknown);
        assert_eq!(p.level, DEFAULT_LEVEL);
        assert!(p.enabled);
        assert_eq!(p.games_played, 0);
    }

    #[test]
    fn name_match_ignores_unicode_case() {
        let p = Player::new("Émile", Gender::Male, 5);
        assert!(p.has_name(" émile "));
        assert!(!p.has_name("Emile"));
    }

    #[test]
    fn game_count_saturates() {
        let mut p = Player::new("Amy", Gender::Female, 5);
        p.games_played = u32::MAX;
        p.record_game();
        assert_eq!(p.games_played, u32::MAX);
    }

    #[test]
    fn level_bounds() {
        assert!(Player::is_valid_level(MIN_LEVEL));
        assert!(Player::is_valid_level(MAX_LEVEL));
        assert!(!Player::is_valid_level(0));
        assert!(!Player::is_valid_level(15));
    }
}
