//! Server configuration read from the environment.

use crate::models::{DEFAULT_COURT_COUNT, DEFAULT_MAX_COURTS};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HOST, default 0.0.0.0 so the app is reachable on a VPS.
    pub host: String,
    /// PORT, default 8080.
    pub port: u16,
    /// COURT_COUNT: courts in a new session.
    pub court_count: usize,
    /// MAX_COURTS: upper bound for resizing.
    pub max_courts: usize,
    /// AUTO_ASSIGN: whether new sessions start with auto-assign on.
    pub auto_assign: bool,
    /// ROSTER_FILE: JSON roster shared by sessions. Unset means no persistence.
    pub roster_file: Option<PathBuf>,
    /// DEMO_PLAYERS: seed new sessions with this many demo players when there is no roster.
    pub demo_players: usize,
    /// SESSION_TIMEOUT_HOURS: idle sessions are dropped after this long.
    pub session_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            court_count: DEFAULT_COURT_COUNT,
            max_courts: DEFAULT_MAX_COURTS,
            auto_assign: true,
            roster_file: None,
            demo_players: 0,
            session_timeout: Duration::from_secs(12 * 3600),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| -> Option<String> { lookup(key).filter(|v| !v.trim().is_empty()) };
        fn or_warn<T>(key: &str, value: Option<T>, default: T) -> T {
            value.unwrap_or_else(|| {
                log::warn!("Ignoring invalid {}", key);
                default
            })
        }

        let port = parsed("PORT").map_or(defaults.port, |v| {
            or_warn("PORT", v.trim().parse::<u16>().ok(), defaults.port)
        });
        let max_courts = parsed("MAX_COURTS").map_or(defaults.max_courts, |v| {
            or_warn("MAX_COURTS", v.trim().parse::<usize>().ok().filter(|&n| n > 0), defaults.max_courts)
        });
        let court_count = parsed("COURT_COUNT").map_or(defaults.court_count, |v| {
            or_warn("COURT_COUNT", v.trim().parse::<usize>().ok(), defaults.court_count)
        });
        let auto_assign = parsed("AUTO_ASSIGN").map_or(defaults.auto_assign, |v| {
            or_warn("AUTO_ASSIGN", parse_bool(&v), defaults.auto_assign)
        });
        let demo_players = parsed("DEMO_PLAYERS").map_or(defaults.demo_players, |v| {
            or_warn("DEMO_PLAYERS", v.trim().parse::<usize>().ok(), defaults.demo_players)
        });
        let session_timeout = parsed("SESSION_TIMEOUT_HOURS").map_or(defaults.session_timeout, |v| {
            or_warn(
                "SESSION_TIMEOUT_HOURS",
                v.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|&h| h > 0)
                    .map(|h| Duration::from_secs(h * 3600)),
                defaults.session_timeout,
            )
        });

        Self {
            host: parsed("HOST").unwrap_or(defaults.host),
            port,
            court_count: court_count.clamp(1, max_courts),
            max_courts,
            auto_assign,
            roster_file: parsed("ROSTER_FILE").map(PathBuf::from),
            demo_players,
            session_timeout,
        }
    }
}
