//! Roster persistence: JSON file save/load, CSV import and demo rosters.

use crate::models::{Gender, Player, PlayerId, DEFAULT_LEVEL, MAX_LEVEL, MIN_LEVEL};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// Parse a roster from JSON. Corrupt input is logged and treated as an empty roster.
pub fn parse_roster(json: &str) -> Vec<Player> {
    match serde_json::from_str(json) {
        Ok(players) => players,
        Err(e) => {
            log::warn!("Failed to parse stored roster, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Load the roster file. A missing, unreadable or corrupt file gives an empty roster.
pub fn load_roster(path: &Path) -> Vec<Player> {
    match std::fs::read_to_string(path) {
        Ok(json) => parse_roster(&json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No roster at {}, starting empty", path.display());
            Vec::new()
        }
        Err(e) => {
            log::warn!("Failed to read roster {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Write the roster as a JSON array, replacing the file atomically.
pub fn save_roster(path: &Path, players: &[Player]) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(players)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Roster edits made by one session: players added or changed, and players removed.
#[derive(Debug, Default, PartialEq)]
pub struct RosterChanges {
    pub upserted: Vec<Player>,
    pub removed: Vec<PlayerId>,
}

impl RosterChanges {
    /// Diff two snapshots of the same session's roster.
    pub fn between(before: &[Player], after: &[Player]) -> Self {
        let upserted = after
            .iter()
            .filter(|p| before.iter().find(|b| b.id == p.id) != Some(*p))
            .cloned()
            .collect();
        let removed = before
            .iter()
            .filter(|b| !after.iter().any(|p| p.id == b.id))
            .map(|b| b.id)
            .collect();
        Self { upserted, removed }
    }

    pub fn is_empty(&self) -> bool {
        self.upserted.is_empty() && self.removed.is_empty()
    }
}

/// Apply one session's changes to the shared roster file, keeping entries other
/// sessions wrote. Players are matched by id; new ones go to the end.
pub fn merge_roster(path: &Path, changes: &RosterChanges) -> Result<(), StorageError> {
    if changes.is_empty() {
        return Ok(());
    }
    let mut players = load_roster(path);
    players.retain(|p| !changes.removed.contains(&p.id));
    for player in &changes.upserted {
        match players.iter_mut().find(|p| p.id == player.id) {
            Some(existing) => *existing = player.clone(),
            None => players.push(player.clone()),
        }
    }
    save_roster(path, &players)
}

/// Read `name,gender,level` rows. Gender and level are optional; a leading
/// `name` header row is skipped.
pub fn import_roster_csv<R: Read>(reader: R) -> Result<Vec<Player>, StorageError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut players = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let name = record.get(0).unwrap_or_default();
        if name.is_empty() || (row == 1 && name.eq_ignore_ascii_case("name")) {
            continue;
        }
        let gender: Gender = record
            .get(1)
            .unwrap_or_default()
            .parse()
            .unwrap_or_default();
        let level = match record.get(2).filter(|s| !s.is_empty()) {
            None => DEFAULT_LEVEL,
            Some(raw) => raw
                .parse::<u8>()
                .ok()
                .filter(|&l| Player::is_valid_level(l))
                .ok_or_else(|| StorageError::InvalidRow {
                    row,
                    reason: format!(
                        "level must be a number from {} to {}, got {:?}",
                        MIN_LEVEL, MAX_LEVEL, raw
                    ),
                })?,
        };
        players.push(Player::new(name, gender, level));
    }
    Ok(players)
}

const DEMO_NAMES: &[&str] = &[
    "Alex", "Blake", "Casey", "Dana", "Eli", "Frankie", "Gale", "Harper", "Indy", "Jules",
    "Kai", "Logan", "Morgan", "Noel", "Oakley", "Parker", "Quinn", "Reese", "Sage", "Taylor",
    "Uma", "Vic", "Wren", "Yael",
];

/// `count` players with distinct names and random gender and level, for trying the app out.
pub fn demo_roster(count: usize) -> Vec<Player> {
    let mut rng = rand::thread_rng();
    let mut names: Vec<&str> = DEMO_NAMES.to_vec();
    names.shuffle(&mut rng);
    (0..count)
        .map(|i| {
            let base = names[i % names.len()];
            let name = match i / names.len() {
                0 => base.to_string(),
                round => format!("{} {}", base, round + 1),
            };
            let gender = *[Gender::Male, Gender::Female]
                .choose(&mut rng)
                .unwrap_or(&Gender::Unknown);
            Player::new(name, gender, rng.gen_range(MIN_LEVEL..=MAX_LEVEL))
        })
        .collect()
}
