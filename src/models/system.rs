//! CourtSystem: courts, waiting queue, standby and roster, held together by a zone index.

use crate::models::court::{Court, CourtId};
use crate::models::group::{GroupId, PlayerGroup};
use crate::models::notice::Severity;
use crate::models::player::{Player, PlayerId, MAX_LEVEL, MIN_LEVEL};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Upper bound on courts when none is configured.
pub const DEFAULT_MAX_COURTS: usize = 12;
/// Courts created for a fresh session when none is configured.
pub const DEFAULT_COURT_COUNT: usize = 4;

/// Rejections from the transition engine. A rejected action never changes state.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CourtError {
    /// No player with this id on the roster.
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    /// No queue or court group with this id.
    #[error("Group not found")]
    GroupNotFound(GroupId),
    /// No court with this id.
    #[error("Court not found")]
    CourtNotFound(CourtId),
    /// Disabled players cannot be placed.
    #[error("Player is disabled")]
    PlayerDisabled(PlayerId),
    /// Player dropped on the court it already occupies.
    #[error("Player is already on this court")]
    AlreadyOnCourt(PlayerId),
    /// Player dropped on the group it already belongs to.
    #[error("Player is already in this group")]
    AlreadyInGroup(PlayerId),
    /// Player is already in the standby pool.
    #[error("Player is already on standby")]
    AlreadyOnStandby(PlayerId),
    /// Target group already holds four players.
    #[error("Group already has 4 players")]
    GroupFull(GroupId),
    /// Court has a game in progress.
    #[error("Court is in play")]
    CourtActive(CourtId),
    /// Destination court must be empty.
    #[error("Court already has players")]
    CourtNotEmpty(CourtId),
    /// Finish requested on a court with no game in progress.
    #[error("No game in progress on this court")]
    CourtNotActive(CourtId),
    /// Court has no group to move.
    #[error("Court has no players")]
    CourtEmpty(CourtId),
    /// Player is locked in a game in progress.
    #[error("Player is in a game in progress")]
    PlayerOnActiveCourt(PlayerId),
    /// Player or court name is blank after trimming.
    #[error("Name must not be empty")]
    EmptyName,
    /// Another player already uses this name (case-insensitive).
    #[error("A player with this name already exists")]
    DuplicatePlayerName,
    /// Level outside the selectable range.
    #[error("Level must be between {min} and {max} (got {level})")]
    InvalidLevel { level: u8, min: u8, max: u8 },
    /// Reorder index past the end of the queue.
    #[error("Queue position {index} is out of range (queue has {len} groups)")]
    QueueIndexOutOfRange { index: usize, len: usize },
}

impl CourtError {
    pub fn invalid_level(level: u8) -> Self {
        CourtError::InvalidLevel {
            level,
            min: MIN_LEVEL,
            max: MAX_LEVEL,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CourtError::PlayerNotFound(_)
            | CourtError::GroupNotFound(_)
            | CourtError::CourtNotFound(_)
            | CourtError::GroupFull(_)
            | CourtError::InvalidLevel { .. }
            | CourtError::QueueIndexOutOfRange { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// Where an enabled player currently is. Disabled players have no zone.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "zone", content = "id", rename_all = "snake_case")]
pub enum Zone {
    Standby,
    Queue(GroupId),
    Court(CourtId),
}

/// The whole rotation state of one club session.
///
/// Fields are crate-private: all changes go through the `logic` transitions so
/// that `zones` and the three collections always agree.
#[derive(Clone, Debug, PartialEq)]
pub struct CourtSystem {
    pub(crate) roster: Vec<Player>,
    pub(crate) courts: Vec<Court>,
    pub(crate) waiting_queue: Vec<PlayerGroup>,
    pub(crate) standby: Vec<PlayerId>,
    pub(crate) auto_assign: bool,
    pub(crate) max_courts: usize,
    pub(crate) zones: HashMap<PlayerId, Zone>,
}

impl Default for CourtSystem {
    fn default() -> Self {
        Self::new(DEFAULT_COURT_COUNT, DEFAULT_MAX_COURTS)
    }
}

impl CourtSystem {
    /// Empty system with `court_count` courts (clamped to 1..=max_courts) and auto-assign off.
    pub fn new(court_count: usize, max_courts: usize) -> Self {
        let max_courts = max_courts.max(1);
        let court_count = court_count.clamp(1, max_courts);
        Self {
            roster: Vec::new(),
            courts: (1..=court_count).map(Court::new).collect(),
            waiting_queue: Vec::new(),
            standby: Vec::new(),
            auto_assign: false,
            max_courts,
            zones: HashMap::new(),
        }
    }

    /// System seeded with a roster. Enabled players start on standby in roster order.
    /// Entries with a blank name, a name or id already taken, or a level out of range
    /// are skipped with a warning.
    pub fn with_players(players: Vec<Player>, court_count: usize, max_courts: usize) -> Self {
        let mut system = Self::new(court_count, max_courts);
        for mut player in players {
            let (id, enabled) = (player.id, player.enabled);
            player.name = player.name.trim().to_string();
            if system.roster.iter().any(|p| p.id == id) {
                log::warn!("Skipping roster entry {}: duplicate id", id);
                continue;
            }
            if player.name.is_empty() {
                log::warn!("Skipping roster entry {}: empty name", id);
                continue;
            }
            if system.roster.iter().any(|p| p.has_name(&player.name)) {
                log::warn!("Skipping roster entry {:?}: duplicate name", player.name);
                continue;
            }
            if !Player::is_valid_level(player.level) {
                log::warn!(
                    "Skipping roster entry {:?}: level {} is out of range",
                    player.name,
                    player.level
                );
                continue;
            }
            system.roster.push(player);
            if enabled {
                system.push_standby(id);
            }
        }
        system
    }

    pub fn with_auto_assign(mut self, auto_assign: bool) -> Self {
        self.auto_assign = auto_assign;
        self
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    pub fn waiting_queue(&self) -> &[PlayerGroup] {
        &self.waiting_queue
    }

    pub fn standby(&self) -> &[PlayerId] {
        &self.standby
    }

    pub fn auto_assign(&self) -> bool {
        self.auto_assign
    }

    pub fn court_count(&self) -> usize {
        self.courts.len()
    }

    pub fn max_courts(&self) -> usize {
        self.max_courts
    }

    pub fn zone_of(&self, id: PlayerId) -> Option<Zone> {
        self.zones.get(&id).copied()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn court(&self, id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&PlayerGroup> {
        self.waiting_queue
            .iter()
            .chain(self.courts.iter().filter_map(|c| c.group.as_ref()))
            .find(|g| g.id == id)
    }

    /// Names for a list of player ids, in order. Unknown ids are skipped.
    pub fn player_names(&self, ids: &[PlayerId]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| self.player(id).map(|p| p.name.clone()))
            .collect()
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.roster.iter_mut().find(|p| p.id == id)
    }

    /// Player must exist and be enabled to be placed anywhere.
    pub(crate) fn require_enabled(&self, id: PlayerId) -> Result<&Player, CourtError> {
        let player = self.player(id).ok_or(CourtError::PlayerNotFound(id))?;
        if !player.enabled {
            return Err(CourtError::PlayerDisabled(id));
        }
        Ok(player)
    }

    /// Players in a game in progress stay put until the game ends or the whole group moves.
    pub(crate) fn ensure_movable(&self, id: PlayerId) -> Result<(), CourtError> {
        if let Some(Zone::Court(court_id)) = self.zone_of(id) {
            if self.court(court_id).is_some_and(|c| c.is_active) {
                return Err(CourtError::PlayerOnActiveCourt(id));
            }
        }
        Ok(())
    }

    pub(crate) fn court_position(&self, id: CourtId) -> Result<usize, CourtError> {
        self.courts
            .iter()
            .position(|c| c.id == id)
            .ok_or(CourtError::CourtNotFound(id))
    }

    pub(crate) fn queue_position(&self, id: GroupId) -> Result<usize, CourtError> {
        self.waiting_queue
            .iter()
            .position(|g| g.id == id)
            .ok_or(CourtError::GroupNotFound(id))
    }

    /// Remove a player from whatever zone holds it. A group emptied by this is removed
    /// along with it; a court losing a player is no longer active.
    pub(crate) fn detach(&mut self, id: PlayerId) -> Option<Zone> {
        let zone = self.zones.remove(&id)?;
        match zone {
            Zone::Standby => self.standby.retain(|&p| p != id),
            Zone::Queue(group_id) => {
                if let Some(pos) = self.waiting_queue.iter().position(|g| g.id == group_id) {
                    self.waiting_queue[pos].remove(id);
                    if self.waiting_queue[pos].is_empty() {
                        self.waiting_queue.remove(pos);
                    }
                }
            }
            Zone::Court(court_id) => {
                if let Some(court) = self.courts.iter_mut().find(|c| c.id == court_id) {
                    if let Some(group) = court.group.as_mut() {
                        group.remove(id);
                    }
                    if court.is_empty() {
                        court.clear();
                    } else {
                        court.refresh_active();
                    }
                }
            }
        }
        Some(zone)
    }

    pub(crate) fn push_standby(&mut self, id: PlayerId) {
        self.standby.push(id);
        self.zones.insert(id, Zone::Standby);
    }

    /// Append a group to the back of the queue and index its players.
    pub(crate) fn enqueue(&mut self, mut group: PlayerGroup) -> GroupId {
        group.court = None;
        let group_id = group.id;
        for &p in &group.players {
            self.zones.insert(p, Zone::Queue(group_id));
        }
        self.waiting_queue.push(group);
        group_id
    }

    /// Seat a group on the court at `index` and index its players.
    pub(crate) fn seat(&mut self, index: usize, group: PlayerGroup) {
        let court_id = self.courts[index].id;
        for &p in &group.players {
            self.zones.insert(p, Zone::Court(court_id));
        }
        self.courts[index].seat(group);
    }
}
