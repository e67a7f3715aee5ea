//! Court: a four-player slot that is active only when full.

use crate::models::group::PlayerGroup;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a court.
pub type CourtId = Uuid;

/// Players per court (and per group).
pub const COURT_CAPACITY: usize = 4;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    /// 1-based position in the court list.
    pub number: usize,
    pub name: String,
    pub is_active: bool,
    /// When the current game began; set while the court is active.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    pub group: Option<PlayerGroup>,
}

impl Court {
    /// An empty, inactive court named after its number.
    pub fn new(number: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            name: number.to_string(),
            is_active: false,
            started_at: None,
            group: None,
        }
    }

    pub fn occupancy(&self) -> usize {
        self.group.as_ref().map_or(0, PlayerGroup::len)
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy() == 0
    }

    /// Inactive and empty: the only state a whole group may be seated into.
    pub fn is_available(&self) -> bool {
        !self.is_active && self.is_empty()
    }

    /// Inactive with 1-3 players: open for single players to join.
    pub fn is_partially_filled(&self) -> bool {
        !self.is_active && (1..COURT_CAPACITY).contains(&self.occupancy())
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.group.as_ref().is_some_and(|g| g.contains(player))
    }

    pub fn players(&self) -> &[PlayerId] {
        match &self.group {
            Some(g) => &g.players,
            None => &[],
        }
    }

    /// Put a group on this court; the court becomes active iff the group is full.
    pub fn seat(&mut self, mut group: PlayerGroup) {
        group.court = Some(self.id);
        self.group = Some(group);
        self.is_active = false;
        self.refresh_active();
    }

    /// Recompute `is_active` from occupancy. A game starts the moment the court
    /// fills and its start time is kept until the court drops below four.
    pub fn refresh_active(&mut self) {
        let full = self.occupancy() == COURT_CAPACITY;
        if full && !self.is_active {
            self.started_at = Some(Utc::now());
        } else if !full {
            self.started_at = None;
        }
        self.is_active = full;
    }

    /// Take the group off the court, leaving it empty and inactive.
    pub fn clear(&mut self) -> Option<PlayerGroup> {
        self.is_active = false;
        self.started_at = None;
        self.group.take().map(|mut g| {
            g.court = None;
            g
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn group_of(n: usize) -> PlayerGroup {
        PlayerGroup::with_players((0..n).map(|_| Uuid::new_v4()).collect())
    }

    #[test]
    fn seating_a_full_group_activates_the_court() {
        let mut court = Court::new(1);
        assert!(court.is_available());
        court.seat(group_of(4));
        assert!(court.is_active);
        assert!(court.started_at.is_some());
        assert_eq!(court.group.as_ref().unwrap().court, Some(court.id));
    }

    #[test]
    fn filling_the_last_seat_starts_the_game() {
        let mut court = Court::new(1);
        court.seat(group_of(3));
        assert_eq!(court.started_at, None);
        if let Some(group) = court.group.as_mut() {
            group.players.push(Uuid::new_v4());
        }
        court.refresh_active();
        assert!(court.is_active);
        let started = court.started_at;
        assert!(started.is_some());

        court.refresh_active();
        assert_eq!(court.started_at, started);
    }

    #[test]
    fn partial_group_leaves_court_open() {
        let mut court = Court::new(2);
        court.seat(group_of(2));
        assert!(!court.is_active);
        assert!(court.is_partially_filled());
        assert!(!court.is_available());
    }

    #[test]
    fn clear_resets_court_and_back_reference() {
        let mut court = Court::new(3);
        court.seat(group_of(4));
        let group = court.clear().unwrap();
        assert_eq!(group.court, None);
        assert_eq!(court.started_at, None);
        assert!(court.is_available());
        assert_eq!(court.name, "3");
    }
}
