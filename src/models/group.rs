//! PlayerGroup: up to four players waiting or playing together.

use crate::models::court::{CourtId, COURT_CAPACITY};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerGroup {
    pub id: GroupId,
    /// Ordered as the players joined.
    pub players: Vec<PlayerId>,
    pub created_at: DateTime<Utc>,
    /// Set while the group is seated on a court.
    pub court: Option<CourtId>,
}

impl PlayerGroup {
    /// A new single-player group, not yet on a court.
    pub fn singleton(player: PlayerId) -> Self {
        Self::with_players(vec![player])
    }

    pub fn with_players(players: Vec<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            players,
            created_at: Utc::now(),
            court: None,
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= COURT_CAPACITY
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    /// Drop a player from the group. Returns true if it was present.
    pub fn remove(&mut self, player: PlayerId) -> bool {
        let before = self.players.len();
        self.players.retain(|&p| p != player);
        self.players.len() != before
    }
}
