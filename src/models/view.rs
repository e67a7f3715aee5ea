//! Read-only projection of a CourtSystem with players resolved (for API responses).

use crate::models::court::{Court, CourtId};
use crate::models::group::{GroupId, PlayerGroup};
use crate::models::player::{PlayerId, PlayerView};
use crate::models::system::CourtSystem;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct GroupView {
    pub id: GroupId,
    pub players: Vec<PlayerView>,
    pub created_at: DateTime<Utc>,
    pub court: Option<CourtId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CourtView {
    pub id: CourtId,
    pub number: usize,
    pub name: String,
    pub is_active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub group: Option<GroupView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SystemView {
    pub courts: Vec<CourtView>,
    pub waiting_queue: Vec<GroupView>,
    pub standby: Vec<PlayerView>,
    /// Every player, including disabled ones.
    pub roster: Vec<PlayerView>,
    pub auto_assign: bool,
    pub court_count: usize,
    pub max_courts: usize,
}

impl SystemView {
    pub fn from_system(system: &CourtSystem) -> Self {
        Self {
            courts: system
                .courts()
                .iter()
                .map(|c| court_view(system, c))
                .collect(),
            waiting_queue: system
                .waiting_queue()
                .iter()
                .map(|g| group_view(system, g))
                .collect(),
            standby: players_view(system, system.standby()),
            roster: system
                .roster()
                .iter()
                .map(|p| PlayerView::from_player(p, system.zone_of(p.id)))
                .collect(),
            auto_assign: system.auto_assign(),
            court_count: system.court_count(),
            max_courts: system.max_courts(),
        }
    }
}

fn players_view(system: &CourtSystem, ids: &[PlayerId]) -> Vec<PlayerView> {
    ids.iter()
        .filter_map(|&id| {
            system
                .player(id)
                .map(|p| PlayerView::from_player(p, system.zone_of(id)))
        })
        .collect()
}

fn group_view(system: &CourtSystem, group: &PlayerGroup) -> GroupView {
    GroupView {
        id: group.id,
        players: players_view(system, &group.players),
        created_at: group.created_at,
        court: group.court,
    }
}

fn court_view(system: &CourtSystem, court: &Court) -> CourtView {
    CourtView {
        id: court.id,
        number: court.number,
        name: court.name.clone(),
        is_active: court.is_active,
        started_at: court.started_at,
        group: court.group.as_ref().map(|g| group_view(system, g)),
    }
}
