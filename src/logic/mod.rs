//! Court rotation business logic: one action type and the reducer that applies it.

mod courts;
mod games;
mod groups;
mod placement;
mod roster;

use crate::models::{CourtError, CourtId, CourtSystem, Gender, GroupId, Notice, PlayerId};
use serde::{Deserialize, Serialize};

pub use courts::{rename_court, set_court_count};
pub use games::{auto_assign, finish_game, set_auto_assign};
pub use groups::{assign_group, court_group_to_queue, dissolve_group, move_court_group, reorder_queue};
pub use placement::{
    drop_player_in_queue, drop_player_on_court, drop_player_on_group, move_player_to_standby,
};
pub use roster::{add_player, remove_player, set_player_enabled, update_player};

fn default_level() -> u8 {
    crate::models::DEFAULT_LEVEL
}

/// Every state change a front end can request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    AddPlayer {
        name: String,
        #[serde(default)]
        gender: Gender,
        #[serde(default = "default_level")]
        level: u8,
    },
    UpdatePlayer {
        player_id: PlayerId,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        gender: Option<Gender>,
        #[serde(default)]
        level: Option<u8>,
        #[serde(default)]
        games_played: Option<u32>,
    },
    RemovePlayer {
        player_id: PlayerId,
    },
    SetPlayerEnabled {
        player_id: PlayerId,
        enabled: bool,
    },
    DropPlayerOnCourt {
        player_id: PlayerId,
        court_id: CourtId,
    },
    DropPlayerInQueue {
        player_id: PlayerId,
    },
    DropPlayerOnGroup {
        player_id: PlayerId,
        group_id: GroupId,
    },
    MovePlayerToStandby {
        player_id: PlayerId,
    },
    ReorderQueue {
        from: usize,
        to: usize,
    },
    MoveCourtGroup {
        from_court: CourtId,
        to_court: CourtId,
    },
    AssignGroup {
        group_id: GroupId,
        court_id: CourtId,
    },
    CourtGroupToQueue {
        court_id: CourtId,
    },
    DissolveGroup {
        group_id: GroupId,
    },
    FinishGame {
        court_id: CourtId,
    },
    SetAutoAssign {
        enabled: bool,
    },
    ToggleAutoAssign,
    SetCourtCount {
        count: usize,
    },
    RenameCourt {
        court_id: CourtId,
        name: String,
    },
}

/// Apply one action, then run auto-assign if it is on.
///
/// On error the system is exactly as it was before the call. On success the notices
/// describe what happened, including any groups auto-assign seated afterwards.
pub fn dispatch(system: &mut CourtSystem, action: Action) -> Result<Vec<Notice>, CourtError> {
    log::debug!("dispatch {:?}", action);
    let notice = match action {
        Action::AddPlayer {
            name,
            gender,
            level,
        } => add_player(system, &name, gender, level)?,
        Action::UpdatePlayer {
            player_id,
            name,
            gender,
            level,
            games_played,
        } => update_player(
            system,
            player_id,
            name.as_deref(),
            gender,
            level,
            games_played,
        )?,
        Action::RemovePlayer { player_id } => remove_player(system, player_id)?,
        Action::SetPlayerEnabled { player_id, enabled } => {
            set_player_enabled(system, player_id, enabled)?
        }
        Action::DropPlayerOnCourt {
            player_id,
            court_id,
        } => drop_player_on_court(system, player_id, court_id)?,
        Action::DropPlayerInQueue { player_id } => drop_player_in_queue(system, player_id)?,
        Action::DropPlayerOnGroup {
            player_id,
            group_id,
        } => drop_player_on_group(system, player_id, group_id)?,
        Action::MovePlayerToStandby { player_id } => move_player_to_standby(system, player_id)?,
        Action::ReorderQueue { from, to } => reorder_queue(system, from, to)?,
        Action::MoveCourtGroup {
            from_court,
            to_court,
        } => move_court_group(system, from_court, to_court)?,
        Action::AssignGroup { group_id, court_id } => assign_group(system, group_id, court_id)?,
        Action::CourtGroupToQueue { court_id } => court_group_to_queue(system, court_id)?,
        Action::DissolveGroup { group_id } => dissolve_group(system, group_id)?,
        Action::FinishGame { court_id } => finish_game(system, court_id)?,
        Action::SetAutoAssign { enabled } => set_auto_assign(system, enabled),
        Action::ToggleAutoAssign => {
            let enabled = !system.auto_assign();
            set_auto_assign(system, enabled)
        }
        Action::SetCourtCount { count } => set_court_count(system, count),
        Action::RenameCourt { court_id, name } => rename_court(system, court_id, &name)?,
    };
    let mut notices = vec![notice];
    notices.extend(auto_assign(system));
    Ok(notices)
}

impl CourtSystem {
    /// Method form of [`dispatch`].
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Notice>, CourtError> {
        dispatch(self, action)
    }
}
