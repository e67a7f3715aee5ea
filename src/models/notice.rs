//! User-facing notices returned by successful transitions, and their severity.

use crate::models::court::CourtId;
use crate::models::group::GroupId;
use crate::models::player::PlayerId;
use serde::Serialize;

/// How prominently a front end should surface a notice or rejection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    PlayerAdded { player_id: PlayerId, name: String },
    PlayerUpdated { player_id: PlayerId },
    PlayerRemoved { player_id: PlayerId },
    PlayerEnabled { player_id: PlayerId },
    PlayerDisabled { player_id: PlayerId },
    NewGroupCreated,
    PlayerAddedToGroup { group_id: GroupId },
    PlayerAddedToCourt { court: String },
    PlayerMovedToStandby { player_id: PlayerId },
    /// A queue group was seated. Carries what a "call to court" announcement needs.
    GroupAssigned {
        court_id: CourtId,
        court: String,
        players: Vec<String>,
    },
    GroupMovedToCourt { court: String },
    GroupMovedToQueue,
    GroupDissolved,
    QueueReordered,
    GameFinished { court: String },
    AutoAssignEnabled,
    AutoAssignDisabled,
    CourtCountChanged { count: usize },
    CourtRenamed { court: String },
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::PlayerAdded { .. }
            | Notice::PlayerUpdated { .. }
            | Notice::GroupAssigned { .. }
            | Notice::GroupMovedToCourt { .. }
            | Notice::GameFinished { .. } => Severity::Success,
            _ => Severity::Info,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::PlayerAdded { name, .. } => write!(f, "Player {} added", name),
            Notice::PlayerUpdated { .. } => write!(f, "Player updated"),
            Notice::PlayerRemoved { .. } => write!(f, "Player removed"),
            Notice::PlayerEnabled { .. } => write!(f, "Player enabled"),
            Notice::PlayerDisabled { .. } => write!(f, "Player disabled"),
            Notice::NewGroupCreated => write!(f, "New group created"),
            Notice::PlayerAddedToGroup { .. } => write!(f, "Player added to group"),
            Notice::PlayerAddedToCourt { court } => write!(f, "Player added to court {}", court),
            Notice::PlayerMovedToStandby { .. } => write!(f, "Player moved to standby"),
            Notice::GroupAssigned { court, players, .. } => {
                write!(f, "{} please go to court {}", players.join(", "), court)
            }
            Notice::GroupMovedToCourt { court } => write!(f, "Group moved to court {}", court),
            Notice::GroupMovedToQueue => write!(f, "Group moved back to the queue"),
            Notice::GroupDissolved => write!(f, "Group dissolved"),
            Notice::QueueReordered => write!(f, "Queue reordered"),
            Notice::GameFinished { court } => write!(f, "Game on court {} finished", court),
            Notice::AutoAssignEnabled => write!(f, "Auto-assign enabled"),
            Notice::AutoAssignDisabled => write!(f, "Auto-assign disabled"),
            Notice::CourtCountChanged { count } => write!(f, "Court count set to {}", count),
            Notice::CourtRenamed { court } => write!(f, "Court renamed to {}", court),
        }
    }
}
