//! Moving single players between standby, queue groups and courts.

use crate::models::{CourtError, CourtId, CourtSystem, GroupId, Notice, PlayerGroup, PlayerId, Zone};

/// Checks shared by every single-player move.
fn ensure_placeable(system: &CourtSystem, player_id: PlayerId) -> Result<(), CourtError> {
    system.require_enabled(player_id)?;
    system.ensure_movable(player_id)
}

/// Drop a player onto a court.
///
/// - inactive court with 1-3 players: the player joins, the court goes active at 4;
/// - empty court: a new single-player group is seated there;
/// - court in play: the player starts a new group at the back of the queue instead.
pub fn drop_player_on_court(
    system: &mut CourtSystem,
    player_id: PlayerId,
    court_id: CourtId,
) -> Result<Notice, CourtError> {
    let index = system.court_position(court_id)?;
    if system.courts[index].contains(player_id) {
        return Err(CourtError::AlreadyOnCourt(player_id));
    }
    ensure_placeable(system, player_id)?;

    let court = &system.courts[index];
    let (partially_filled, available) = (court.is_partially_filled(), court.is_available());
    if partially_filled {
        system.detach(player_id);
        let court = &mut system.courts[index];
        if let Some(group) = court.group.as_mut() {
            group.players.push(player_id);
        }
        court.refresh_active();
        let name = court.name.clone();
        system.zones.insert(player_id, Zone::Court(court_id));
        log::debug!("player {} joined court {}", player_id, name);
        Ok(Notice::PlayerAddedToCourt { court: name })
    } else if available {
        system.detach(player_id);
        system.seat(index, PlayerGroup::singleton(player_id));
        Ok(Notice::PlayerAddedToCourt {
            court: system.courts[index].name.clone(),
        })
    } else {
        start_queue_group(system, player_id)
    }
}

/// Drop a player on the queue area: a new single-player group at the back.
pub fn drop_player_in_queue(
    system: &mut CourtSystem,
    player_id: PlayerId,
) -> Result<Notice, CourtError> {
    ensure_placeable(system, player_id)?;
    start_queue_group(system, player_id)
}

fn start_queue_group(system: &mut CourtSystem, player_id: PlayerId) -> Result<Notice, CourtError> {
    system.detach(player_id);
    let group_id = system.enqueue(PlayerGroup::singleton(player_id));
    log::debug!("player {} started group {}", player_id, group_id);
    Ok(Notice::NewGroupCreated)
}

/// Drop a player into an existing queue group.
pub fn drop_player_on_group(
    system: &mut CourtSystem,
    player_id: PlayerId,
    group_id: GroupId,
) -> Result<Notice, CourtError> {
    let index = system.queue_position(group_id)?;
    let group = &system.waiting_queue[index];
    if group.contains(player_id) {
        return Err(CourtError::AlreadyInGroup(player_id));
    }
    if group.is_full() {
        return Err(CourtError::GroupFull(group_id));
    }
    ensure_placeable(system, player_id)?;

    system.detach(player_id);
    // Detaching may have removed an emptied group ahead of the target.
    let index = system.queue_position(group_id)?;
    system.waiting_queue[index].players.push(player_id);
    system.zones.insert(player_id, Zone::Queue(group_id));
    Ok(Notice::PlayerAddedToGroup { group_id })
}

/// Send a player from a queue group or an open court back to standby.
pub fn move_player_to_standby(
    system: &mut CourtSystem,
    player_id: PlayerId,
) -> Result<Notice, CourtError> {
    ensure_placeable(system, player_id)?;
    if system.zone_of(player_id) == Some(Zone::Standby) {
        return Err(CourtError::AlreadyOnStandby(player_id));
    }
    system.detach(player_id);
    system.push_standby(player_id);
    Ok(Notice::PlayerMovedToStandby { player_id })
}
