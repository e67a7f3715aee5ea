//! Whole-group moves: queue reorder, court to court, queue to court, court to queue, dissolve.

use crate::models::{CourtError, CourtId, CourtSystem, GroupId, Notice, PlayerGroup};

/// Splice-move the queue group at `from` to position `to`.
pub fn reorder_queue(system: &mut CourtSystem, from: usize, to: usize) -> Result<Notice, CourtError> {
    let len = system.waiting_queue.len();
    for index in [from, to] {
        if index >= len {
            return Err(CourtError::QueueIndexOutOfRange { index, len });
        }
    }
    let group = system.waiting_queue.remove(from);
    system.waiting_queue.insert(to, group);
    Ok(Notice::QueueReordered)
}

/// The court at `index` must be free to receive a whole group.
fn ensure_available(system: &CourtSystem, index: usize) -> Result<(), CourtError> {
    let court = &system.courts[index];
    if court.is_active {
        return Err(CourtError::CourtActive(court.id));
    }
    if !court.is_empty() {
        return Err(CourtError::CourtNotEmpty(court.id));
    }
    Ok(())
}

/// Transplant the group on one court onto another, clearing the source.
pub fn move_court_group(
    system: &mut CourtSystem,
    from_court: CourtId,
    to_court: CourtId,
) -> Result<Notice, CourtError> {
    let from = system.court_position(from_court)?;
    let to = system.court_position(to_court)?;
    if system.courts[from].is_empty() {
        return Err(CourtError::CourtEmpty(from_court));
    }
    if from == to {
        return Err(CourtError::CourtNotEmpty(to_court));
    }
    ensure_available(system, to)?;

    if let Some(group) = system.courts[from].clear() {
        system.seat(to, group);
    }
    let court = system.courts[to].name.clone();
    log::debug!("group moved to court {}", court);
    Ok(Notice::GroupMovedToCourt { court })
}

/// Seat a queue group on an empty, inactive court.
pub fn assign_group(
    system: &mut CourtSystem,
    group_id: GroupId,
    court_id: CourtId,
) -> Result<Notice, CourtError> {
    let queue_index = system.queue_position(group_id)?;
    let court_index = system.court_position(court_id)?;
    ensure_available(system, court_index)?;
    Ok(seat_from_queue(system, queue_index, court_index))
}

/// Move a queue group onto a court. Both indices must already be validated.
pub(crate) fn seat_from_queue(system: &mut CourtSystem, queue_index: usize, court_index: usize) -> Notice {
    let group = system.waiting_queue.remove(queue_index);
    let players = system.player_names(&group.players);
    system.seat(court_index, group);
    let court = &system.courts[court_index];
    log::info!("court {}: {}", court.name, players.join(", "));
    Notice::GroupAssigned {
        court_id: court.id,
        court: court.name.clone(),
        players,
    }
}

/// Send the group on a court back to the end of the queue as a fresh group.
pub fn court_group_to_queue(system: &mut CourtSystem, court_id: CourtId) -> Result<Notice, CourtError> {
    let index = system.court_position(court_id)?;
    let group = system.courts[index]
        .clear()
        .ok_or(CourtError::CourtEmpty(court_id))?;
    system.enqueue(PlayerGroup::with_players(group.players));
    Ok(Notice::GroupMovedToQueue)
}

/// Break a group up, queue or court, sending every member to standby.
pub fn dissolve_group(system: &mut CourtSystem, group_id: GroupId) -> Result<Notice, CourtError> {
    let group = if let Ok(index) = system.queue_position(group_id) {
        system.waiting_queue.remove(index)
    } else {
        system
            .courts
            .iter_mut()
            .find(|c| c.group.as_ref().is_some_and(|g| g.id == group_id))
            .and_then(|c| c.clear())
            .ok_or(CourtError::GroupNotFound(group_id))?
    };
    for player_id in group.players {
        system.push_standby(player_id);
    }
    Ok(Notice::GroupDissolved)
}
