//! Game lifecycle: finishing games and the auto-assign policy.

use crate::logic::groups::seat_from_queue;
use crate::models::{CourtError, CourtId, CourtSystem, Notice, COURT_CAPACITY};

/// End the game on an active court: every player gets a game counted and returns to standby.
pub fn finish_game(system: &mut CourtSystem, court_id: CourtId) -> Result<Notice, CourtError> {
    let index = system.court_position(court_id)?;
    if !system.courts[index].is_active {
        return Err(CourtError::CourtNotActive(court_id));
    }
    let court = system.courts[index].name.clone();
    let group = system.courts[index]
        .clear()
        .ok_or(CourtError::CourtEmpty(court_id))?;
    for player_id in group.players {
        if let Some(p) = system.player_mut(player_id) {
            p.record_game();
        }
        system.push_standby(player_id);
    }
    log::info!("game on court {} finished", court);
    Ok(Notice::GameFinished { court })
}

pub fn set_auto_assign(system: &mut CourtSystem, enabled: bool) -> Notice {
    system.auto_assign = enabled;
    if enabled {
        Notice::AutoAssignEnabled
    } else {
        Notice::AutoAssignDisabled
    }
}

/// Seat full groups from the head of the queue while courts are free.
///
/// The queue is strictly FIFO: a head group with fewer than four players blocks
/// everything behind it. Does nothing while auto-assign is off.
pub fn auto_assign(system: &mut CourtSystem) -> Vec<Notice> {
    let mut notices = Vec::new();
    if !system.auto_assign {
        return notices;
    }
    loop {
        let head_is_full = system
            .waiting_queue
            .first()
            .is_some_and(|g| g.len() == COURT_CAPACITY);
        if !head_is_full {
            break;
        }
        let Some(court_index) = system.courts.iter().position(|c| c.is_available()) else {
            break;
        };
        notices.push(seat_from_queue(system, 0, court_index));
    }
    notices
}
