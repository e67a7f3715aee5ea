//! Court list maintenance: resizing and renaming.

use crate::models::{Court, CourtError, CourtId, CourtSystem, Notice};

/// Resize the court list to `count`, clamped to `1..=max_courts`.
///
/// New courts are appended empty and numbered after the last one. Courts cut from
/// the end send their players to standby.
pub fn set_court_count(system: &mut CourtSystem, count: usize) -> Notice {
    let count = count.clamp(1, system.max_courts);
    let current = system.courts.len();
    if count > current {
        system.courts.extend((current + 1..=count).map(Court::new));
    } else if count < current {
        let removed = system.courts.split_off(count);
        for mut court in removed {
            if let Some(group) = court.clear() {
                for player_id in group.players {
                    system.push_standby(player_id);
                }
            }
        }
    }
    log::debug!("court count {} -> {}", current, count);
    Notice::CourtCountChanged { count }
}

pub fn rename_court(
    system: &mut CourtSystem,
    court_id: CourtId,
    name: &str,
) -> Result<Notice, CourtError> {
    let index = system.court_position(court_id)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CourtError::EmptyName);
    }
    system.courts[index].name = name.to_string();
    Ok(Notice::CourtRenamed {
        court: name.to_string(),
    })
}
