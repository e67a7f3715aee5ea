//! Roster maintenance: add, edit, remove and enable/disable players.

use crate::models::{CourtError, CourtSystem, Gender, Notice, Player, PlayerId};

/// Trimmed name, rejected if empty or already used by another player (case-insensitive).
fn validate_name(
    system: &CourtSystem,
    name: &str,
    except: Option<PlayerId>,
) -> Result<String, CourtError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CourtError::EmptyName);
    }
    let is_duplicate = system
        .roster
        .iter()
        .any(|p| Some(p.id) != except && p.has_name(trimmed));
    if is_duplicate {
        return Err(CourtError::DuplicatePlayerName);
    }
    Ok(trimmed.to_string())
}

/// Add a new enabled player to the roster and the back of standby.
pub fn add_player(
    system: &mut CourtSystem,
    name: &str,
    gender: Gender,
    level: u8,
) -> Result<Notice, CourtError> {
    let name = validate_name(system, name, None)?;
    if !Player::is_valid_level(level) {
        return Err(CourtError::invalid_level(level));
    }
    let player = Player::new(name.clone(), gender, level);
    let player_id = player.id;
    system.roster.push(player);
    system.push_standby(player_id);
    log::debug!("added player {} ({})", name, player_id);
    Ok(Notice::PlayerAdded { player_id, name })
}

/// Edit a player's details. Zone membership is untouched.
pub fn update_player(
    system: &mut CourtSystem,
    player_id: PlayerId,
    name: Option<&str>,
    gender: Option<Gender>,
    level: Option<u8>,
    games_played: Option<u32>,
) -> Result<Notice, CourtError> {
    if system.player(player_id).is_none() {
        return Err(CourtError::PlayerNotFound(player_id));
    }
    let name = name
        .map(|n| validate_name(system, n, Some(player_id)))
        .transpose()?;
    if let Some(level) = level {
        if !Player::is_valid_level(level) {
            return Err(CourtError::invalid_level(level));
        }
    }
    let p = system
        .player_mut(player_id)
        .ok_or(CourtError::PlayerNotFound(player_id))?;
    if let Some(name) = name {
        p.name = name;
    }
    if let Some(gender) = gender {
        p.gender = gender;
    }
    if let Some(level) = level {
        p.level = level;
    }
    if let Some(games_played) = games_played {
        p.games_played = games_played;
    }
    Ok(Notice::PlayerUpdated { player_id })
}

/// Delete a player from the roster and whichever zone holds it.
pub fn remove_player(system: &mut CourtSystem, player_id: PlayerId) -> Result<Notice, CourtError> {
    if system.player(player_id).is_none() {
        return Err(CourtError::PlayerNotFound(player_id));
    }
    system.ensure_movable(player_id)?;
    system.detach(player_id);
    system.roster.retain(|p| p.id != player_id);
    log::debug!("removed player {}", player_id);
    Ok(Notice::PlayerRemoved { player_id })
}

/// Enable (back onto standby) or disable (out of every zone) a player.
pub fn set_player_enabled(
    system: &mut CourtSystem,
    player_id: PlayerId,
    enabled: bool,
) -> Result<Notice, CourtError> {
    let currently = system
        .player(player_id)
        .ok_or(CourtError::PlayerNotFound(player_id))?
        .enabled;
    if enabled {
        if !currently {
            if let Some(p) = system.player_mut(player_id) {
                p.enabled = true;
            }
            system.push_standby(player_id);
        }
        return Ok(Notice::PlayerEnabled { player_id });
    }
    if currently {
        system.ensure_movable(player_id)?;
        system.detach(player_id);
        if let Some(p) = system.player_mut(player_id) {
            p.enabled = false;
        }
    }
    Ok(Notice::PlayerDisabled { player_id })
}
