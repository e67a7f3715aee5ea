//! Badminton court rotation web app: library with models, transition logic, roster storage and the REST API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    add_player, assign_group, auto_assign, court_group_to_queue, dispatch, dissolve_group,
    drop_player_in_queue, drop_player_on_court, drop_player_on_group, finish_game,
    move_court_group, move_player_to_standby, remove_player, rename_court, reorder_queue,
    set_auto_assign, set_court_count, set_player_enabled, update_player, Action,
};
pub use models::{
    Court, CourtError, CourtId, CourtSystem, CourtView, Gender, GroupId, GroupView, Notice,
    Player, PlayerGroup, PlayerId, PlayerView, Severity, SystemView, Zone, COURT_CAPACITY,
};
