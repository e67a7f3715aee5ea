//! Data structures for the court rotation: players, groups, courts, system state.

mod court;
mod group;
mod notice;
mod player;
mod system;
mod view;

pub use court::{Court, CourtId, COURT_CAPACITY};
pub use group::{GroupId, PlayerGroup};
pub use notice::{Notice, Severity};
pub use player::{Gender, Player, PlayerId, PlayerView, DEFAULT_LEVEL, MAX_LEVEL, MIN_LEVEL};
pub use system::{CourtError, CourtSystem, Zone, DEFAULT_COURT_COUNT, DEFAULT_MAX_COURTS};
pub use view::{CourtView, GroupView, SystemView};
