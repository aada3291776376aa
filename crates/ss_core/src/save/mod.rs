// Save/Load System for Season Sim
// Pretty-printed JSON with versioning and load-time validation

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SaveError;
pub use format::{from_json, to_json, LeagueSave, SavedResults, SavedTeam};
pub use manager::SaveManager;
pub use migration::migrate_save;

pub const SAVE_VERSION: u32 = 1;
