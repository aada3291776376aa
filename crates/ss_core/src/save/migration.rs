use super::error::SaveError;
use super::format::LeagueSave;
use super::SAVE_VERSION;

/// Migrate save data from older versions to current version
pub fn migrate_save(mut save: LeagueSave) -> Result<LeagueSave, SaveError> {
    let original_version = save.version;

    save = match save.version {
        0 => migrate_v0_to_v1(save),
        SAVE_VERSION => save,
        found => return Err(SaveError::VersionMismatch { found, expected: SAVE_VERSION }),
    };

    save.version = SAVE_VERSION;

    if original_version != SAVE_VERSION {
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}

/// Version 0 files carry no `version` or `timestamp`, may leave out team
/// attributes and results (defaulted during parsing), and can hold a zero
/// cursor.
fn migrate_v0_to_v1(mut save: LeagueSave) -> LeagueSave {
    log::info!("Migrating save from version 0 to 1");

    if save.current_week == 0 {
        log::warn!("Save has week 0 cursor, moving it to week 1");
        save.current_week = 1;
    }

    if save.timestamp == 0 {
        save.update_timestamp();
    }

    save
}
