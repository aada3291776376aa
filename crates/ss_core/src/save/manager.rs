use super::error::SaveError;
use super::format::{from_json, to_json};
use super::migration::migrate_save;
use crate::state::LeagueState;

use std::fs::{self, remove_file, rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const SAVE_EXTENSION: &str = "json";

/// Named league saves inside one directory
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self { save_dir: save_dir.into() }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Save a league under `name`
    pub fn save(&self, state: &LeagueState, name: &str) -> Result<PathBuf, SaveError> {
        let path = self.path_for(name)?;
        Self::save_to_path(&path, state)?;

        log::info!("League saved as '{}'", name);
        Ok(path)
    }

    /// Load the league saved under `name`
    pub fn load(&self, name: &str) -> Result<LeagueState, SaveError> {
        let path = self.path_for(name)?;
        let state = Self::load_from_path(&path)?;

        log::info!("League '{}' loaded at week {}", name, state.current_week());
        Ok(state)
    }

    /// Replace `state` with the league saved under `name`.
    /// On any error `state` is left exactly as it was.
    pub fn load_into(&self, name: &str, state: &mut LeagueState) -> Result<(), SaveError> {
        let loaded = self.load(name)?;
        *state = loaded;
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|path| path.exists()).unwrap_or(false)
    }

    pub fn delete(&self, name: &str) -> Result<(), SaveError> {
        let path = self.path_for(name)?;
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted save '{}'", name);
        }
        Ok(())
    }

    /// Names of all saves in the directory, sorted
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        if !self.save_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    // Private helper methods

    fn validate_name(name: &str) -> Result<(), SaveError> {
        let bad = name.is_empty()
            || name.contains("..")
            || name.contains(['/', '\\'])
            || name.chars().any(char::is_control);
        if bad {
            return Err(SaveError::InvalidName { name: name.to_string() });
        }
        Ok(())
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SaveError> {
        Self::validate_name(name)?;
        Ok(self.save_dir.join(format!("{}.{}", name, SAVE_EXTENSION)))
    }

    pub fn save_to_path(path: &Path, state: &LeagueState) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut save = state.to_save();
        save.update_timestamp();
        let data = to_json(&save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");

        let written = Self::write_file(&temp_path, data.as_bytes())
            .and_then(|()| rename(&temp_path, path));
        if let Err(err) = written {
            let _ = remove_file(&temp_path);
            return Err(err.into());
        }

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(data)?;
        file.flush()?;
        file.sync_all()
    }

    pub fn load_from_path(path: &Path) -> Result<LeagueState, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let raw = fs::read_to_string(path)?;
        let save = migrate_save(from_json(&raw)?)?;
        let state = LeagueState::from_save(save)?;

        log::debug!("Loaded {} bytes from {:?}", raw.len(), path);
        Ok(state)
    }
}
