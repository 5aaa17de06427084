//! Persisted gameplay settings.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::paths::{load_or_default, write_json_atomic, SETTINGS_FILE};
use crate::types::Settings;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Load `settings.json` from `dir`, creating it with defaults if missing.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE);
        let settings = load_or_default(&path);
        tracing::debug!(path = %path.display(), ?settings, "settings loaded");
        Self { path, settings }
    }

    pub fn get(&self) -> Settings {
        self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` and save.
    pub fn update(&mut self, f: impl FnOnce(&mut Settings)) -> Result<()> {
        f(&mut self.settings);
        self.save()
    }

    /// Restore every setting to its default and save.
    pub fn reset(&mut self) -> Result<()> {
        self.settings = Settings::default();
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        write_json_atomic(&self.path, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SpeedTier, Theme};

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = SettingsStore::open(dir.path());
        assert_eq!(store.get(), Settings::default());
        assert!(store.path().exists());

        store
            .update(|s| {
                s.speed = SpeedTier::Fast;
                s.theme = Theme::Green;
                s.invert_controls = true;
            })
            .unwrap();

        let reopened = SettingsStore::open(dir.path());
        assert_eq!(reopened.get().speed, SpeedTier::Fast);
        assert_eq!(reopened.get().theme, Theme::Green);
        assert!(reopened.get().invert_controls);
    }

    #[test]
    fn reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SettingsStore::open(dir.path());
        store.update(|s| s.wall_wrap = true).unwrap();
        store.reset().unwrap();
        assert_eq!(SettingsStore::open(dir.path()).get(), Settings::default());
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), r#"{"speed": "ludicrous"}"#).unwrap();
        assert_eq!(SettingsStore::open(dir.path()).get(), Settings::default());
    }
}
