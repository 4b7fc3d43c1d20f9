//! Hostel configuration.
//!
//! Loaded from `~/.hostel/config.toml`. Every key is optional; a missing
//! file means defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::desk::DeskOptions;

/// Environment variable overriding `data-dir`.
pub const DATA_DIR_ENV: &str = "HOSTEL_DATA_DIR";

/// Hostel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Directory holding `hostel.sqlite`. Defaults to `~/.hostel/`.
    pub data_dir: Option<PathBuf>,

    /// Symbol printed in front of amounts. Display only.
    pub currency: String,

    /// Reject moves onto dates that are already booked.
    /// When off, the move goes through and the overlap is reported.
    pub strict_reschedule: bool,

    pub room_status: RoomStatusMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            currency: "€".to_string(),
            strict_reschedule: true,
            room_status: RoomStatusMode::Independent,
        }
    }
}

/// Where room listings take a room's status from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatusMode {
    /// The status staff last set.
    #[default]
    Independent,

    /// Occupancy from today's active bookings.
    Derived,
}

impl Config {
    /// Load config from `~/.hostel/config.toml`.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// `~/.hostel/`.
    pub fn home() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".hostel"))
    }

    /// The config file path: `~/.hostel/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::home().map(|h| h.join("config.toml"))
    }

    /// The data directory: `flag`, then `$HOSTEL_DATA_DIR`, then `data-dir`,
    /// then `~/.hostel/`.
    pub fn data_dir(&self, flag: Option<&Path>) -> Result<PathBuf, String> {
        resolve_data_dir(
            flag,
            env::var_os(DATA_DIR_ENV),
            self.data_dir.as_deref(),
            Self::home(),
        )
    }

    pub fn desk_options(&self) -> DeskOptions {
        DeskOptions {
            strict_reschedule: self.strict_reschedule,
        }
    }
}

fn resolve_data_dir(
    flag: Option<&Path>,
    from_env: Option<OsString>,
    from_file: Option<&Path>,
    home: Option<PathBuf>,
) -> Result<PathBuf, String> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = from_env.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = from_file {
        return Ok(dir.to_path_buf());
    }
    home.ok_or_else(|| {
        format!("could not determine home directory; set {DATA_DIR_ENV} or pass --data-dir")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert!(config.strict_reschedule);
        assert_eq!(config.room_status, RoomStatusMode::Independent);
        assert_eq!(config.currency, "€");
    }

    #[test]
    fn reads_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data-dir = \"/srv/hostel\"\n\
             currency = \"$\"\n\
             strict-reschedule = false\n\
             room-status = \"derived\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/hostel")));
        assert_eq!(config.currency, "$");
        assert!(!config.strict_reschedule);
        assert_eq!(config.room_status, RoomStatusMode::Derived);
        assert!(!config.desk_options().strict_reschedule);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "currency = \"£\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.currency, "£");
        assert!(config.strict_reschedule);
    }

    #[test]
    fn invalid_value_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "room-status = \"sometimes\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();

        assert!(err.starts_with("invalid config at"), "{err}");
        assert!(err.contains("config.toml"));
    }

    #[test]
    fn data_dir_precedence() {
        let home = Some(PathBuf::from("/home/ana/.hostel"));
        let file = Path::new("/srv/hostel");
        let flag = Path::new("/tmp/desk");

        let resolved = resolve_data_dir(
            Some(flag),
            Some("/var/hostel".into()),
            Some(file),
            home.clone(),
        );
        assert_eq!(resolved.unwrap(), PathBuf::from("/tmp/desk"));

        let resolved = resolve_data_dir(None, Some("/var/hostel".into()), Some(file), home.clone());
        assert_eq!(resolved.unwrap(), PathBuf::from("/var/hostel"));

        let resolved = resolve_data_dir(None, Some(OsString::new()), Some(file), home.clone());
        assert_eq!(resolved.unwrap(), PathBuf::from("/srv/hostel"));

        let resolved = resolve_data_dir(None, None, None, home);
        assert_eq!(resolved.unwrap(), PathBuf::from("/home/ana/.hostel"));

        assert!(resolve_data_dir(None, None, None, None).is_err());
    }
}
