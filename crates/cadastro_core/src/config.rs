//! Runtime configuration for the data file and the form controller.
//!
//! # Responsibility
//! - Resolve the data file location (`~/Desktop/cliente_data.txt`) with an
//!   environment override.
//! - Hold controller policies that differ between deployments.
//!
//! # Invariants
//! - The environment override wins when it is set and non-blank.
//! - No config files are read.

use std::error::Error;
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the data file path.
pub const DATA_PATH_ENV: &str = "CADASTRO_DATA_PATH";
/// File name of the client list. Content is JSON despite the extension.
pub const DATA_FILE_NAME: &str = "cliente_data.txt";
const DESKTOP_DIR_NAME: &str = "Desktop";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither the override nor the OS home directory is available.
    HomeDirUnavailable,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => write!(
                f,
                "home directory is unavailable; set {DATA_PATH_ENV} to choose the data file"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolves the data file path from the process environment.
pub fn resolve_data_path() -> Result<PathBuf, ConfigError> {
    data_path_from(std::env::var_os(DATA_PATH_ENV), dirs::home_dir())
}

/// Resolves the data file path from explicit inputs.
///
/// Split from [`resolve_data_path`] so both branches are testable without
/// touching process state.
pub fn data_path_from(
    override_path: Option<OsString>,
    home_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(raw) = override_path {
        let trimmed = raw.to_string_lossy().trim().to_string();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    home_dir
        .map(|home| home.join(DESKTOP_DIR_NAME).join(DATA_FILE_NAME))
        .ok_or(ConfigError::HomeDirUnavailable)
}

/// Default rolling-log directory, next to the data file.
pub fn default_log_dir(data_path: &Path) -> PathBuf {
    data_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(LOG_DIR_NAME)
}

/// What the form shows after a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfterSavePolicy {
    /// Start a new empty record.
    ResetToEmpty,
    /// Keep the saved record on screen for further edits.
    #[default]
    KeepSaved,
}

/// Form controller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub after_save: AfterSavePolicy,
    /// How long a notification stays visible.
    pub notification_ttl: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            after_save: AfterSavePolicy::default(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{data_path_from, default_log_dir, ConfigError, DATA_FILE_NAME};
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn override_wins_over_home() {
        let path = data_path_from(
            Some(OsString::from("  /srv/cadastro/clientes.json ")),
            Some(PathBuf::from("/home/ana")),
        )
        .expect("override should resolve");
        assert_eq!(path, PathBuf::from("/srv/cadastro/clientes.json"));
    }

    #[test]
    fn blank_override_falls_back_to_desktop() {
        let path = data_path_from(Some(OsString::from("   ")), Some(PathBuf::from("/home/ana")))
            .expect("home should resolve");
        assert_eq!(
            path,
            PathBuf::from("/home/ana").join("Desktop").join(DATA_FILE_NAME)
        );
    }

    #[test]
    fn missing_home_is_reported() {
        let error = data_path_from(None, None).expect_err("no home must fail");
        assert_eq!(error, ConfigError::HomeDirUnavailable);
        assert!(error.to_string().contains("CADASTRO_DATA_PATH"));
    }

    #[test]
    fn log_dir_sits_next_to_data_file() {
        let log_dir = default_log_dir(&PathBuf::from("/home/ana/Desktop/cliente_data.txt"));
        assert_eq!(log_dir, PathBuf::from("/home/ana/Desktop/logs"));
    }
}
