//! Upstream credentials.
//!
//! [`Settings`] is resolved once during bootstrap. Values come from the
//! process environment first; a dotenv file only fills in variables the
//! environment does not define. A missing or empty value aborts startup.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable holding the Home Assistant base URL.
pub const BASE_URL_VAR: &str = "HA_BASE_URL";

/// Environment variable holding the long-lived access token.
pub const TOKEN_VAR: &str = "HA_TOKEN";

/// Environment variable overriding the dotenv file location.
pub const ENV_FILE_VAR: &str = "HA_GATEWAY_ENV_FILE";

/// Dotenv file read when [`ENV_FILE_VAR`] is not set.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Errors that prevent the gateway from starting.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required variable is missing or empty.
    #[error(
        "missing required environment variable '{0}'; set it in the environment or the .env file"
    )]
    Missing(&'static str),

    /// The dotenv file exists but could not be read or parsed.
    #[error("failed to read env file {path}: {source}")]
    EnvFile {
        /// Path of the dotenv file.
        path: PathBuf,
        /// Underlying parse or I/O error.
        #[source]
        source: dotenvy::Error,
    },
}

/// Home Assistant base URL and access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    base_url: String,
    token: String,
}

impl Settings {
    /// Create settings from explicit values.
    ///
    /// A trailing `/` on the base URL is removed so joined paths never
    /// contain `//`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] if either value is empty.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, SettingsError> {
        let base_url = base_url.into();
        let token = token.into();

        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(SettingsError::Missing(BASE_URL_VAR));
        }
        if token.is_empty() {
            return Err(SettingsError::Missing(TOKEN_VAR));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            token,
        })
    }

    /// Resolve settings through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] naming the first variable that is
    /// absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(SettingsError::Missing(name))
        };

        let base_url = require(BASE_URL_VAR)?;
        let token = require(TOKEN_VAR)?;
        Self::new(base_url, token)
    }

    /// Load settings from the process environment and the default env file.
    ///
    /// The env file is `$HA_GATEWAY_ENV_FILE` if set, `.env` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the env file
    /// cannot be parsed.
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var_os(ENV_FILE_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_ENV_FILE), PathBuf::from);
        Self::load_with_env_file(&path)
    }

    /// Load settings from the process environment, falling back to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the env file
    /// cannot be parsed.
    pub fn load_with_env_file(path: &Path) -> Result<Self, SettingsError> {
        let file = read_env_file(path)?;
        Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .or_else(|| file.get(name).cloned())
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Join a path beginning with `/` onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Parse a dotenv file without touching the process environment.
///
/// A file that does not exist yields an empty map.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, SettingsError> {
    let env_file_error = |source| SettingsError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            tracing::debug!(path = %path.display(), "No env file found");
            return Ok(HashMap::new());
        }
        Err(err) => return Err(env_file_error(err)),
    };

    let vars = iter
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(env_file_error)?;

    tracing::debug!(path = %path.display(), count = vars.len(), "Loaded env file");
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn resolves_both_values() {
        let settings = Settings::from_lookup(lookup_from(&[
            (BASE_URL_VAR, "http://homeassistant.local:8123"),
            (TOKEN_VAR, "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.base_url(), "http://homeassistant.local:8123");
        assert_eq!(settings.token(), "secret");
    }

    #[test]
    fn missing_base_url_is_named() {
        let err = Settings::from_lookup(lookup_from(&[(TOKEN_VAR, "secret")])).unwrap_err();
        assert!(matches!(err, SettingsError::Missing(BASE_URL_VAR)));
        assert!(err.to_string().contains("HA_BASE_URL"));
    }

    #[test]
    fn empty_token_is_missing() {
        let err = Settings::from_lookup(lookup_from(&[
            (BASE_URL_VAR, "http://ha"),
            (TOKEN_VAR, ""),
        ]))
        .unwrap_err();
        assert!(matches!(err, SettingsError::Missing(TOKEN_VAR)));
    }

    #[test]
    fn trailing_slash_stripped() {
        let settings = Settings::new("http://ha:8123/", "t").unwrap();
        assert_eq!(settings.url("/api/"), "http://ha:8123/api/");
    }

    #[test]
    fn slash_only_base_url_rejected() {
        assert!(matches!(
            Settings::new("/", "t"),
            Err(SettingsError::Missing(BASE_URL_VAR))
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let settings = Settings::new("http://ha", "very-secret-token").unwrap();
        let debug = format!("{settings:?}");
        assert!(debug.contains("http://ha"));
        assert!(!debug.contains("very-secret-token"));
    }

    #[test]
    fn env_file_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "HA_BASE_URL=http://from-file:8123").unwrap();
        writeln!(file, "HA_TOKEN=\"file-token\"").unwrap();

        let vars = read_env_file(file.path()).unwrap();
        assert_eq!(vars.get(BASE_URL_VAR).unwrap(), "http://from-file:8123");
        assert_eq!(vars.get(TOKEN_VAR).unwrap(), "file-token");
    }

    #[test]
    fn missing_env_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_env_file(&dir.path().join("absent.env")).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn malformed_env_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "HA_TOKEN='unterminated").unwrap();

        let err = read_env_file(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::EnvFile { .. }));
    }

    #[test]
    fn environment_takes_precedence_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "HA_BASE_URL=http://from-file").unwrap();
        writeln!(file, "HA_TOKEN=file-token").unwrap();

        // The only test in this crate that touches these process variables.
        std::env::remove_var(BASE_URL_VAR);
        std::env::set_var(TOKEN_VAR, "env-token");
        let settings = Settings::load_with_env_file(file.path()).unwrap();
        assert_eq!(settings.base_url(), "http://from-file");
        assert_eq!(settings.token(), "env-token");

        // An empty variable is still set, so the file does not fill it in.
        std::env::set_var(TOKEN_VAR, "");
        let err = Settings::load_with_env_file(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Missing(TOKEN_VAR)));

        std::env::remove_var(TOKEN_VAR);
    }
}
