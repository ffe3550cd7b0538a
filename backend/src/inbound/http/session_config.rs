//! Session cookie configuration.
//!
//! Turns the session toggles from the server settings into the signing key
//! and cookie flags used by the session middleware. Release builds refuse
//! short or missing keys; debug builds fall back to a temporary key.

use std::io;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use cap_std::{ambient_authority, fs::Dir};
use tracing::warn;
use zeroize::Zeroize;

/// Default location of the mounted session key.
pub const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";

/// Minimum key length accepted in release builds.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing keys and emit warnings.
    Debug,
    /// Release builds require a readable key of sufficient length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hr_console::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session toggles as loaded from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToggles {
    pub key_file: PathBuf,
    pub cookie_secure: bool,
    pub allow_ephemeral: bool,
}

impl Default for SessionToggles {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from(SESSION_KEY_DEFAULT_PATH),
            cookie_secure: true,
            allow_ephemeral: false,
        }
    }
}

/// Session settings handed to the middleware.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The session key file is too short.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not allow ephemeral session keys.
    #[error("session_allow_ephemeral must be false in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from the configured toggles.
///
/// # Examples
///
/// ```rust
/// use hr_console::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// let toggles = SessionToggles {
///     key_file: std::env::temp_dir().join("hr-console-missing-key"),
///     cookie_secure: false,
///     allow_ephemeral: true,
/// };
/// let settings = session_settings(&toggles, BuildMode::Debug).unwrap();
/// assert!(!settings.cookie_secure);
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    if toggles.allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    if !toggles.cookie_secure {
        warn!("session cookies are not marked Secure");
    }

    Ok(SessionSettings {
        key: session_key(&toggles.key_file, mode, toggles.allow_ephemeral)?,
        cookie_secure: toggles.cookie_secure,
        same_site: SameSite::Lax,
    })
}

fn read_key_file(path: &Path) -> io::Result<Vec<u8>> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "key path has no file name")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read(file_name)
}

fn session_key(path: &Path, mode: BuildMode, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    match read_key_file(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                if mode.is_debug() {
                    warn!(
                        path = %path.display(),
                        length,
                        "session key too short; using temporary key (dev only)"
                    );
                    return Ok(Key::generate());
                }
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}
