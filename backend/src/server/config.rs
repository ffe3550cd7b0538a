//! Server settings loaded via OrthoConfig and the derived server config.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use hr_console::inbound::http::session_config::{
    SESSION_KEY_DEFAULT_PATH, SessionSettings, SessionToggles,
};
use hr_console::outbound::memory::ConsoleStores;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_STORE_LATENCY_MS: u64 = 250;

/// Settings read from the command line, `HR_CONSOLE_*` variables and the
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HR_CONSOLE")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Artificial delay applied to every store mutation.
    pub store_latency_ms: Option<u64>,
    /// Path of the session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub session_cookie_secure: bool,
    /// Allow a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
    }

    /// Latency applied by every mock store mutator.
    pub fn store_latency(&self) -> Duration {
        Duration::from_millis(self.store_latency_ms.unwrap_or(DEFAULT_STORE_LATENCY_MS))
    }

    /// Session toggles for [`hr_console::inbound::http::session_config`].
    pub fn session_toggles(&self) -> SessionToggles {
        SessionToggles {
            key_file: self
                .session_key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH)),
            cookie_secure: self.session_cookie_secure,
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}

/// Everything `create_server` needs.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) stores: ConsoleStores,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and stores.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, stores: ConsoleStores) -> Self {
        Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            bind_addr,
            stores,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const SETTINGS_ENV: [&str; 5] = [
        "HR_CONSOLE_BIND_ADDR",
        "HR_CONSOLE_STORE_LATENCY_MS",
        "HR_CONSOLE_SESSION_KEY_FILE",
        "HR_CONSOLE_SESSION_COOKIE_SECURE",
        "HR_CONSOLE_SESSION_ALLOW_EPHEMERAL",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("hr-console")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(SETTINGS_ENV.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.store_latency(), Duration::from_millis(250));
        let toggles = settings.session_toggles();
        assert_eq!(toggles.key_file, PathBuf::from(SESSION_KEY_DEFAULT_PATH));
        assert!(toggles.cookie_secure);
        assert!(!toggles.allow_ephemeral);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("HR_CONSOLE_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("HR_CONSOLE_STORE_LATENCY_MS", Some("0".to_owned())),
            ("HR_CONSOLE_SESSION_KEY_FILE", Some("/tmp/hr-key".to_owned())),
            ("HR_CONSOLE_SESSION_COOKIE_SECURE", Some("false".to_owned())),
            ("HR_CONSOLE_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.store_latency(), Duration::ZERO);
        let toggles = settings.session_toggles();
        assert_eq!(toggles.key_file, PathBuf::from("/tmp/hr-key"));
        assert!(!toggles.cookie_secure);
        assert!(toggles.allow_ephemeral);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("not-an-address".to_owned()),
            store_latency_ms: None,
            session_key_file: None,
            session_cookie_secure: true,
            session_allow_ephemeral: false,
        };

        assert!(settings.bind_addr().is_err());
    }
}
