//! Application settings loaded via OrthoConfig.

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Settings read from the command line, `YATUBE_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "YATUBE")]
pub struct AppSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// JSON seed file with accounts and groups.
    pub seed_path: Option<PathBuf>,
}

impl AppSettings {
    /// Return the configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Return the configured pool size.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Resolve the listen address.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the host does not resolve.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} does not resolve to an address", self.host()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "YATUBE_HOST",
        "YATUBE_PORT",
        "YATUBE_DATABASE_URL",
        "YATUBE_POOL_MAX_SIZE",
        "YATUBE_SEED_PATH",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("yatube-api")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), 8080);
        assert_eq!(settings.pool_max_size(), 10);
        assert!(settings.database_url.is_none());
        assert!(settings.seed_path.is_none());
        assert_eq!(
            settings.bind_addr().expect("address resolves"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("YATUBE_HOST", Some("127.0.0.1".to_owned())),
            ("YATUBE_PORT", Some("9000".to_owned())),
            (
                "YATUBE_DATABASE_URL",
                Some("postgres://localhost/yatube".to_owned()),
            ),
            ("YATUBE_POOL_MAX_SIZE", Some("3".to_owned())),
            ("YATUBE_SEED_PATH", Some("/tmp/yatube-seed.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address resolves"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/yatube")
        );
        assert_eq!(settings.pool_max_size(), 3);
        assert_eq!(settings.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(
            settings.seed_path,
            Some(PathBuf::from("/tmp/yatube-seed.json"))
        );
    }

    #[rstest]
    fn port_alone_leaves_other_defaults_in_place() {
        let _guard = lock_env(VARS.map(|name| {
            (name, (name == "YATUBE_PORT").then(|| "8181".to_owned()))
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.port(), 8181);
        assert_eq!(settings.pool_max_size(), 10);
        assert_eq!(settings.host(), DEFAULT_HOST);
    }
}
