use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Prefix for the auth endpoints, e.g. `http://localhost:3000/api`
    pub base_url: String,
    pub login_timeout_seconds: u64,
}

impl AuthConfig {
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Layered load: built-in defaults, then `default`, `{RUN_MODE}` and `local`
    /// files under `dir`, then `TRIPWISE_*` environment variables.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("auth.base_url", "http://localhost:3000/api")?
            .set_default("auth.login_timeout_seconds", 10)?
            .set_default("storage.path", "tripwise-data.json")?
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(&run_mode)).required(false))
            // Not checked in
            .add_source(config::File::from(dir.join("local")).required(false))
            // Eg. `TRIPWISE_AUTH__BASE_URL=https://example.com/api`
            .add_source(
                config::Environment::with_prefix("TRIPWISE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();

        assert_eq!(config.auth.login_timeout(), Duration::from_secs(10));
        assert_eq!(config.storage.path, PathBuf::from("tripwise-data.json"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[auth]\nlogin_timeout_seconds = 3\n\n[storage]\npath = \"/tmp/trips.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config.auth.login_timeout_seconds, 3);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/trips.json"));
    }
}
