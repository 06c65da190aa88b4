// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::logger::LogLevel;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Environment variable selecting the listening port
pub const PORT_ENV: &str = "PORT";

impl Config {
    /// Load configuration from the specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the config file,
    /// `SERVER_*` environment variables, then `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_port(config_path, std::env::var(PORT_ENV).ok())
    }

    /// Same as [`Config::load_from`] with an explicit `PORT` override value
    pub fn load_with_port(
        config_path: &str,
        port_override: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("SERVER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("storage.data_dir", "data")?
            .set_default("storage.file_name", "shopping-list.json")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Tokio-Hyper/1.0")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_override_option("server.port", port_override)?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that deserialize fine but cannot run
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.port == 0 {
            return Err(config::ConfigError::Message(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.logging.level.parse::<LogLevel>().is_err() {
            return Err(config::ConfigError::Message(format!(
                "Invalid logging.level '{}' (expected error, warn, info or debug)",
                self.logging.level
            )));
        }
        if self.storage.file_name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "storage.file_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::types::StorageConfig;

    const MISSING_FILE: &str = "this-config-file-does-not-exist";

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_with_port(MISSING_FILE, None).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.storage.data_dir, "data");
        assert_eq!(cfg.storage.file_name, "shopping-list.json");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert!(cfg.server.workers.is_none());
    }

    #[test]
    fn test_port_override() {
        let cfg = Config::load_with_port(MISSING_FILE, Some("8081".to_string())).unwrap();
        assert_eq!(cfg.server.port, 8081);
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "0.0.0.0:8081".parse().unwrap()
        );
    }

    #[test]
    fn test_invalid_port_override() {
        assert!(Config::load_with_port(MISSING_FILE, Some("not-a-port".to_string())).is_err());
        assert!(Config::load_with_port(MISSING_FILE, Some("0".to_string())).is_err());
    }

    #[test]
    fn test_storage_file_path() {
        let storage = StorageConfig {
            data_dir: "data".to_string(),
            file_name: "shopping-list.json".to_string(),
        };
        assert_eq!(
            storage.file_path(),
            std::path::Path::new("data").join("shopping-list.json")
        );
    }
}
