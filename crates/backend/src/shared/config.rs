use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON document holding products and vouchers
    pub path: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 8000

[storage]
path = "data.json"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// The `PORT` environment variable overrides `server.port`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = load_file_or_default()?;
    apply_port_override(&mut config, std::env::var("PORT").ok().as_deref());
    Ok(config)
}

fn load_file_or_default() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_port_override(config: &mut Config, port: Option<&str>) {
    let Some(raw) = port else {
        return;
    };
    match raw.trim().parse::<u16>() {
        Ok(port) => config.server.port = port,
        Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", raw),
    }
}

/// Get the store file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_storage_path(config: &Config) -> PathBuf {
    let store_path = Path::new(&config.storage.path);

    if store_path.is_absolute() {
        return store_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(store_path);
        }
    }

    // Fallback: use relative to current directory
    store_path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.storage.path, "data.json");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_server_section_is_optional() {
        let config: Config = toml::from_str("[storage]\npath = \"/var/shop/data.json\"\n").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(
            get_storage_path(&config),
            PathBuf::from("/var/shop/data.json")
        );
    }

    #[test]
    fn test_port_override() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        apply_port_override(&mut config, Some("9100"));
        assert_eq!(config.server.port, 9100);
        apply_port_override(&mut config, Some("not-a-port"));
        assert_eq!(config.server.port, 9100);
        apply_port_override(&mut config, None);
        assert_eq!(config.server.port, 9100);
    }
}
