use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MenuConfig {
    /// JSON file with the CMS categories. Without it the embedded demo menu is served.
    pub content_path: Option<String>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[menu]
# content_path = "data/menu.json"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Menu content file from configuration.
/// Relative paths resolve against the executable directory.
pub fn get_content_path(config: &Config) -> Option<PathBuf> {
    let raw = config.menu.content_path.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }
    let path = Path::new(raw);

    if path.is_absolute() {
        return Some(path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Some(exe_dir.join(path));
        }
    }

    Some(PathBuf::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.menu.content_path.is_none());
        assert!(get_content_path(&config).is_none());
    }

    #[test]
    fn test_menu_section_is_optional() {
        let config = parse_config("[server]\nhost = \"127.0.0.1\"\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.menu.content_path.is_none());
    }

    #[test]
    fn test_blank_content_path_means_demo_menu() {
        let config =
            parse_config("[server]\nhost = \"0.0.0.0\"\nport = 3000\n[menu]\ncontent_path = \"  \"\n")
                .unwrap();
        assert!(get_content_path(&config).is_none());
    }

    #[test]
    fn test_absolute_content_path_kept() {
        let absolute = std::env::temp_dir().join("menu.json");
        let toml = format!(
            "[server]\nhost = \"0.0.0.0\"\nport = 3000\n[menu]\ncontent_path = {:?}\n",
            absolute.to_string_lossy()
        );
        let config = parse_config(&toml).unwrap();
        assert_eq!(get_content_path(&config), Some(absolute));
    }

    #[test]
    fn test_relative_content_path_resolved_next_to_executable() {
        let config = parse_config(
            "[server]\nhost = \"0.0.0.0\"\nport = 3000\n[menu]\ncontent_path = \"data/menu.json\"\n",
        )
        .unwrap();
        let resolved = get_content_path(&config).unwrap();
        assert!(resolved.ends_with("data/menu.json"));
    }
}
