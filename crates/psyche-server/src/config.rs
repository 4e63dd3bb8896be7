//! Server configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level psyche server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Reject ratings outside 1–5 at the HTTP boundary.
    #[serde(default = "default_true")]
    pub strict_ratings: bool,
    /// CORS origins; `"*"` allows any origin.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
    /// Idle time after which an unfinished session is dropped. 0 disables expiry.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// How often the expiry sweep runs.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_true() -> bool {
    true
}
fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_session_ttl() -> u64 {
    3600
}
fn default_sweep_interval() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            strict_ratings: true,
            allowed_origins: default_origins(),
            session_ttl_secs: default_session_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl ServerConfig {
    /// `bind:port` for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    /// Session TTL, or `None` when expiry is disabled.
    pub fn session_ttl(&self) -> Option<Duration> {
        (self.session_ttl_secs > 0).then(|| Duration::from_secs(self.session_ttl_secs))
    }

    /// Sweep interval, never shorter than one second.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    /// Whether any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `psyche.toml` in the current directory
/// 2. `~/.config/psyche/config.toml`
///
/// Environment variable overrides: `PSYCHE_BIND`, `PSYCHE_PORT`,
/// `PSYCHE_SESSION_TTL_SECS`, `PSYCHE_STRICT_RATINGS`.
pub fn load_config_from(path: Option<&Path>) -> Result<ServerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("psyche.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ServerConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

/// Apply `PSYCHE_*` overrides read through `lookup`.
fn apply_env_overrides(
    config: &mut ServerConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(bind) = lookup("PSYCHE_BIND") {
        config.bind = bind;
    }
    if let Some(port) = lookup("PSYCHE_PORT") {
        config.port = port
            .trim()
            .parse()
            .with_context(|| format!("invalid PSYCHE_PORT: '{port}'"))?;
    }
    if let Some(ttl) = lookup("PSYCHE_SESSION_TTL_SECS") {
        config.session_ttl_secs = ttl
            .trim()
            .parse()
            .with_context(|| format!("invalid PSYCHE_SESSION_TTL_SECS: '{ttl}'"))?;
    }
    if let Some(strict) = lookup("PSYCHE_STRICT_RATINGS") {
        config.strict_ratings = match strict.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => anyhow::bail!("invalid PSYCHE_STRICT_RATINGS: '{other}'"),
        };
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("psyche"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert!(config.strict_ratings);
        assert!(config.allows_any_origin());
        assert_eq!(config.session_ttl(), Some(Duration::from_secs(3600)));
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn parse_partial_config() {
        let toml_str = r#"
port = 9100
strict_ratings = false
allowed_origins = ["http://localhost:3000"]
session_ttl_secs = 0
"#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.bind, "0.0.0.0");
        assert!(!config.strict_ratings);
        assert!(!config.allows_any_origin());
        assert_eq!(config.session_ttl(), None);
        assert_eq!(config.sweep_interval_secs, 60);
    }

    #[test]
    fn sweep_interval_has_floor() {
        let config = ServerConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = ServerConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("PSYCHE_BIND", "127.0.0.1"),
                ("PSYCHE_PORT", "9000"),
                ("PSYCHE_SESSION_TTL_SECS", "120"),
                ("PSYCHE_STRICT_RATINGS", "off"),
            ]),
        )
        .unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
        assert_eq!(config.session_ttl_secs, 120);
        assert!(!config.strict_ratings);
    }

    #[test]
    fn invalid_env_override_is_an_error() {
        let mut config = ServerConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("PSYCHE_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PSYCHE_PORT"));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/psyche.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("psyche.toml");
        std::fs::write(&path, "sweep_interval_secs = 5\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.sweep_interval_secs, 5);
    }
}
