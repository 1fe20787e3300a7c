//! Optional `config.json` in the data directory.

use crate::domain::PomodoroDurations;
use crate::persistence::{atomic_write, read_file};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Time-estimate relay settings.
    pub relay: RelayConfig,
    /// Pomodoro timer lengths.
    pub pomodoro: PomodoroConfig,
    /// Dashboard behaviour.
    pub ui: UiConfig,
}

/// Upstream LLM and relay server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Address `flowtime serve` binds to.
    pub listen: String,
    /// Base URL of the chat-completions gateway.
    pub base_url: String,
    /// Model name sent upstream.
    pub model: String,
    /// Environment variable holding the bearer token.
    pub api_key_env: String,
    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8787".to_string(),
            base_url: "https://ai.gateway.lovable.dev".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            api_key_env: "FLOWTIME_AI_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RelayConfig {
    /// Token from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    pub work_minutes: u64,
    pub short_break_minutes: u64,
    pub long_break_minutes: u64,
    /// A long break follows every Nth work session.
    pub long_break_every: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_every: 4,
        }
    }
}

impl PomodoroConfig {
    pub fn durations(&self) -> PomodoroDurations {
        PomodoroDurations {
            work: Duration::from_secs(self.work_minutes.max(1) * 60),
            short_break: Duration::from_secs(self.short_break_minutes.max(1) * 60),
            long_break: Duration::from_secs(self.long_break_minutes.max(1) * 60),
            long_break_every: self.long_break_every.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Seconds between motivational quote changes.
    pub quote_rotation_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            quote_rotation_secs: 15,
        }
    }
}

impl UiConfig {
    pub fn quote_rotation(&self) -> Duration {
        Duration::from_secs(self.quote_rotation_secs.max(1))
    }
}

/// Load config from `path`. A missing file gives the defaults; a malformed
/// one is logged and also gives the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let Some(content) = read_file(path)? else {
        return Ok(Config::default());
    };

    match serde_json::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed config, using defaults");
            Ok(Config::default())
        }
    }
}

/// Save config to `path`
pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = tempdir().unwrap();
        let config = load_config(temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.relay.listen, "127.0.0.1:8787");
        assert_eq!(config.ui.quote_rotation_secs, 15);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"relay": {"model": "other/model"}, "pomodoro": {"work_minutes": 50}}"#)
            .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.relay.model, "other/model");
        assert_eq!(config.relay.timeout_secs, 30);
        assert_eq!(config.pomodoro.work_minutes, 50);
        assert_eq!(config.pomodoro.short_break_minutes, 5);
    }

    #[test]
    fn test_malformed_config_gives_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = Config::default();
        config.relay.listen = "0.0.0.0:9000".to_string();
        config.ui.quote_rotation_secs = 30;
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_pomodoro_durations() {
        let durations = PomodoroConfig::default().durations();
        assert_eq!(durations.work, Duration::from_secs(25 * 60));
        assert_eq!(durations.long_break_every, 4);
    }
}
