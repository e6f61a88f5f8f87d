use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Feed;

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_science_path() -> String {
    "/science.json".to_string()
}
fn default_grammar_path() -> String {
    "/wren-and-martin.json".to_string()
}
fn default_swipe_threshold() -> i32 {
    40
}
fn default_role() -> String {
    "user".to_string()
}
fn default_tasks_path() -> String {
    "/api/task/tasks".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_science_path")]
    pub science_path: String,
    #[serde(default = "default_grammar_path")]
    pub grammar_path: String,
    /// Horizontal travel (terminal columns) before a drag counts as a swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: i32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            science_path: default_science_path(),
            grammar_path: default_grammar_path(),
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

impl ScheduleConfig {
    pub fn path_for(&self, feed: Feed) -> &str {
        match feed {
            Feed::Science => &self.science_path,
            Feed::Grammar => &self.grammar_path,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub token: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            role: default_role(),
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default = "default_tasks_path")]
    pub path: String,
    /// Read tasks from this JSON file instead of the server.
    #[serde(default)]
    pub file: String,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            path: default_tasks_path(),
            file: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub schedules: ScheduleConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "hearth")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = self.to_toml()?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing config")
    }
}
