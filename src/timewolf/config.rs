use crate::credentials::DEFAULT_PASSWORD_PROMPT;
use crate::error::{Result, TimewolfError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_SENDER: &str = "timewolf";

/// Environment variable that overrides the configuration directory.
pub const HOME_ENV: &str = "TIMEWOLF_HOME";

/// Configuration for timewolf tools, stored in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimewolfConfig {
    /// Emit verbose messages on stderr
    #[serde(default)]
    pub verbose: bool,

    /// Sender label used in formatted console lines
    #[serde(default = "default_sender")]
    pub sender: String,

    /// Program name shown in console lines (defaults to the invocation name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,

    /// Credential store to read instead of `~/.netrc`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netrc_path: Option<PathBuf>,

    /// Text shown when asking for a password
    #[serde(default = "default_password_prompt")]
    pub password_prompt: String,
}

fn default_sender() -> String {
    DEFAULT_SENDER.to_string()
}

fn default_password_prompt() -> String {
    DEFAULT_PASSWORD_PROMPT.to_string()
}

impl Default for TimewolfConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            sender: default_sender(),
            program_name: None,
            netrc_path: None,
            password_prompt: default_password_prompt(),
        }
    }
}

impl TimewolfConfig {
    /// Directory holding `config.json`: `$TIMEWOLF_HOME` when set, otherwise
    /// the platform config directory.
    pub fn default_dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        ProjectDirs::from("org", "timewolf", "timewolf")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| TimewolfError::Config("Could not determine config dir".into()))
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: TimewolfConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }
}
