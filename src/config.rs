use crate::launchpad::DEFAULT_STATE_PATH;
use crate::runner::{DEFAULT_LOG_DIR, RunnerOptions};
use crate::tailer::DEFAULT_POLL_INTERVAL;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CURRENT_VERSION: i32 = 1;
pub const DEFAULT_CONFIG_PATH: &str = "./launchpad.yml";
pub const DEFAULT_LAUNCH_DELAY: Duration = Duration::from_secs(1);

const MAX_LAUNCH_DELAY: Duration = Duration::from_secs(3600);
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"version: 1

log_dir: data/log                    # one .log file per command run
state_file: data/launcher_data.json  # registered paths and saved commands
delay: "1s"                          # pause between bulk launches
poll_interval: "1s"                  # how often a followed log is re-read
echo: true                           # copy command output to the terminal
# shell: /bin/bash                   # defaults to /bin/sh (cmd on Windows)
"#;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub version: i32,
    pub log_dir: String,
    pub state_file: String,
    pub delay: String,
    pub poll_interval: String,
    pub echo: Option<bool>,
    pub shell: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_dir: PathBuf,
    pub state_file: PathBuf,
    pub delay: Duration,
    pub poll_interval: Duration,
    pub echo: bool,
    pub shell: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            state_file: PathBuf::from(DEFAULT_STATE_PATH),
            delay: DEFAULT_LAUNCH_DELAY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            echo: true,
            shell: None,
        }
    }
}

impl Settings {
    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            log_dir: self.log_dir.clone(),
            echo: self.echo,
            shell: self.shell.clone(),
        }
    }

    pub fn activity_log(&self) -> PathBuf {
        self.log_dir.join(crate::activity::FILE_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    pub issues: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn add<F: Into<String>, M: Into<String>>(&mut self, field: F, message: M) {
        self.issues.push(ValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.first() {
            Some(first) => write!(
                f,
                "configuration validation failed: {}: {}",
                first.field, first.message
            ),
            None => write!(f, "configuration validation failed"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

pub fn load(path: &Path) -> Result<Config, String> {
    let cfg = parse(path)?;
    validate(&cfg).map_err(|e| e.to_string())?;
    Ok(cfg)
}

pub fn parse(path: &Path) -> Result<Config, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("read config: {e}"))?;
    serde_yaml::from_str(&text).map_err(|e| format!("parse config yaml: {e}"))
}

pub fn validate(cfg: &Config) -> Result<(), ValidationErrors> {
    let mut issues = ValidationErrors::default();

    if cfg.version != CURRENT_VERSION {
        issues.add("version", format!("must be {CURRENT_VERSION}"));
    }

    if !cfg.delay.is_empty() {
        match humantime::parse_duration(&cfg.delay) {
            Ok(delay) if delay > MAX_LAUNCH_DELAY => {
                issues.add("delay", "must not exceed 1h");
            }
            Ok(_) => {}
            Err(_) => issues.add("delay", "must be a valid duration"),
        }
    }

    if !cfg.poll_interval.is_empty() {
        match humantime::parse_duration(&cfg.poll_interval) {
            Ok(interval) if interval < MIN_POLL_INTERVAL => {
                issues.add("poll_interval", "must be at least 50ms");
            }
            Ok(_) => {}
            Err(_) => issues.add("poll_interval", "must be a valid duration"),
        }
    }

    if !cfg.log_dir.is_empty() && cfg.log_dir.trim().is_empty() {
        issues.add("log_dir", "must not be blank");
    }

    if !cfg.state_file.is_empty() && cfg.state_file.trim().is_empty() {
        issues.add("state_file", "must not be blank");
    }

    if issues.has_issues() {
        Err(issues)
    } else {
        Ok(())
    }
}

impl Config {
    pub fn resolve(&self) -> Result<Settings, String> {
        let defaults = Settings::default();

        let delay = resolve_duration(&self.delay, defaults.delay)
            .map_err(|e| format!("delay: {e}"))?;
        let poll_interval = resolve_duration(&self.poll_interval, defaults.poll_interval)
            .map_err(|e| format!("poll_interval: {e}"))?;

        Ok(Settings {
            log_dir: resolve_path(&self.log_dir, defaults.log_dir),
            state_file: resolve_path(&self.state_file, defaults.state_file),
            delay,
            poll_interval,
            echo: self.echo.unwrap_or(defaults.echo),
            shell: Some(self.shell.trim())
                .filter(|shell| !shell.is_empty())
                .map(str::to_string),
        })
    }
}

pub fn parse_duration(text: &str) -> Result<Duration, String> {
    humantime::parse_duration(text.trim()).map_err(|_| "must be a valid duration".to_string())
}

fn resolve_duration(value: &str, default_value: Duration) -> Result<Duration, String> {
    if value.is_empty() {
        return Ok(default_value);
    }
    parse_duration(value)
}

fn resolve_path(value: &str, default_value: PathBuf) -> PathBuf {
    if value.trim().is_empty() {
        default_value
    } else {
        PathBuf::from(value)
    }
}
