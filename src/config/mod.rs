use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Application configuration, read once at start and passed down explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_app_url")]
    pub app_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub work: WorkConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub password_policy: PasswordPolicy,
}

/// Contract figures the statistics targets are derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkConfig {
    #[serde(default = "default_weekly_hours")]
    pub contract_weekly_hours: f64,
    #[serde(default = "default_monthly_hours")]
    pub monthly_target_hours: f64,
    #[serde(default = "default_max_description")]
    pub max_description_length: usize,
    #[serde(default = "default_max_entries")]
    pub max_entries_per_day: i64,
}

/// Throttle, session and reset token lifetimes. All durations in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(default = "default_max_attempts")]
    pub login_max_attempts: i64,
    #[serde(default = "default_lock_window")]
    pub login_lock_window: i64,
    /// 0 or negative disables inactivity expiry.
    #[serde(default = "default_session_timeout")]
    pub session_timeout: i64,
    #[serde(default = "default_reset_expiry")]
    pub password_reset_expiry: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicy {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default)]
    pub require_uppercase: bool,
    #[serde(default)]
    pub require_lowercase: bool,
    #[serde(default)]
    pub require_digit: bool,
    #[serde(default)]
    pub require_special: bool,
}

/// Upper bound for every duration setting: ten years.
pub const MAX_DURATION_SECS: i64 = 10 * 365 * 86_400;

fn default_app_url() -> String {
    "http://localhost".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_weekly_hours() -> f64 {
    35.0
}
fn default_monthly_hours() -> f64 {
    151.67
}
fn default_max_description() -> usize {
    500
}
fn default_max_entries() -> i64 {
    50
}
fn default_max_attempts() -> i64 {
    5
}
fn default_lock_window() -> i64 {
    900
}
fn default_session_timeout() -> i64 {
    86_400
}
fn default_reset_expiry() -> i64 {
    3600
}
fn default_min_length() -> usize {
    8
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            contract_weekly_hours: default_weekly_hours(),
            monthly_target_hours: default_monthly_hours(),
            max_description_length: default_max_description(),
            max_entries_per_day: default_max_entries(),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            login_max_attempts: default_max_attempts(),
            login_lock_window: default_lock_window(),
            session_timeout: default_session_timeout(),
            password_reset_expiry: default_reset_expiry(),
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            require_uppercase: false,
            require_lowercase: false,
            require_digit: false,
            require_special: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            app_url: default_app_url(),
            log_level: default_log_level(),
            work: WorkConfig::default(),
            security: SecurityConfig::default(),
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.timedesk`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".timedesk")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timedesk.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timedesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the config file (unless `is_test`) and make sure the config dir exists.
    pub fn save(&self, is_test: bool) -> AppResult<Option<PathBuf>> {
        if is_test {
            return Ok(None);
        }
        fs::create_dir_all(Self::config_dir())?;
        let path = Self::config_file();
        let mut file = fs::File::create(&path)?;
        file.write_all(self.to_yaml()?.as_bytes())?;
        Ok(Some(path))
    }

    /// Sanity checks on values that would make the calculators misbehave.
    /// Returns every problem found, not just the first.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.database.trim().is_empty() {
            problems.push("database path is empty".to_string());
        }
        if !(self.work.contract_weekly_hours >= 0.0) {
            problems.push("work.contract_weekly_hours must be >= 0".to_string());
        }
        if !(self.work.monthly_target_hours >= 0.0) {
            problems.push("work.monthly_target_hours must be >= 0".to_string());
        }
        if self.work.max_entries_per_day < 1 {
            problems.push("work.max_entries_per_day must be >= 1".to_string());
        }
        if self.security.login_max_attempts < 1 {
            problems.push("security.login_max_attempts must be >= 1".to_string());
        }
        if !(0..=MAX_DURATION_SECS).contains(&self.security.login_lock_window) {
            problems.push(format!(
                "security.login_lock_window must be between 0 and {MAX_DURATION_SECS}"
            ));
        }
        if self.security.session_timeout > MAX_DURATION_SECS {
            problems.push(format!(
                "security.session_timeout must be <= {MAX_DURATION_SECS}"
            ));
        }
        if !(1..=MAX_DURATION_SECS).contains(&self.security.password_reset_expiry) {
            problems.push(format!(
                "security.password_reset_expiry must be between 1 and {MAX_DURATION_SECS}"
            ));
        }
        if self.password_policy.min_length == 0 {
            problems.push("password_policy.min_length must be >= 1".to_string());
        }

        problems
    }

    pub fn ensure_valid(&self) -> AppResult<()> {
        let problems = self.check();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Config(problems.join("; ")))
        }
    }
}
