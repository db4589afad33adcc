//! TOML-based application configuration.
//!
//! Stores planner tuning and the default learner profile:
//! - Horizon length, rest-day cadence, revision window
//! - Fixed start times for rest-day and revision blocks
//! - Optional seed for reproducible plans
//! - Default daily hours and preferred time of day
//!
//! Configuration is stored at `~/.config/studyplan/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result, ValidationError};
use crate::scheduler::PlannerConfig;
use crate::subject::{PreferredTime, Profile};
use crate::time::TimeOfDay;

/// Planner tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSection {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_rest_after_study_days")]
    pub rest_after_study_days: u32,
    #[serde(default = "default_revision_window_days")]
    pub revision_window_days: i64,
    #[serde(default = "default_revision_start")]
    pub revision_default_start: String,
    #[serde(default = "default_rest_day_start")]
    pub rest_day_start: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Default learner profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSection {
    #[serde(default = "default_daily_hours")]
    pub daily_hours: f64,
    #[serde(default)]
    pub preferred_time: PreferredTime,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studyplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerSection,
    #[serde(default)]
    pub profile: ProfileSection,
}

fn default_horizon_days() -> u32 {
    14
}
fn default_rest_after_study_days() -> u32 {
    6
}
fn default_revision_window_days() -> i64 {
    7
}
fn default_revision_start() -> String {
    "18:00".into()
}
fn default_rest_day_start() -> String {
    "10:00".into()
}
fn default_daily_hours() -> f64 {
    4.0
}

/// Keys that may be cleared with "none", "null" or an empty value.
const OPTIONAL_KEYS: [&str; 1] = ["planner.seed"];

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            rest_after_study_days: default_rest_after_study_days(),
            revision_window_days: default_revision_window_days(),
            revision_default_start: default_revision_start(),
            rest_day_start: default_rest_day_start(),
            seed: None,
        }
    }
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            daily_hours: default_daily_hours(),
            preferred_time: PreferredTime::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        key.split('.').try_fold(root, |node, part| node.get(part))
    }

    /// Parse `value` into the JSON type of the existing leaf at `key`.
    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }
        let parent = match parent_path {
            Some(path) => path
                .split('.')
                .try_fold(&mut *root, |node, part| node.get_mut(part))
                .ok_or_else(unknown)?,
            None => root,
        };
        let obj = parent.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        if OPTIONAL_KEYS.contains(&key) && matches!(value.trim(), "" | "none" | "null") {
            obj.insert(leaf.to_string(), serde_json::Value::Null);
            return Ok(());
        }

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<i64>() {
                    serde_json::Value::Number(n.into())
                } else {
                    value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                }
            }
            // optional numbers (seed) serialize as null when unset
            serde_json::Value::Null => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|e| invalid(e.to_string()))?,
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the default there if missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                tracing::warn!(path = %path.display(), "config file is not valid TOML");
                CoreError::Config(ConfigError::from(e))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// The resulting config is validated (start times, non-zero day counts,
    /// a usable default profile) before it replaces `self`.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.planner_config()?;
        updated.default_profile().validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Planner settings in engine form.
    ///
    /// # Errors
    /// Returns an error if a configured start time is not "HH:MM" or a day
    /// count is zero.
    pub fn planner_config(&self) -> Result<PlannerConfig, ConfigError> {
        let time = |key: &str, raw: &str| -> Result<TimeOfDay, ConfigError> {
            raw.parse().map_err(|e: ValidationError| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })
        };
        let at_least_one_day = |key: &str, days: u32| {
            if days == 0 {
                Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: "must be at least 1 day".into(),
                })
            } else {
                Ok(days)
            }
        };
        Ok(PlannerConfig {
            horizon_days: at_least_one_day("planner.horizon_days", self.planner.horizon_days)?,
            rest_after_study_days: at_least_one_day(
                "planner.rest_after_study_days",
                self.planner.rest_after_study_days,
            )?,
            revision_window_days: self.planner.revision_window_days,
            revision_default_start: time("planner.revision_default_start", &self.planner.revision_default_start)?,
            rest_day_start: time("planner.rest_day_start", &self.planner.rest_day_start)?,
            seed: self.planner.seed,
        })
    }

    /// Default profile from config.
    pub fn default_profile(&self) -> Profile {
        Profile::new(self.profile.daily_hours, self.profile.preferred_time)
    }
}
