//! Config management use case

use crate::application::cycle::CycleService;
use crate::error::{BulletinError, Result};
use crate::infrastructure::{
    AccessRole, Config, FileSystemRepository, NewsletterRepository, SubmissionStore, SystemClock,
};

const VALID_KEYS: &str = "deadline-day, secrets.submit, secrets.editor, secrets.admin, created";

/// Service for managing newsletter configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value. Secrets are masked.
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "deadline-day" => {
                let settings = SubmissionStore::new(&self.repository).settings()?;
                Ok(settings.deadline_day.to_string())
            }
            "secrets.submit" => Ok(mask(config.secrets.submit.as_deref())),
            "secrets.editor" => Ok(mask(config.secrets.editor.as_deref())),
            "secrets.admin" => Ok(mask(config.secrets.admin.as_deref())),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(BulletinError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value.
    ///
    /// Once an admin secret is configured, every change requires it. Before
    /// that, values can be set freely so a new store can be bootstrapped.
    pub fn set(&self, key: &str, value: &str, secret: Option<&str>) -> Result<()> {
        let mut config = self.repository.load_config()?;
        if config.secrets.admin.as_deref().is_some_and(|s| !s.is_empty()) {
            config.authorize(AccessRole::Admin, secret)?;
        }

        match key {
            "deadline-day" => {
                let day: i64 = value.trim().parse().map_err(|_| {
                    BulletinError::Config(format!(
                        "deadline-day must be a number between 1 and 28, got '{}'",
                        value
                    ))
                })?;
                CycleService::new(&self.repository, SystemClock).set_deadline_day(day)?;
                return Ok(());
            }
            "secrets.submit" => config.secrets.submit = non_empty(value),
            "secrets.editor" => config.secrets.editor = non_empty(value),
            "secrets.admin" => config.secrets.admin = non_empty(value),
            "created" => {
                return Err(BulletinError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(BulletinError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// Load the full config
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

/// Mask a secret for display
pub fn mask(secret: Option<&str>) -> String {
    match secret {
        Some(s) if !s.is_empty() => "********".to_string(),
        _ => "(unset)".to_string(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}
