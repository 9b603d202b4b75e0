//! Configuration management

use crate::error::{BulletinError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Who is calling: each role is gated by one shared secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRole {
    Submitter,
    Editor,
    Admin,
}

impl AccessRole {
    /// Config key holding this role's secret
    pub fn config_key(&self) -> &'static str {
        match self {
            AccessRole::Submitter => "secrets.submit",
            AccessRole::Editor => "secrets.editor",
            AccessRole::Admin => "secrets.admin",
        }
    }
}

/// The three shared secrets; any may be unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secrets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
}

impl Secrets {
    fn for_role(&self, role: AccessRole) -> Option<&str> {
        match role {
            AccessRole::Submitter => self.submit.as_deref(),
            AccessRole::Editor => self.editor.as_deref(),
            AccessRole::Admin => self.admin.as_deref(),
        }
        .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub secrets: Secrets,
}

impl Config {
    /// Create a new config with no secrets configured
    pub fn new() -> Self {
        Config {
            created: Utc::now(),
            secrets: Secrets::default(),
        }
    }

    /// Load config from .bulletin/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".bulletin").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BulletinError::NotBulletinDirectory(path.to_path_buf())
            } else {
                BulletinError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| BulletinError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .bulletin/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let bulletin_dir = path.join(".bulletin");
        let config_path = bulletin_dir.join("config.toml");

        if !bulletin_dir.exists() {
            fs::create_dir(&bulletin_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| BulletinError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Check a caller-supplied secret against the one configured for `role`.
    ///
    /// Higher roles satisfy lower ones: the admin secret opens editor and
    /// submitter operations, the editor secret opens submitter operations.
    /// `ConfigurationMissing` is only raised when none of the secrets that
    /// could open `role` is configured.
    pub fn authorize(&self, role: AccessRole, provided: Option<&str>) -> Result<()> {
        let acceptable: Vec<&str> = std::iter::once(role)
            .chain(Self::senior_roles(role))
            .filter_map(|r| self.secrets.for_role(r))
            .collect();

        if acceptable.is_empty() {
            return Err(BulletinError::ConfigurationMissing(
                role.config_key().to_string(),
            ));
        }

        let Some(provided) = provided.filter(|p| !p.is_empty()) else {
            return Err(BulletinError::Unauthorized(format!(
                "a secret is required ({})",
                role.config_key()
            )));
        };

        if acceptable.contains(&provided) {
            Ok(())
        } else {
            Err(BulletinError::Unauthorized(format!(
                "wrong secret for {}",
                role.config_key()
            )))
        }
    }

    fn senior_roles(role: AccessRole) -> impl Iterator<Item = AccessRole> {
        let seniors: &'static [AccessRole] = match role {
            AccessRole::Submitter => &[AccessRole::Editor, AccessRole::Admin],
            AccessRole::Editor => &[AccessRole::Admin],
            AccessRole::Admin => &[],
        };
        seniors.iter().copied()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
