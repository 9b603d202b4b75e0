//! File system repository

use crate::error::{BulletinError, Result};
use crate::infrastructure::{BlobStore, Config};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Directory holding blob documents, relative to `.bulletin/`
const DATA_DIR: &str = "data";

/// Abstract repository for newsletter directories
pub trait NewsletterRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .bulletin/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .bulletin/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .bulletin directory exists
    fn is_initialized(&self) -> bool;

    /// Create .bulletin directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of NewsletterRepository and BlobStore
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the newsletter root by walking up from current directory
    /// First checks BULLETIN_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("BULLETIN_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_bulletin_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(BulletinError::Config(format!(
                    "BULLETIN_ROOT is set to '{}' but no .bulletin directory found. \
                    Run 'bulletin init' in that directory or unset BULLETIN_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the newsletter root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_bulletin_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(BulletinError::NotBulletinDirectory(start.to_path_buf()));
                }
            }
        }
    }

    /// Check if a path contains a .bulletin directory
    fn has_bulletin_dir(path: &Path) -> bool {
        path.join(".bulletin").is_dir()
    }

    fn data_dir(&self) -> PathBuf {
        self.root.join(".bulletin").join(DATA_DIR)
    }

    /// Resolve a blob key to a path, refusing keys that escape the data dir
    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        let escapes = key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
        if escapes {
            return Err(BulletinError::PersistenceFailure(format!(
                "invalid blob key '{}'",
                key
            )));
        }
        Ok(self.data_dir().join(key))
    }

    fn persistence(key: &str, action: &str, e: std::io::Error) -> BulletinError {
        BulletinError::PersistenceFailure(format!("failed to {} '{}': {}", action, key, e))
    }
}

impl NewsletterRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_bulletin_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let bulletin_dir = self.root.join(".bulletin");

        if bulletin_dir.exists() {
            return Err(BulletinError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(bulletin_dir.join(DATA_DIR))?;
        Ok(())
    }
}

impl BlobStore for FileSystemRepository {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(key, bytes = bytes.len(), "read blob");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::persistence(key, "read", e)),
        }
    }

    /// Write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(key)?;

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Self::persistence(key, "create", e))?;
            }
        }

        let tmp_name = format!(
            "{}.bulletin-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("blob"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, bytes).map_err(|e| Self::persistence(key, "write", e))?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path).map_err(|e| Self::persistence(key, "replace", e))?;
        }

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Self::persistence(key, "replace", e));
        }

        debug!(key, bytes = bytes.len(), "wrote blob");
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let data_dir = self.data_dir();
        if !data_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in WalkDir::new(&data_dir) {
            let entry = entry.map_err(|e| {
                BulletinError::PersistenceFailure(format!("failed to list blobs: {}", e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&data_dir) else {
                continue;
            };
            let Some(parts) = rel
                .iter()
                .map(|part| part.to_str())
                .collect::<Option<Vec<&str>>>()
            else {
                continue;
            };
            let key = parts.join("/");
            if key.contains(".bulletin-tmp-") {
                continue;
            }
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }

        keys.sort();
        Ok(keys)
    }
}
