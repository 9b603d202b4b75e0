//! Initialize newsletter use case

use crate::domain::DeadlineDay;
use crate::error::Result;
use crate::infrastructure::{
    Config, FileSystemRepository, NewsletterRepository, Settings, SubmissionStore,
};
use std::fs;
use std::path::Path;

/// Initialize a new newsletter store at the specified path.
pub fn init(path: &Path, deadline_day: Option<i64>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new())?;

    let settings = Settings {
        deadline_day: deadline_day.map(DeadlineDay::clamped).unwrap_or_default(),
    };
    SubmissionStore::new(&repo).save_settings(&settings)?;

    println!("Initialized bulletin at {}", path.display());
    println!("Deadline day: {}", settings.deadline_day);

    Ok(())
}
