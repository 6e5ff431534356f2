use crate::errors::{Result, StandupError};
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};

/// Where a day's report lives: `{root}/{YYYY}/{MM}/{YYYYMMDD}_jira-tasks.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub directory: PathBuf,
    pub file_name: String,
}

impl OutputLocation {
    pub fn for_date(root: &Path, date: NaiveDate) -> Self {
        let year = date.year().to_string();
        let month = format!("{:02}", date.month());

        Self {
            directory: root.join(&year).join(&month),
            file_name: format!("{}{}{:02}_jira-tasks.md", year, month, date.day()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    /// Creates missing directories and overwrites the report file.
    /// Returns the absolute path written.
    pub fn write(&self, document: &str) -> Result<PathBuf> {
        let directory = absolute(&self.directory)?;

        std::fs::create_dir_all(&directory).map_err(|e| StandupError::Persistence {
            path: directory.clone(),
            message: format!("Failed to create report directory: {}", e),
        })?;

        let path = absolute(&self.path())?;
        std::fs::write(&path, document).map_err(|e| StandupError::Persistence {
            path: path.clone(),
            message: format!("Failed to write report: {}", e),
        })?;

        Ok(path)
    }
}

pub fn save_report(root: &Path, date: NaiveDate, document: &str) -> Result<PathBuf> {
    OutputLocation::for_date(root, date).write(document)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|e| StandupError::Persistence {
        path: path.to_path_buf(),
        message: format!("Failed to resolve current directory: {}", e),
    })?;
    Ok(cwd.join(path))
}
