use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::task::Task;

/// On-disk document holding every task record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// TOML file document store used by the local task service
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load the document; a missing or empty file is an empty store
    pub fn load(&self) -> Result<TaskDocument> {
        if !self.file_path.exists() {
            return Ok(TaskDocument::default());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let document: TaskDocument = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(document)
    }

    pub fn save(&self, document: &TaskDocument) -> Result<()> {
        let content = toml::to_string_pretty(document)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Quadrant;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.toml"));
        assert!(storage.load().unwrap().tasks.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_records() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.toml"));
        let document = TaskDocument {
            tasks: vec![Task {
                id: "abc".to_string(),
                title: "Water plants".to_string(),
                completed: true,
                quadrant: Quadrant::NotImportantNotUrgent,
                created_at: Utc.with_ymd_and_hms(2025, 3, 15, 9, 30, 0).unwrap(),
            }],
        };

        storage.save(&document).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded.tasks, document.tasks);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.toml");
        fs::write(&path, "tasks = 12").unwrap();

        let err = Storage::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
