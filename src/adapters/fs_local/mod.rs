// Local filesystem adapter - Working directory operations

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default, Clone)]
pub struct LocalFsAdapter;

impl LocalFsAdapter {
    pub fn new() -> Self {
        Self
    }

    fn list_blocking(dir: &Path) -> Result<Vec<String>, DomainError> {
        let mut names = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                DomainError::Io(std::io::Error::other(format!(
                    "Failed to list {}: {}",
                    dir.display(),
                    e
                )))
            })?;
            if entry.file_type().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

fn with_path(err: std::io::Error, action: &str, path: &Path) -> DomainError {
    DomainError::Io(std::io::Error::new(
        err.kind(),
        format!("Failed to {} {}: {}", action, path.display(), err),
    ))
}

#[async_trait]
impl FsPort for LocalFsAdapter {
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(tokio::fs::try_exists(path).await?)
    }

    async fn list_file_names(&self, dir: &Path) -> Result<Vec<String>, DomainError> {
        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || Self::list_blocking(&dir))
            .await
            .map_err(|e| DomainError::Internal(format!("directory listing did not finish: {}", e)))?
    }

    async fn rename(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        tokio::fs::rename(from, to)
            .await
            .map_err(|e| with_path(e, "rename", from))
    }

    async fn remove_file(&self, path: &Path) -> Result<(), DomainError> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| with_path(e, "remove", path))
    }

    async fn write_text(&self, path: &Path, contents: &str) -> Result<(), DomainError> {
        tokio::fs::write(path, contents)
            .await
            .map_err(|e| with_path(e, "write", path))
    }

    async fn resolve_path(&self, path: &Path) -> Result<PathBuf, DomainError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_only_direct_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("001.mp4"), b"a").unwrap();
        std::fs::write(dir.path().join("mask.png"), b"m").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("002.mp4"), b"b").unwrap();

        let mut names = LocalFsAdapter::new()
            .list_file_names(dir.path())
            .await
            .unwrap();
        names.sort();
        assert_eq!(names, vec!["001.mp4", "mask.png"]);
    }

    #[tokio::test]
    async fn test_rename_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("001.mp4");
        let temporary = dir.path().join("h001.mp4");
        std::fs::write(&original, b"old").unwrap();
        std::fs::write(&temporary, b"new").unwrap();

        let fs = LocalFsAdapter::new();
        fs.rename(&temporary, &original).await.unwrap();

        assert_eq!(std::fs::read(&original).unwrap(), b"new");
        assert!(!fs.file_exists(&temporary).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = LocalFsAdapter::new()
            .remove_file(&dir.path().join("nope.mp4"))
            .await;
        assert!(matches!(result, Err(DomainError::Io(_))));
    }

    #[tokio::test]
    async fn test_resolve_relative_path() {
        let resolved = LocalFsAdapter::new()
            .resolve_path(Path::new("clip.mov"))
            .await
            .unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("clip.mov"));
    }
}
