//! File system utilities for bundling.
//!
//! Idempotent directory and file removal plus payload size measurement.

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Sums the byte sizes of every regular file below `path`.
///
/// A plain file yields its own size. Symbolic links are followed, so a linked
/// file or directory counts at its target's size; a link loop is an error.
pub fn directory_size(path: &Path) -> Result<u64> {
    let mut total = 0u64;
    for entry in walkdir::WalkDir::new(path).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() {
            total += entry.metadata()?.len();
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_size_is_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.bin"), [0u8; 10]).unwrap();
        std::fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        std::fs::write(dir.path().join("nested/b.bin"), [0u8; 20]).unwrap();
        std::fs::write(dir.path().join("nested/deeper/c.bin"), [0u8; 5]).unwrap();

        assert_eq!(directory_size(dir.path()).unwrap(), 35);
    }

    #[test]
    fn test_directory_size_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.bin");
        std::fs::write(&file, [1u8; 7]).unwrap();

        assert_eq!(directory_size(&file).unwrap(), 7);
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_size_follows_directory_links() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("lib.dll"), [0u8; 12]).unwrap();
        std::fs::write(dir.path().join("app.exe"), [0u8; 3]).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("plugins")).unwrap();

        assert_eq!(directory_size(dir.path()).unwrap(), 15);
    }

    #[test]
    fn test_directory_size_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(directory_size(&dir.path().join("missing")).is_err());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("stage");
        create_dir_all(&target, false).await.unwrap();
        remove_dir_all(&target).await.unwrap();
        remove_dir_all(&target).await.unwrap();
        remove_file(&dir.path().join("nothing.msi")).await.unwrap();
        assert!(!target.exists());
    }
}
