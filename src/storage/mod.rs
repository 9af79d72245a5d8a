//! Physical file storage for mini-drive.
//!
//! Uploaded bytes live in a single flat directory. On-disk names are
//! `<uuid><original extension>`, decoupled from the user-supplied name so
//! collisions and path traversal are impossible.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{DriveError, Result};

/// File storage service for managing physical files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base upload directory.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given upload directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Save content under the given stored name.
    pub fn save(&self, content: &[u8], stored_name: &str) -> Result<()> {
        // Re-create the directory in case it was removed after startup.
        fs::create_dir_all(&self.base_path)?;

        let file_path = self.file_path(stored_name);
        fs::write(&file_path, content)?;

        Ok(())
    }

    /// Load content from storage.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let file_path = self.file_path(stored_name);

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DriveError::NotFound(format!("file: {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a file from storage.
    ///
    /// Returns `true` if the file was deleted, `false` if it didn't exist.
    pub fn delete(&self, stored_name: &str) -> Result<bool> {
        let file_path = self.file_path(stored_name);

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a file exists in storage.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.file_path(stored_name).exists()
    }

    /// Get the full on-disk path for a stored name.
    pub fn file_path(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(stored_name)
    }

    /// Extract the file extension from a filename, including the dot.
    ///
    /// The suffix from the last dot onward. A name that is nothing but an
    /// extension, like ".pdf", is its own extension. Returns an empty
    /// string if the name has no dot.
    pub fn extension(filename: &str) -> String {
        match filename.rfind('.') {
            Some(idx) => filename[idx..].to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_storage() -> (TempDir, FileStorage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage_path = temp_dir.path().join("uploads");

        assert!(!storage_path.exists());

        let storage = FileStorage::new(&storage_path).unwrap();

        assert!(storage_path.exists());
        assert_eq!(storage.base_path(), storage_path);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, storage) = setup_storage();
        let content = b"Hello, World!";

        storage.save(content, "abc123.txt").unwrap();

        let loaded = storage.load("abc123.txt").unwrap();
        assert_eq!(loaded, content);
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.load("nonexistent.txt");
        assert!(matches!(result, Err(DriveError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = setup_storage();

        storage.save(b"to delete", "gone.txt").unwrap();
        assert!(storage.exists("gone.txt"));

        let deleted = storage.delete("gone.txt").unwrap();
        assert!(deleted);
        assert!(!storage.exists("gone.txt"));
    }

    #[test]
    fn test_delete_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let deleted = storage.delete("nonexistent.txt").unwrap();
        assert!(!deleted);
    }

    #[test]
    fn test_file_path_is_flat() {
        let (_temp_dir, storage) = setup_storage();

        let path = storage.file_path("ab12cd34.pdf");
        assert_eq!(path, storage.base_path().join("ab12cd34.pdf"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(FileStorage::extension("photo.jpg"), ".jpg");
        assert_eq!(FileStorage::extension("document.PDF"), ".PDF");
        assert_eq!(FileStorage::extension("archive.tar.gz"), ".gz");
        assert_eq!(FileStorage::extension("no_ext"), "");
    }

    #[test]
    fn test_extension_bare_dotted_name() {
        // A name that is only an extension still has that extension.
        assert_eq!(FileStorage::extension(".pdf"), ".pdf");
        assert_eq!(FileStorage::extension(".hidden"), ".hidden");
    }

    #[test]
    fn test_binary_content() {
        let (_temp_dir, storage) = setup_storage();

        let content: Vec<u8> = (0..=255).collect();
        storage.save(&content, "binary.bin").unwrap();

        let loaded = storage.load("binary.bin").unwrap();
        assert_eq!(loaded, content);
    }

    #[test]
    fn test_save_recreates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let storage_path = temp_dir.path().join("uploads");
        let storage = FileStorage::new(&storage_path).unwrap();

        fs::remove_dir_all(&storage_path).unwrap();
        storage.save(b"data", "back.txt").unwrap();

        assert!(storage.exists("back.txt"));
    }
}
