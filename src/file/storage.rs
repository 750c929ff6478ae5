//! File storage for Filebox.
//!
//! This module provides the flat storage root:
//! - File name validation (one plain path component per file)
//! - Save, replace, load, stat, list and delete operations
//!
//! Operations are plain filesystem calls. There is no locking, so two
//! writers to the same name race and the last write wins.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use crate::{FileboxError, Result};

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// File name inside the storage root.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time reported by the filesystem.
    pub modified: Option<SystemTime>,
}

/// File storage service for managing physical files.
///
/// All files live directly under the base path:
/// ```text
/// {base_path}/
/// ├── report.pdf
/// ├── notes.txt
/// └── ...
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for file storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base path.
    ///
    /// The base directory will be created if it doesn't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Save content under `name`, creating or truncating the file.
    pub fn save(&self, name: &str, content: &[u8]) -> Result<()> {
        let file_path = self.resolve(name)?;
        fs::write(&file_path, content)?;

        tracing::debug!(name, size = content.len(), "Saved file");
        Ok(())
    }

    /// Overwrite an existing file.
    ///
    /// Fails with `NotFound` if nothing is stored under `name`. The check and
    /// the write are separate filesystem calls.
    pub fn replace(&self, name: &str, content: &[u8]) -> Result<()> {
        if !self.exists(name) {
            return Err(FileboxError::NotFound(format!("File: {name}")));
        }
        self.save(name, content)
    }

    /// Load the full content of a stored file.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        let file_path = self.resolve(name)?;
        if !file_path.is_file() {
            return Err(FileboxError::NotFound(format!("File: {name}")));
        }

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            // Deleted between the check and the read.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileboxError::NotFound(format!("File: {name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get size and modification time of a stored file.
    pub fn stat(&self, name: &str) -> Result<StoredFile> {
        let file_path = self.resolve(name)?;

        match fs::metadata(&file_path) {
            Ok(m) if m.is_file() => Ok(StoredFile {
                name: name.to_string(),
                size: m.len(),
                modified: m.modified().ok(),
            }),
            Ok(_) => Err(FileboxError::NotFound(format!("File: {name}"))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileboxError::NotFound(format!("File: {name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List every entry name in the storage root.
    ///
    /// Names come back in directory enumeration order.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    /// Delete a stored file.
    pub fn delete(&self, name: &str) -> Result<()> {
        let file_path = self.resolve(name)?;
        if !file_path.is_file() {
            return Err(FileboxError::NotFound(format!("File: {name}")));
        }

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileboxError::NotFound(format!("File: {name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a regular file is stored under `name`.
    ///
    /// Invalid names are never stored, so they report `false`.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Resolve a file name to its path under the storage root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.base_path.join(name))
    }
}

/// Check that `name` is a single plain path component.
///
/// Rejects empty names, `.`, `..`, separators, NUL bytes and anything
/// absolute, so a resolved path can never leave the storage root.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FileboxError::InvalidName("empty file name".to_string()));
    }
    if name.contains(['/', '\\', '\0']) {
        return Err(FileboxError::InvalidName(format!(
            "'{}' contains a path separator",
            name.escape_default()
        )));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(FileboxError::InvalidName(format!(
            "'{name}' is not a plain file name"
        ))),
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
        let storage_path = temp_dir.path().join("uploaded_files");

        assert!(!storage_path.exists());

        let storage = FileStorage::new(&storage_path).unwrap();

        assert!(storage_path.is_dir());
        assert_eq!(storage.base_path(), storage_path);
    }

    #[test]
    fn test_new_keeps_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("kept.txt"), b"old").unwrap();

        let storage = FileStorage::new(temp_dir.path()).unwrap();

        assert_eq!(storage.load("kept.txt").unwrap(), b"old");
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, storage) = setup_storage();
        let content = b"Hello, World!";

        storage.save("hello.txt", content).unwrap();

        assert_eq!(storage.load("hello.txt").unwrap(), content);
        assert!(storage.base_path().join("hello.txt").is_file());
    }

    #[test]
    fn test_save_truncates_existing() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("a.txt", b"a much longer first version").unwrap();
        storage.save("a.txt", b"short").unwrap();

        assert_eq!(storage.load("a.txt").unwrap(), b"short");
    }

    #[test]
    fn test_replace_overwrites() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("doc.txt", b"C1").unwrap();
        storage.replace("doc.txt", b"C2").unwrap();

        assert_eq!(storage.load("doc.txt").unwrap(), b"C2");
    }

    #[test]
    fn test_replace_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.replace("missing.txt", b"data");

        assert!(matches!(result, Err(FileboxError::NotFound(_))));
        assert!(!storage.exists("missing.txt"));
    }

    #[test]
    fn test_load_not_found() {
        let (_temp_dir, storage) = setup_storage();

        let result = storage.load("nonexistent.txt");

        assert!(matches!(result, Err(FileboxError::NotFound(_))));
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let (_temp_dir, storage) = setup_storage();
        fs::create_dir(storage.base_path().join("subdir")).unwrap();

        assert!(matches!(
            storage.load("subdir"),
            Err(FileboxError::NotFound(_))
        ));
        assert!(!storage.exists("subdir"));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("delete.txt", b"to delete").unwrap();
        assert!(storage.exists("delete.txt"));

        storage.delete("delete.txt").unwrap();
        assert!(!storage.exists("delete.txt"));
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("once.txt", b"x").unwrap();
        storage.delete("once.txt").unwrap();

        assert!(matches!(
            storage.delete("once.txt"),
            Err(FileboxError::NotFound(_))
        ));
        assert!(matches!(
            storage.load("once.txt"),
            Err(FileboxError::NotFound(_))
        ));
    }

    #[test]
    fn test_exists() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("test.txt", b"data").unwrap();

        assert!(storage.exists("test.txt"));
        assert!(!storage.exists("nonexistent.txt"));
        assert!(!storage.exists("../test.txt"));
    }

    #[test]
    fn test_list() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("a.txt", b"a").unwrap();
        storage.save("b.bin", b"b").unwrap();
        storage.save("c.pdf", b"c").unwrap();

        let mut names = storage.list().unwrap();
        names.sort();

        assert_eq!(names, vec!["a.txt", "b.bin", "c.pdf"]);
    }

    #[test]
    fn test_list_empty() {
        let (_temp_dir, storage) = setup_storage();

        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_is_stable_without_writes() {
        let (_temp_dir, storage) = setup_storage();
        for i in 0..10 {
            storage.save(&format!("file{i}.txt"), b"x").unwrap();
        }

        let mut first = storage.list().unwrap();
        let mut second = storage.list().unwrap();
        first.sort();
        second.sort();

        assert_eq!(first, second);
    }

    #[test]
    fn test_list_missing_root_fails() {
        let (temp_dir, storage) = setup_storage();
        fs::remove_dir(temp_dir.path()).unwrap();

        assert!(matches!(storage.list(), Err(FileboxError::Io(_))));
    }

    #[test]
    fn test_stat() {
        let (_temp_dir, storage) = setup_storage();
        let content = b"Hello, World!";

        storage.save("stat.txt", content).unwrap();
        let info = storage.stat("stat.txt").unwrap();

        assert_eq!(info.name, "stat.txt");
        assert_eq!(info.size, content.len() as u64);
        assert!(info.modified.is_some());
    }

    #[test]
    fn test_stat_not_found() {
        let (_temp_dir, storage) = setup_storage();

        assert!(matches!(
            storage.stat("nonexistent.txt"),
            Err(FileboxError::NotFound(_))
        ));
    }

    #[test]
    fn test_binary_content() {
        let (_temp_dir, storage) = setup_storage();

        let content: Vec<u8> = (0..=255).collect();

        storage.save("binary.bin", &content).unwrap();
        assert_eq!(storage.load("binary.bin").unwrap(), content);
    }

    #[test]
    fn test_unicode_name() {
        let (_temp_dir, storage) = setup_storage();

        storage.save("日本語ファイル.txt", b"data").unwrap();

        assert!(storage.exists("日本語ファイル.txt"));
        assert_eq!(storage.list().unwrap(), vec!["日本語ファイル.txt"]);
    }

    #[test]
    fn test_traversal_rejected_before_write() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        let storage = FileStorage::new(&root).unwrap();

        let result = storage.save("../escaped.txt", b"data");

        assert!(matches!(result, Err(FileboxError::InvalidName(_))));
        assert!(!temp_dir.path().join("escaped.txt").exists());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("report.pdf").is_ok());
        assert!(validate_name(".hidden").is_ok());
        assert!(validate_name("with space.txt").is_ok());
        assert!(validate_name("file..txt").is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("../etc/passwd").is_err());
        assert!(validate_name("/etc/passwd").is_err());
        assert!(validate_name("sub/file.txt").is_err());
        assert!(validate_name("..\\windows").is_err());
        assert!(validate_name("nul\0byte").is_err());
    }
}
