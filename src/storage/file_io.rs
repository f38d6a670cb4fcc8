//! File I/O utilities
//!
//! Atomic JSON writes for the public election package, and owner-only
//! writes for encrypted key files.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::GuardianError;

/// Permission bits for secret files: owner read/write only
pub const SECRET_FILE_MODE: u32 = 0o600;

/// Read JSON from a file, returning an error if the file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, GuardianError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::open(path)
        .map_err(|e| GuardianError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| GuardianError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), GuardianError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            GuardianError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| GuardianError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| GuardianError::Json(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| GuardianError::Io(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| GuardianError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GuardianError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write bytes to a file readable and writable by the owner only
///
/// The file is created with mode 0600 where the platform supports it, and
/// the mode is enforced again after the write since an existing file keeps
/// its old permissions when truncated.
pub fn write_secret_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), GuardianError> {
    let path = path.as_ref();

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SECRET_FILE_MODE);
    }

    let mut file = options
        .open(path)
        .map_err(|e| GuardianError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    file.write_all(bytes)
        .map_err(|e| GuardianError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    file.sync_all()
        .map_err(|e| GuardianError::Io(format!("Failed to sync {}: {}", path.display(), e)))?;

    restrict_to_owner(path)
}

/// Restrict an existing file to owner read/write
#[cfg(unix)]
pub fn restrict_to_owner(path: &Path) -> Result<(), GuardianError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(SECRET_FILE_MODE)).map_err(|e| {
        GuardianError::Io(format!(
            "Failed to restrict permissions on {}: {}",
            path.display(),
            e
        ))
    })
}

/// Restrict an existing file to owner read/write
#[cfg(not(unix))]
pub fn restrict_to_owner(_path: &Path) -> Result<(), GuardianError> {
    // No POSIX mode bits; the file inherits the directory ACL
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        let loaded: TestData = read_json_required(&path).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("test.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.json");

        write_json_atomic(&path, &TestData::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_json_required_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_json_required::<TestData, _>(temp_dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, GuardianError::Io(_)));
    }

    #[test]
    fn test_read_json_required_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "not json at all").unwrap();

        let err = read_json_required::<TestData, _>(&path).unwrap_err();
        assert!(matches!(err, GuardianError::Json(_)));
    }

    #[test]
    fn test_write_secret_file_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret");

        write_secret_file(&path, b"first version, longer").unwrap();
        write_secret_file(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_secret_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret");

        // Pre-existing world-readable file must be tightened
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_secret_file(&path, b"new").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, SECRET_FILE_MODE);
    }
}
