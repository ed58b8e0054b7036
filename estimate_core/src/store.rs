//! # Document Store
//!
//! Handles rate book and estimate file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared office drives
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Formats
//!
//! Settings (the rate book) are saved as `.tmr` files, estimates as
//! `.tme` files; both contain pretty-printed JSON. Lock files add a
//! `.lock` suffix and carry metadata about who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::settings::Settings;
//! use estimate_core::store::{load_settings, save_settings, FileLock};
//! use std::path::Path;
//!
//! let settings = Settings::default();
//! let path = Path::new("rates.tmr");
//!
//! // Acquire lock before saving
//! let lock = FileLock::acquire(path, "estimator@office.pk").unwrap();
//!
//! // Save with atomic write
//! save_settings(&settings, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::estimate::Estimate;
use crate::settings::{Settings, SCHEMA_VERSION};

/// Lock file metadata stored in sidecar .lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where the lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }
}

/// Get the hostname of the current machine
fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// File lock guard that releases the lock when dropped.
///
/// Uses both:
/// 1. OS-level file locking (via fs2) for process safety
/// 2. A sidecar .lock file with metadata for user visibility
#[derive(Debug)]
pub struct FileLock {
    /// Path to the locked document
    document_path: PathBuf,
    /// Path to the lock file
    lock_path: PathBuf,
    /// The underlying file handle (keeps the OS lock)
    _lock_file: File,
    /// Lock metadata
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a document file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the .tmr/.tme document
    /// * `user_id` - Identifier for the user acquiring the lock
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(EstimateError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> EstimateResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // Check if a lock file exists and contains valid lock info
        if lock_path.exists() {
            if let Ok(existing) = read_lock_info(&lock_path) {
                // A stale lock (dead process, or very old) can be taken over
                if !is_lock_stale(&existing) {
                    return Err(EstimateError::file_locked(
                        path.display().to_string(),
                        format!("{} ({})", existing.user_id, existing.machine),
                        existing.locked_at.to_rfc3339(),
                    ));
                }
            }
        }

        // Create/open the lock file
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                EstimateError::file_error(
                    "create lock",
                    lock_path.display().to_string(),
                    e.to_string(),
                )
            })?;

        // Try to acquire the exclusive OS-level lock (non-blocking)
        lock_file.try_lock_exclusive().map_err(|_| {
            EstimateError::file_locked(
                path.display().to_string(),
                "another process".to_string(),
                "unknown".to_string(),
            )
        })?;

        // Write lock info to the file using the same handle
        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| {
            EstimateError::SerializationError {
                reason: e.to_string(),
            }
        })?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            EstimateError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            EstimateError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        Ok(FileLock {
            document_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if locked, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if lock_path.exists() {
            if let Ok(info) = read_lock_info(&lock_path) {
                if !is_lock_stale(&info) {
                    return Some(info);
                }
            }
        }
        None
    }

    /// Get the path to the locked document
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Remove the lock file
        let _ = fs::remove_file(&self.lock_path);
        // The OS lock is released when _lock_file is dropped
    }
}

/// Get the lock file path for a document
fn lock_path_for(document_path: &Path) -> PathBuf {
    let mut lock_path = document_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Read lock info from a lock file
fn read_lock_info(lock_path: &Path) -> EstimateResult<LockInfo> {
    let mut file = File::open(lock_path).map_err(|e| {
        EstimateError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        EstimateError::file_error("read lock", lock_path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
        reason: e.to_string(),
    })
}

/// Check if a lock is stale (the process that created it is gone)
fn is_lock_stale(info: &LockInfo) -> bool {
    if let Some(our_machine) = hostname() {
        if info.machine == our_machine {
            // Same machine - check if the process is still running
            #[cfg(windows)]
            {
                use std::process::Command;
                let output = Command::new("tasklist")
                    .args(["/FI", &format!("PID eq {}", info.pid), "/NH"])
                    .output();
                if let Ok(output) = output {
                    let stdout = String::from_utf8_lossy(&output.stdout);
                    if stdout.contains("No tasks") || !stdout.contains(&info.pid.to_string()) {
                        return true;
                    }
                }
            }
            #[cfg(unix)]
            {
                if fs::metadata(format!("/proc/{}", info.pid)).is_err() {
                    return true;
                }
            }
        }
    }

    // A lock older than 24 hours is considered abandoned
    let age = Utc::now() - info.locked_at;
    if age.num_hours() > 24 {
        return true;
    }

    false
}

/// Write a JSON document with atomic semantics.
///
/// The save process:
/// 1. Serialize to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
fn atomic_write_json<T: Serialize>(value: &T, path: &Path) -> EstimateResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        EstimateError::SerializationError {
            reason: e.to_string(),
        }
    })?;

    let tmp_path = {
        let extension = path
            .extension()
            .map(|e| format!("{}.tmp", e.to_string_lossy()))
            .unwrap_or_else(|| "tmp".to_string());
        path.with_extension(extension)
    };

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        EstimateError::file_error(
            "create temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        EstimateError::file_error(
            "write temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    tmp_file.sync_all().map_err(|e| {
        EstimateError::file_error(
            "sync temp file",
            tmp_path.display().to_string(),
            e.to_string(),
        )
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        // Clean up the temp file if the rename fails
        let _ = fs::remove_file(&tmp_path);
        EstimateError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Read and parse a JSON document.
fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> EstimateResult<T> {
    let mut file = File::open(path).map_err(|e| {
        EstimateError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        EstimateError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| EstimateError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

fn validate_version(file_version: &str) -> EstimateResult<()> {
    if file_version != SCHEMA_VERSION {
        return Err(EstimateError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }
    Ok(())
}

/// Save the rate book to a `.tmr` file with atomic write semantics.
pub fn save_settings(settings: &Settings, path: &Path) -> EstimateResult<()> {
    atomic_write_json(settings, path)
}

/// Load the rate book from a `.tmr` file.
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded settings
/// * `Err(EstimateError::VersionMismatch)` - File version is incompatible
/// * `Err(EstimateError::SerializationError)` - Invalid JSON
/// * `Err(EstimateError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> EstimateResult<Settings> {
    let settings: Settings = read_json(path)?;
    validate_version(&settings.meta.version)?;
    Ok(settings)
}

/// Load the rate book, falling back to defaults when the file does not
/// exist yet (first run). Parse and version errors still surface.
pub fn load_settings_or_default(path: &Path) -> EstimateResult<Settings> {
    if path.exists() {
        load_settings(path)
    } else {
        Ok(Settings::default())
    }
}

/// Save an estimate document to a `.tme` file with atomic write semantics.
pub fn save_estimate(estimate: &Estimate, path: &Path) -> EstimateResult<()> {
    atomic_write_json(estimate, path)
}

/// Load an estimate document from a `.tme` file.
pub fn load_estimate(path: &Path) -> EstimateResult<Estimate> {
    let estimate: Estimate = read_json(path)?;
    validate_version(&estimate.meta.version)?;
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{BuildingInput, EstimateItem, EstimateMode};
    use crate::settings::{LocationTier, QualityTier, SettingsUpdate, PricingUpdate};

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.tmr");

        let mut settings = Settings::default();
        settings
            .apply(SettingsUpdate {
                pricing: Some(PricingUpdate {
                    brick_price: Some(17.5),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .unwrap();

        save_settings(&settings, &path).unwrap();
        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded.pricing.brick_price, 17.5);
        assert_eq!(loaded.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_estimate_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.tme");

        let mut estimate = Estimate::new("Hamza", "Client", "Site");
        estimate.add_item(EstimateItem::Building(BuildingInput {
            label: "House".to_string(),
            footprint_sqft: 1000.0,
            floors: 1,
            location: LocationTier::Urban,
            quality: QualityTier::Standard,
            mode: EstimateMode::Quick,
        }));

        save_estimate(&estimate, &path).unwrap();
        let loaded = load_estimate(&path).unwrap();
        assert_eq!(loaded.item_count(), 1);
        assert_eq!(loaded.meta.client, "Client");
    }

    #[test]
    fn test_load_settings_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.tmr");

        let settings = load_settings_or_default(&path).unwrap();
        assert_eq!(settings.pricing.brick_price, 15.0);
        assert!(!path.exists());
    }

    #[test]
    fn test_version_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.tmr");

        let mut settings = Settings::default();
        settings.meta.version = "0.0.1".to_string();
        save_settings(&settings, &path).unwrap();

        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_invalid_json_surfaces_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.tmr");
        fs::write(&path, "{ not json").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.tmr");
        save_settings(&Settings::default(), &path).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_lock_conflict_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.tmr");
        save_settings(&Settings::default(), &path).unwrap();

        let lock = FileLock::acquire(&path, "first@office.pk").unwrap();
        assert_eq!(lock.document_path(), path.as_path());
        assert!(FileLock::check(&path).is_some());

        let second = FileLock::acquire(&path, "second@office.pk");
        assert!(matches!(
            second.unwrap_err(),
            EstimateError::FileLocked { .. }
        ));

        drop(lock);
        assert!(FileLock::check(&path).is_none());
        let reacquired = FileLock::acquire(&path, "second@office.pk");
        assert!(reacquired.is_ok());
    }
}
