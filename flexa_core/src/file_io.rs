//! # Project Files
//!
//! Reading and writing `.flx` project files:
//! - **Atomic saves**: write `<name>.flx.tmp`, fsync, then rename over the target
//! - **Advisory locking**: `<name>.flx.lock` holds an OS lock plus who took it
//! - **Version validation**: files from a newer schema are refused
//!
//! ## Example
//!
//! ```rust,no_run
//! use flexa_core::file_io::{save_project, load_project, FileLock};
//! use flexa_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("beams.flx");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com")?;
//! save_project(&project, path)?;
//! drop(lock);
//!
//! let reopened = load_project(path)?;
//! assert_eq!(reopened.meta.job_id, "25-001");
//! # Ok::<(), flexa_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Extension of project files
pub const PROJECT_EXTENSION: &str = "flx";

/// Hours after which a lock is ignored regardless of its owner
const LOCK_EXPIRY_HOURS: i64 = 24;

/// Who holds a project lock, as written into the `.lock` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where the lock was taken
    pub machine: String,
    /// Process holding the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Whether the lock can be taken over: expired, or its process is gone
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(LOCK_EXPIRY_HOURS) {
            return true;
        }
        match hostname() {
            Some(machine) if machine == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

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

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    std::process::Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains(&pid.to_string()))
        .unwrap_or(true)
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Map an I/O error into a [`CalcError::FileError`]
fn io_error<'a>(operation: &'a str, path: &'a Path) -> impl FnOnce(std::io::Error) -> CalcError + 'a {
    move |e| CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

fn serialization_error(e: serde_json::Error) -> CalcError {
    CalcError::SerializationError {
        reason: e.to_string(),
    }
}

/// Exclusive lock on a project file, released on drop.
///
/// Combines an OS-level lock (fs2) with a JSON `.lock` file naming the holder.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// Fails with [`CalcError::FileLocked`] when a live lock exists.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        if let Some(holder) = Self::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", holder.user_id, holder.machine),
                holder.locked_at.to_rfc3339(),
            ));
        }

        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        // Truncate only after the OS lock is taken
        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(io_error("create lock", &lock_path))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;
        lock_file.set_len(0).map_err(io_error("truncate lock", &lock_path))?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(serialization_error)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .map_err(io_error("write lock", &lock_path))?;
        lock_file.sync_all().map_err(io_error("sync lock", &lock_path))?;

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live holder of the lock, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path))
            .ok()
            .filter(|info| !info.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `beams.flx` → `beams.flx.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    with_suffix(project_path, "lock")
}

/// Append `.suffix` after the existing extension
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.{}", e.to_string_lossy(), suffix))
        .unwrap_or_else(|| suffix.to_string());
    path.with_extension(extension)
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = fs::read_to_string(lock_path).map_err(io_error("read lock", lock_path))?;
    serde_json::from_str(&contents).map_err(serialization_error)
}

/// Add the `.flx` extension when the path has none
pub fn with_project_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(PROJECT_EXTENSION)
    }
}

/// Save a project with atomic write semantics.
///
/// Serializes to pretty JSON, writes `<path>.tmp`, syncs it to disk and
/// renames it over `path`. An interrupted save leaves the previous file intact.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(serialization_error)?;
    let tmp_path = with_suffix(path, "tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(io_error("create temp file", &tmp_path))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(io_error("write temp file", &tmp_path))?;
    tmp_file.sync_all().map_err(io_error("sync temp file", &tmp_path))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * [`CalcError::FileError`] - I/O failure
/// * [`CalcError::SerializationError`] - invalid JSON
/// * [`CalcError::VersionMismatch`] - incompatible schema
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path).map_err(io_error("read", path))?;
    let project: Project =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load a project along with the current lock holder, if someone else has it open.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Accept files with the same major version, and for 0.x no newer minor.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };

    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);

    match (file.as_slice(), current.as_slice()) {
        ([], _) | (_, []) => Err(mismatch()),
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{BeamGeometry, CalculationItem};
    use crate::materials::ExposureClass;
    use std::env::temp_dir;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("flexa_test_{}_{}.flx", name, std::process::id()))
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/beams.flx"));
        assert_eq!(lock_path, Path::new("/path/to/beams.flx.lock"));
    }

    #[test]
    fn test_project_extension() {
        assert_eq!(with_project_extension(Path::new("beams")), Path::new("beams.flx"));
        assert_eq!(with_project_extension(Path::new("beams.json")), Path::new("beams.json"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("test@example.com");
        assert_eq!(info.user_id, "test@example.com");
        assert!(info.pid > 0);
    }

    #[test]
    fn test_expired_lock_is_stale() {
        let mut info = LockInfo::new("someone");
        info.machine = "another-machine".to_string();
        info.locked_at = Utc::now() - chrono::Duration::hours(25);
        assert!(info.is_stale());

        info.locked_at = Utc::now();
        assert!(!info.is_stale());
    }

    #[test]
    fn test_save_and_load_with_designs() {
        let path = temp_project_path("roundtrip");

        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        let input = project.settings.new_flexure_input(
            "B-1",
            BeamGeometry::new(0.30, 0.50, 100.0),
            [ExposureClass::XC2],
        );
        project.add_item(CalculationItem::Flexure(input));
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.items, project.items);

        let designs = loaded.design_all();
        assert!(designs[0].2.is_ok());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = with_suffix(&path, "tmp");

        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_project_path("lock_test");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "test@example.com").unwrap();
        assert_eq!(lock.info.user_id, "test@example.com");

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let path = temp_project_path("invalid");
        fs::write(&path, "{ not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_project_path("lock_check");
        save_project(&Project::new("Test", "TEST", "Client"), &path).unwrap();

        let (loaded, lock_info) = load_project_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.job_id, "TEST");
        assert!(lock_info.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_acquire_keeps_holder_metadata() {
        let path = temp_project_path("contended");
        let lock_path = lock_path_for(&path);

        // Expired metadata, but the OS lock is still held
        let mut holder_info = LockInfo::new("alice");
        holder_info.locked_at = Utc::now() - chrono::Duration::hours(30);
        fs::write(&lock_path, serde_json::to_string_pretty(&holder_info).unwrap()).unwrap();
        let holder = OpenOptions::new().read(true).write(true).open(&lock_path).unwrap();
        holder.try_lock_exclusive().unwrap();

        let err = FileLock::acquire(&path, "bob").err().unwrap();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert_eq!(read_lock_info(&lock_path).unwrap(), holder_info);

        holder.unlock().unwrap();
        drop(holder);
        let _ = fs::remove_file(&lock_path);
    }
}
