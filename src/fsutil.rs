//! Filesystem capabilities used by the orchestrator and the CLI.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

/// Recursively removes `path`, best-effort.
///
/// A missing target counts as success. Any other failure is logged and
/// swallowed; callers that need the removal to have happened must check
/// the path themselves.
pub fn remove_dir_best_effort(path: &Path) {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => debug!("could not clear {}: {err}", path.display()),
    }
}

/// Writes `contents` to `path`, creating missing parent directories.
pub fn write_with_parents(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Copies `src` to `dst`, creating missing parent directories.
pub fn copy_with_parents(src: &Path, dst: &Path) -> io::Result<u64> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)
}
