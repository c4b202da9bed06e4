//! Per-user state directory resolution.
//!
//! The state directory holds the downloaded service binary and the
//! `service.json` descriptor the daemon publishes. It lives under
//! `%LOCALAPPDATA%\UniToken` on Windows and `~/.local/share/uni-token`
//! elsewhere, respecting `XDG_DATA_HOME` where set.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Returns the XDG data base directory.
///
/// Uses `XDG_DATA_HOME` if set, otherwise `~/.local/share`.
#[cfg(not(windows))]
fn data_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
}

#[cfg(windows)]
fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir()
}

/// Directory name under the platform data root.
#[cfg(not(windows))]
const APP_DIR: &str = "uni-token";

#[cfg(windows)]
const APP_DIR: &str = "UniToken";

/// Resolves the per-user state directory, creating it if missing.
///
/// Every other component depends on this directory existing and being
/// writable, so resolution happens before anything else in the bootstrap and
/// the result is held for the rest of the session.
///
/// # Errors
///
/// Returns [`Error::Filesystem`] if the platform data root cannot be
/// determined or the directory cannot be created. Fatal; there is no retry.
pub fn state_dir() -> Result<PathBuf> {
    let root = data_dir()
        .ok_or_else(|| Error::Filesystem("could not determine user data directory".to_string()))?
        .join(APP_DIR);

    ensure_dir(root)
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&path)
        .map_err(|e| Error::Filesystem(format!("could not create {}: {e}", path.display())))?;
    Ok(path)
}
