//! Service binary installation.
//!
//! The service ships as a single static binary per platform, served from the
//! UniToken release endpoint. Installation is a download into the state
//! directory with an atomic write (temp file, then rename) so a crashed or
//! interrupted download never leaves a half-written executable at the path
//! the launcher will run.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;
use url::Url;

use crate::bootstrap::ServiceInstaller;
use crate::error::{Error, Result};

/// Release endpoint serving the service binaries.
const RELEASE_BASE_URL: &str = "https://uni-token.app/release/";

/// Name of the installed executable inside the state directory.
#[cfg(windows)]
const BINARY_NAME: &str = "service.exe";

#[cfg(not(windows))]
const BINARY_NAME: &str = "service";

/// Release artifact name for the current platform.
fn artifact_name() -> Result<&'static str> {
    match std::env::consts::OS {
        "linux" => Ok("service-linux-amd64"),
        "macos" => Ok("service-darwin-amd64"),
        "windows" => Ok("service-windows-amd64.exe"),
        other => Err(Error::Install(format!("unsupported platform: {other}"))),
    }
}

/// Production installer: downloads the platform binary from the release
/// endpoint.
#[derive(Debug, Clone)]
pub struct ReleaseInstaller {
    http: reqwest::Client,
    release_base: Url,
}

impl Default for ReleaseInstaller {
    fn default() -> Self {
        Self {
            http: reqwest::Client::new(),
            // The constant is a valid URL; parsing it cannot fail.
            release_base: Url::parse(RELEASE_BASE_URL).unwrap_or_else(|_| unreachable!()),
        }
    }
}

impl ReleaseInstaller {
    /// Creates an installer pointed at the official release endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the installer at an alternative release endpoint.
    ///
    /// Intended for tests and self-hosted mirrors; the default endpoint is
    /// used everywhere else.
    #[must_use]
    pub fn with_release_base(mut self, release_base: Url) -> Self {
        self.release_base = release_base;
        self
    }

    async fn download(&self, url: Url, dest: &Path) -> Result<()> {
        info!("Downloading service from {url} to {}", dest.display());

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Install(format!(
                "download failed with status {status}"
            )));
        }
        let bytes = response.bytes().await?;

        // Atomic write: write to temp file, set permissions, then rename.
        let temp_path = dest.with_extension("download");
        tokio::fs::write(&temp_path, &bytes)
            .await
            .map_err(|e| Error::Install(format!("could not write {}: {e}", temp_path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o755))
                .await
                .map_err(|e| Error::Install(format!("could not mark executable: {e}")))?;
        }

        tokio::fs::rename(&temp_path, dest)
            .await
            .map_err(|e| Error::Install(format!("could not move into place: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl ServiceInstaller for ReleaseInstaller {
    /// Returns the path of the service executable, downloading it if absent.
    ///
    /// An executable already on disk is trusted as-is; version upgrades are
    /// the daemon's own concern once it runs.
    async fn ensure_binary(&self, state_dir: &Path) -> Result<PathBuf> {
        let exec_path = state_dir.join(BINARY_NAME);
        if exec_path.is_file() {
            return Ok(exec_path);
        }

        let url = self
            .release_base
            .join(artifact_name()?)
            .map_err(|e| Error::Install(format!("invalid release URL: {e}")))?;
        self.download(url, &exec_path).await?;

        Ok(exec_path)
    }
}
