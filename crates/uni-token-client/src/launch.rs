//! Service launcher: the elevated first-run setup.
//!
//! The client never daemonizes the service itself. It runs the binary's
//! `sudo setup` subcommand, which asks the OS for privilege elevation,
//! installs the service for persistent background operation, writes the
//! descriptor file, and exits. Stdio stays attached to the caller's terminal
//! because the step is interactive (elevation prompt, consent UI hand-off).

use std::path::Path;

use async_trait::async_trait;
use log::info;
use tokio::process::Command;

use crate::bootstrap::ServiceLauncher;
use crate::error::{Error, Result};

/// Argument sequence for the interactive first-run setup.
const SETUP_ARGS: [&str; 2] = ["sudo", "setup"];

/// Production launcher: runs `<exec> sudo setup` and waits for it to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetupLauncher;

impl SetupLauncher {
    /// Creates a launcher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ServiceLauncher for SetupLauncher {
    /// Runs the setup subprocess to completion.
    ///
    /// Blocks (in the async sense) until the subprocess exits; the setup step
    /// encapsulates all user interaction, so there is no timeout here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Launch`] if the subprocess cannot be spawned or exits
    /// with a non-zero status. The launcher itself never retries: repeating
    /// an interactive elevation prompt without the user asking for it is
    /// worse than failing loudly.
    async fn start_and_wait(&self, exec_path: &Path) -> Result<()> {
        info!("Running service setup: {} sudo setup", exec_path.display());

        let status = Command::new(exec_path)
            .args(SETUP_ARGS)
            .status()
            .await
            .map_err(|e| Error::Launch(format!("could not run {}: {e}", exec_path.display())))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Launch(format!("setup exited with {status}")))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_and_wait_succeeds_on_zero_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "service", "#!/bin/sh\nexit 0\n");

        SetupLauncher::new().start_and_wait(&script).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_and_wait_fails_on_nonzero_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "service", "#!/bin/sh\nexit 3\n");

        let result = SetupLauncher::new().start_and_wait(&script).await;

        assert!(matches!(result, Err(Error::Launch(_))));
    }

    #[tokio::test]
    async fn test_start_and_wait_fails_when_binary_missing() {
        let tmp = tempfile::tempdir().unwrap();

        let result = SetupLauncher::new()
            .start_and_wait(&tmp.path().join("missing"))
            .await;

        assert!(matches!(result, Err(Error::Launch(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_setup_receives_expected_arguments() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(
            tmp.path(),
            "service",
            "#!/bin/sh\n[ \"$1\" = sudo ] && [ \"$2\" = setup ] && exit 0\nexit 1\n",
        );

        SetupLauncher::new().start_and_wait(&script).await.unwrap();
    }
}
