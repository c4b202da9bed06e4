//! Bootstrap orchestration: detect a running service or bring one up.
//!
//! The sequence is a small state machine:
//!
//! ```text
//! START --probe ok--------------------------------> READY
//! START --probe fails--> INSTALLING --> LAUNCHING --probe ok--> READY
//!                                                  --probe fails--> FAILED
//! ```
//!
//! There is no retry or backoff between the install and a second launch
//! attempt; the setup step already encapsulates user interaction and must not
//! be repeated silently. A caller re-running the whole bootstrap is the only
//! recovery path from `FAILED`.
//!
//! Two client processes racing to install and launch the same daemon are not
//! coordinated here. The daemon's installation is idempotent on its side, and
//! the client only ever reads the descriptor file, so the race is benign and
//! left as-is rather than papered over with a lock file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;
use url::Url;

use crate::discovery::FileLocator;
use crate::error::{Error, Result};
use crate::install::ReleaseInstaller;
use crate::launch::SetupLauncher;

/// Finds a live, trusted service endpoint.
#[async_trait]
pub trait ServiceLocator: Send + Sync {
    /// Returns the service URL if one is on record and confirmed live.
    ///
    /// `None` covers every non-fatal miss: no descriptor, unreadable
    /// descriptor, unreachable endpoint, or an endpoint that is not a
    /// UniToken service.
    async fn detect(&self, state_dir: &Path) -> Option<Url>;
}

/// Makes the service executable available on disk.
#[async_trait]
pub trait ServiceInstaller: Send + Sync {
    /// Returns the executable path, downloading the binary if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Install`] when the platform is unrecognized, the
    /// download fails, or the binary cannot be written.
    async fn ensure_binary(&self, state_dir: &Path) -> Result<PathBuf>;
}

/// Runs the service's first-run setup to completion.
#[async_trait]
pub trait ServiceLauncher: Send + Sync {
    /// Runs the setup subprocess and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Launch`] when the subprocess cannot be spawned or
    /// exits with a non-zero status.
    async fn start_and_wait(&self, exec_path: &Path) -> Result<()>;
}

/// Composes a locator, installer, and launcher into the bootstrap sequence.
///
/// The default composition uses the production components. Tests (and
/// embedders with unusual deployment needs) can inject their own
/// implementations via [`Bootstrapper::with_components`] instead of touching
/// real subprocesses or the network.
pub struct Bootstrapper {
    locator: Box<dyn ServiceLocator>,
    installer: Box<dyn ServiceInstaller>,
    launcher: Box<dyn ServiceLauncher>,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self {
            locator: Box::new(FileLocator::new()),
            installer: Box::new(ReleaseInstaller::new()),
            launcher: Box::new(SetupLauncher::new()),
        }
    }
}

impl Bootstrapper {
    /// Creates a bootstrapper with the production components.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bootstrapper from explicit components.
    #[must_use]
    pub fn with_components(
        locator: Box<dyn ServiceLocator>,
        installer: Box<dyn ServiceInstaller>,
        launcher: Box<dyn ServiceLauncher>,
    ) -> Self {
        Self {
            locator,
            installer,
            launcher,
        }
    }

    /// Ensures a live service and returns its base URL.
    ///
    /// Probes first (cheap, no side effects); only on a miss does it install
    /// the binary, run the elevated setup, and probe once more.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Install`] and [`Error::Launch`] from the
    /// respective steps, and returns [`Error::Bootstrap`] when the service
    /// still cannot be confirmed live after a successful launch.
    pub async fn ensure_service(&self, state_dir: &Path) -> Result<Url> {
        if let Some(url) = self.locator.detect(state_dir).await {
            return Ok(url);
        }

        info!("No running UniToken service found, setting one up");
        let exec_path = self.installer.ensure_binary(state_dir).await?;
        self.launcher.start_and_wait(&exec_path).await?;

        self.locator.detect(state_dir).await.ok_or(Error::Bootstrap)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    fn service_url() -> Url {
        Url::parse("http://127.0.0.1:18760/").unwrap()
    }

    /// Locator that reports live only once `live` has been flipped.
    struct ScriptedLocator {
        live: Arc<AtomicBool>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ServiceLocator for ScriptedLocator {
        async fn detect(&self, _state_dir: &Path) -> Option<Url> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.live.load(Ordering::SeqCst).then(service_url)
        }
    }

    struct FakeInstaller {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ServiceInstaller for FakeInstaller {
        async fn ensure_binary(&self, state_dir: &Path) -> Result<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Install("unsupported platform: test".to_string()));
            }
            Ok(state_dir.join("service"))
        }
    }

    /// Launcher that optionally flips the locator's `live` flag, standing in
    /// for a setup run that publishes a fresh descriptor.
    struct FakeLauncher {
        calls: Arc<AtomicUsize>,
        brings_up: Option<Arc<AtomicBool>>,
        fail: bool,
    }

    #[async_trait]
    impl ServiceLauncher for FakeLauncher {
        async fn start_and_wait(&self, _exec_path: &Path) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Launch("setup exited with exit status: 1".to_string()));
            }
            if let Some(live) = &self.brings_up {
                live.store(true, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    struct Harness {
        bootstrapper: Bootstrapper,
        locator_calls: Arc<AtomicUsize>,
        installer_calls: Arc<AtomicUsize>,
        launcher_calls: Arc<AtomicUsize>,
    }

    fn harness(already_live: bool, launch_brings_up: bool, fail_install: bool) -> Harness {
        let live = Arc::new(AtomicBool::new(already_live));
        let locator_calls = Arc::new(AtomicUsize::new(0));
        let installer_calls = Arc::new(AtomicUsize::new(0));
        let launcher_calls = Arc::new(AtomicUsize::new(0));

        let bootstrapper = Bootstrapper::with_components(
            Box::new(ScriptedLocator {
                live: Arc::clone(&live),
                calls: Arc::clone(&locator_calls),
            }),
            Box::new(FakeInstaller {
                calls: Arc::clone(&installer_calls),
                fail: fail_install,
            }),
            Box::new(FakeLauncher {
                calls: Arc::clone(&launcher_calls),
                brings_up: launch_brings_up.then(|| Arc::clone(&live)),
                fail: false,
            }),
        );

        Harness {
            bootstrapper,
            locator_calls,
            installer_calls,
            launcher_calls,
        }
    }

    #[tokio::test]
    async fn test_live_service_short_circuits_install_and_launch() {
        let h = harness(true, false, false);
        let tmp = tempfile::tempdir().unwrap();

        let url = h.bootstrapper.ensure_service(tmp.path()).await.unwrap();

        assert_eq!(url, service_url());
        assert_eq!(h.locator_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.installer_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.launcher_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cold_start_installs_launches_and_reprobes() {
        let h = harness(false, true, false);
        let tmp = tempfile::tempdir().unwrap();

        let url = h.bootstrapper.ensure_service(tmp.path()).await.unwrap();

        assert_eq!(url, service_url());
        assert_eq!(h.locator_calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.installer_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.launcher_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dead_service_after_launch_is_terminal() {
        let h = harness(false, false, false);
        let tmp = tempfile::tempdir().unwrap();

        let result = h.bootstrapper.ensure_service(tmp.path()).await;

        assert!(matches!(result, Err(Error::Bootstrap)));
        // Exactly one re-probe after launch, no retry loop.
        assert_eq!(h.locator_calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.launcher_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_install_failure_skips_launch() {
        let h = harness(false, false, true);
        let tmp = tempfile::tempdir().unwrap();

        let result = h.bootstrapper.ensure_service(tmp.path()).await;

        assert!(matches!(result, Err(Error::Install(_))));
        assert_eq!(h.launcher_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_launch_failure_propagates() {
        let live = Arc::new(AtomicBool::new(false));
        let bootstrapper = Bootstrapper::with_components(
            Box::new(ScriptedLocator {
                live,
                calls: Arc::new(AtomicUsize::new(0)),
            }),
            Box::new(FakeInstaller {
                calls: Arc::new(AtomicUsize::new(0)),
                fail: false,
            }),
            Box::new(FakeLauncher {
                calls: Arc::new(AtomicUsize::new(0)),
                brings_up: None,
                fail: true,
            }),
        );
        let tmp = tempfile::tempdir().unwrap();

        let result = bootstrapper.ensure_service(tmp.path()).await;

        assert!(matches!(result, Err(Error::Launch(_))));
    }

    /// End-to-end cold start against real components: the "release endpoint"
    /// serves a shell script which, when run as the setup step, publishes a
    /// descriptor pointing at a mock daemon.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_cold_start_with_real_components() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let daemon = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"__uni_token": true})),
            )
            .mount(&daemon)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let daemon_url = format!("{}/", daemon.uri());
        let descriptor_path = tmp.path().join("service.json");
        let setup_script = format!(
            "#!/bin/sh\nprintf '{{\"url\": \"{daemon_url}\"}}' > {}\n",
            descriptor_path.display()
        );

        let releases = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(setup_script.into_bytes()))
            .mount(&releases)
            .await;

        let release_base = Url::parse(&format!("{}/release/", releases.uri())).unwrap();
        let bootstrapper = Bootstrapper::with_components(
            Box::new(FileLocator::new()),
            Box::new(ReleaseInstaller::new().with_release_base(release_base)),
            Box::new(SetupLauncher::new()),
        );

        let url = bootstrapper.ensure_service(tmp.path()).await.unwrap();

        assert_eq!(String::from(url), daemon_url);
    }
}
