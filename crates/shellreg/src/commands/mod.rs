//! CLI command implementations

pub mod install;
pub mod plan;
pub mod startup;
pub mod uninstall;
pub mod validate;

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use shellreg_core::{
    HostApp, KeyStore, LoadedManifest, MemoryKeyStore, Platform, Registrar, RegistrationReport,
};
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::output;

/// Manifest, host and registrar resolved for one command
pub struct Session {
    pub manifest: LoadedManifest,
    pub host: HostApp,
    pub registrar: Registrar,
}

impl Session {
    /// Load the manifest and build its ProgIds
    ///
    /// A dry run pretends to be on Windows so the full plan is exercised.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let manifest = LoadedManifest::load(global.config.as_deref())
            .context("Failed to load manifest")?;
        let mut host = manifest.manifest.host()?;
        if global.dry_run {
            host.platform = Platform::Windows;
        }
        let registrar = manifest.manifest.registrar(&host)?;
        debug!(
            "Loaded {} ProgId(s) from {} for {}",
            registrar.len(),
            manifest.path,
            host.exe_path
        );

        Ok(Self {
            manifest,
            host,
            registrar,
        })
    }

    /// Narrow the registrar to a single ProgId
    pub fn only(mut self, id: Option<&str>) -> Result<Self> {
        let Some(id) = id else {
            return Ok(self);
        };
        let prog_id = self
            .registrar
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("ProgId '{}' is not declared in {}", id, self.manifest.path))?;
        let mut registrar = Registrar::new();
        registrar.add(prog_id);
        self.registrar = registrar;
        Ok(self)
    }
}

/// Key store a command writes to
pub enum Target {
    /// In-memory store whose calls are printed afterwards
    Preview(MemoryKeyStore),
    #[cfg(windows)]
    Registry(shellreg_core::WindowsKeyStore),
    /// No registry on this platform; installs report not applicable
    Unsupported(MemoryKeyStore),
}

impl Target {
    pub fn select(dry_run: bool) -> Self {
        if dry_run {
            return Self::Preview(MemoryKeyStore::new());
        }
        #[cfg(windows)]
        {
            Self::Registry(shellreg_core::WindowsKeyStore::new())
        }
        #[cfg(not(windows))]
        {
            Self::Unsupported(MemoryKeyStore::new())
        }
    }

    pub fn store(&self) -> &dyn KeyStore {
        match self {
            Self::Preview(store) | Self::Unsupported(store) => store,
            #[cfg(windows)]
            Self::Registry(store) => store,
        }
    }

    /// Print recorded calls for a dry run
    pub fn finish(&self) {
        match self {
            Self::Preview(store) => output::preview_calls(&store.calls()),
            Self::Unsupported(_) => {
                output::warning("No Windows registry on this platform; nothing was written")
            }
            #[cfg(windows)]
            Self::Registry(_) => {}
        }
    }
}

/// Run `fut`, failing after `seconds`
pub async fn with_timeout<F, T>(seconds: u64, fut: F) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(seconds), fut)
        .await
        .map_err(|_| anyhow!("Timed out after {}s", seconds))
}

/// Print a bulk operation's report and turn failures into an error
pub fn conclude(report: &RegistrationReport, target: &Target) -> Result<()> {
    output::report(report);
    target.finish();

    if let Some((id, err)) = report.first_error() {
        output::error(&format!("{} {}: {}", report.operation, id, err));
        bail!(
            "{} of {} ProgId(s) failed to {}",
            report.failed_count(),
            report.entries.len(),
            report.operation
        );
    }

    output::success(&format!(
        "{} complete: {} applied, {} not applicable",
        report.operation,
        report.applied_count(),
        report.not_applicable_count()
    ));
    Ok(())
}
