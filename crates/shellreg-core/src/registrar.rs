//! Registrar - the ordered set of ProgIds an application declares
//!
//! Bulk operations attempt every ProgId, even after one fails, and report
//! each entry's outcome in registration order. Writes that succeeded are
//! never rolled back.

use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::host::HostApp;
use crate::keystore::KeyStore;
use crate::plan::InstallPlan;
use crate::progid::ProgId;
use crate::startup::StartupEvent;
use crate::types::InstallOutcome;

/// Bulk operation a report describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Install,
    Uninstall,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// Result of one ProgId within a bulk operation
#[derive(Debug)]
pub struct ProgIdResult {
    pub id: String,
    pub result: Result<InstallOutcome>,
}

impl ProgIdResult {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&Error> {
        self.result.as_ref().err()
    }
}

/// Per-ProgId results of a bulk operation, in registration order
#[derive(Debug)]
pub struct RegistrationReport {
    pub operation: Operation,
    pub entries: Vec<ProgIdResult>,
}

impl RegistrationReport {
    /// Check if every entry succeeded (or was not applicable)
    pub fn is_success(&self) -> bool {
        self.entries.iter().all(ProgIdResult::is_success)
    }

    /// First failure in registration order
    pub fn first_error(&self) -> Option<(&str, &Error)> {
        self.entries
            .iter()
            .find_map(|entry| entry.error().map(|e| (entry.id.as_str(), e)))
    }

    pub fn applied_count(&self) -> usize {
        self.count(InstallOutcome::Applied)
    }

    pub fn not_applicable_count(&self) -> usize {
        self.count(InstallOutcome::NotApplicable)
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_success()).count()
    }

    /// Convert into a single result carrying the first error
    pub fn into_result(self) -> Result<Vec<InstallOutcome>> {
        self.entries.into_iter().map(|entry| entry.result).collect()
    }

    fn count(&self, outcome: InstallOutcome) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(o) if o == outcome))
            .count()
    }
}

/// Ordered collection of ProgIds
#[derive(Debug, Clone, Default)]
pub struct Registrar {
    prog_ids: Vec<ProgId>,
}

impl Registrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a ProgId; duplicates are not detected
    pub fn add(&mut self, prog_id: ProgId) -> &mut Self {
        self.prog_ids.push(prog_id);
        self
    }

    pub fn prog_ids(&self) -> &[ProgId] {
        &self.prog_ids
    }

    pub fn get(&self, id: &str) -> Option<&ProgId> {
        self.prog_ids.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.prog_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prog_ids.is_empty()
    }

    /// Install plans of every ProgId, in registration order
    pub fn plan_all(&self, host: &HostApp) -> Result<Vec<InstallPlan>> {
        self.prog_ids.iter().map(|p| p.plan(host)).collect()
    }

    /// Install every ProgId concurrently
    pub async fn install_all(&self, store: &dyn KeyStore, host: &HostApp) -> RegistrationReport {
        let entries = join_all(self.prog_ids.iter().map(|prog| async move {
            ProgIdResult {
                id: prog.id().to_string(),
                result: prog.install(store, host).await,
            }
        }))
        .await;
        Self::report(Operation::Install, entries, store)
    }

    /// Uninstall every ProgId concurrently
    pub async fn uninstall_all(&self, store: &dyn KeyStore, host: &HostApp) -> RegistrationReport {
        let entries = join_all(self.prog_ids.iter().map(|prog| async move {
            ProgIdResult {
                id: prog.id().to_string(),
                result: prog.uninstall(store, host).await,
            }
        }))
        .await;
        Self::report(Operation::Uninstall, entries, store)
    }

    /// Installer lifecycle flag in the user arguments, if any
    pub fn detect_startup_event<I, S>(args: I) -> Option<StartupEvent>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StartupEvent::detect(args)
    }

    /// Apply the registrations an installer lifecycle event calls for
    ///
    /// Install and update register everything, uninstall removes
    /// everything, obsolete does nothing and returns `None`.
    pub async fn handle_startup_event(
        &self,
        event: StartupEvent,
        store: &dyn KeyStore,
        host: &HostApp,
    ) -> Option<RegistrationReport> {
        info!("Handling startup event {}", event);
        match event {
            StartupEvent::Install | StartupEvent::Updated => {
                Some(self.install_all(store, host).await)
            }
            StartupEvent::Uninstall => Some(self.uninstall_all(store, host).await),
            StartupEvent::Obsolete => None,
        }
    }

    fn report(
        operation: Operation,
        entries: Vec<ProgIdResult>,
        store: &dyn KeyStore,
    ) -> RegistrationReport {
        for entry in &entries {
            if let Err(e) = &entry.result {
                warn!("Failed to {} {}: {}", operation, entry.id, e);
            }
        }
        let report = RegistrationReport {
            operation,
            entries,
        };
        info!(
            "{} via {}: {} applied, {} not applicable, {} failed",
            operation,
            store.name(),
            report.applied_count(),
            report.not_applicable_count(),
            report.failed_count()
        );
        report
    }
}
