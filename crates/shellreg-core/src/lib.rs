//! # shellreg-core
//!
//! Declarative Windows shell registration providing:
//! - ProgId definitions with file extensions and shell verbs
//! - Staged install/uninstall plans executed against a registry key store
//! - A registrar for bulk registration and installer startup events
//! - Manifest parsing (shellreg.yaml)
//!
//! ```no_run
//! use shellreg_core::{HostApp, MemoryKeyStore, ProgId, ShellOption, Verb};
//!
//! # async fn run() -> shellreg_core::Result<()> {
//! let host = HostApp::current("Foo")?;
//! let prog_id = ProgId::builder()
//!     .prog_ext("doc")
//!     .description("Foo Document")
//!     .extension("foo")
//!     .shell_option(ShellOption::new(Verb::Open).selected(true))
//!     .build(&host)?;
//!
//! let store = MemoryKeyStore::new();
//! prog_id.install(&store, &host).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod keystore;
pub mod plan;
pub mod platform;
pub mod progid;
pub mod registrar;
pub mod shell_option;
pub mod startup;
pub mod types;
pub mod winpath;

pub use config::{LoadedManifest, Manifest};
pub use error::{Error, Result};
pub use host::HostApp;
#[cfg(windows)]
pub use keystore::WindowsKeyStore;
pub use keystore::{
    KeyOp, KeyOpKind, KeyPath, KeyStore, KeyStoreError, MemoryKeyStore, RegValue, DEFAULT_VALUE,
};
pub use plan::{InstallPlan, Stage, Task};
pub use platform::{detect_platform, Platform};
pub use progid::{ProgId, ProgIdBuilder};
pub use registrar::{Operation, ProgIdResult, Registrar, RegistrationReport};
pub use shell_option::{ProgBinding, ShellOption, SQUIRREL_START_ARGS};
pub use startup::StartupEvent;
pub use types::{FileExtension, FriendlyAppName, Hive, InstallOutcome, SquirrelMode, Verb};
