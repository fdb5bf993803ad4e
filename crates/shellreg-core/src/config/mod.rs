//! Manifest configuration (`shellreg.yaml`)
//!
//! A manifest declares the application identity and the ProgIds to
//! register. Example:
//!
//! ```yaml
//! app:
//!   name: Foo
//!   display_name: Foo Editor
//!   exe_path: C:\Program Files\Foo\Foo.exe
//! prog_ids:
//!   - prog_ext: doc
//!     description: Foo Document
//!     icon: resources\doc.ico
//!     content_type: application/x-foo
//!     extensions: [foo, { name: foodoc, set_default: true }]
//!     shell:
//!       - verb: open
//!         selected: true
//!       - verb: edit
//!         action: Edit with Foo
//!         args: ["--edit", "%1"]
//! ```

mod loader;

pub use loader::{
    AppConfig, ExtensionEntry, LoadedManifest, Manifest, ProgIdConfig, ShellConfig,
    MANIFEST_FILE_NAMES,
};
