//! Host and ProgId fixtures

#![allow(dead_code)]

use shellreg_core::{
    HostApp, KeyPath, Platform, ProgId, ShellOption, SquirrelMode, Verb,
};

use super::constants::*;

/// Windows host with a plain install layout
pub fn windows_host() -> HostApp {
    HostApp::new(APP_NAME, PLAIN_EXE, Platform::Windows).with_display_name(APP_DISPLAY_NAME)
}

/// Windows host running from a squirrel versioned directory
pub fn squirrel_host() -> HostApp {
    HostApp::new(APP_NAME, SQUIRREL_EXE, Platform::Windows).with_display_name(APP_DISPLAY_NAME)
}

/// Same install layout on a platform without a registry
pub fn linux_host() -> HostApp {
    HostApp::new(APP_NAME, PLAIN_EXE, Platform::Linux)
}

/// `Foo.doc` claiming `.foo`, with the synthesized open verb
pub fn foo_doc(host: &HostApp) -> ProgId {
    ProgId::builder()
        .prog_ext("doc")
        .description("Foo Document")
        .extension("foo")
        .build(host)
        .unwrap()
}

/// `Foo.doc` with icon, content type, two verbs and a default extension
pub fn full_foo_doc(host: &HostApp) -> ProgId {
    ProgId::builder()
        .prog_ext("doc")
        .description("Foo Document")
        .icon(r"resources\doc.ico")
        .content_type("application/x-foo")
        .perceived_type("document")
        .extension(".foo")
        .default_extension("foodoc")
        .shell_option(ShellOption::new(Verb::Open).selected(true))
        .shell_option(
            ShellOption::new(Verb::Edit)
                .with_action("Edit with Foo")
                .with_args(["--edit", "%1"]),
        )
        .build(host)
        .unwrap()
}

/// ProgId installed through squirrel's launcher
pub fn squirrel_foo(host: &HostApp) -> ProgId {
    ProgId::builder()
        .prog_ext("doc")
        .squirrel(SquirrelMode::Enabled(true))
        .extension("foo")
        .build(host)
        .unwrap()
}

/// Key path under HKCU classes
pub fn classes_key(name: &str) -> KeyPath {
    KeyPath::classes(Default::default(), name)
}
