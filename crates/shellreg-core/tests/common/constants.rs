//! Test constants for shellreg-core tests

#![allow(dead_code)]

/// Application name used by most fixtures
pub const APP_NAME: &str = "Foo";

/// Display name of the fixture host
pub const APP_DISPLAY_NAME: &str = "Foo Editor";

/// Executable path of a plain (non-squirrel) install
pub const PLAIN_EXE: &str = r"C:\Program Files\Foo\Foo.exe";

/// Executable path inside a squirrel versioned app directory
pub const SQUIRREL_EXE: &str = r"C:\Users\me\AppData\Local\Foo\app-1.2.0\Foo.exe";

/// Squirrel launcher next to the versioned app directories
pub const SQUIRREL_LAUNCHER: &str = r"C:\Users\me\AppData\Local\Foo\Foo.exe";

/// Registry path of the classes namespace under HKCU
pub const HKCU_CLASSES: &str = r"HKCU\Software\Classes";
