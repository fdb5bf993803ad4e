//! Host application identity
//!
//! Everything a registration needs to know about the application being
//! registered: its name, its display name, where its executable lives and
//! which platform it runs on.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::platform::{detect_platform, Platform};
use crate::winpath;

/// Identity of the application that owns the registrations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostApp {
    /// Application name, the default ProgId `app_name`
    pub name: String,
    /// Human-readable name used when a friendly app name resolves to the host
    pub display_name: String,
    /// Full path of the running executable
    pub exe_path: String,
    /// Platform the registrations would be applied on
    pub platform: Platform,
}

impl HostApp {
    /// Create a host identity with an explicit executable path
    pub fn new(name: impl Into<String>, exe_path: impl Into<String>, platform: Platform) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            exe_path: exe_path.into(),
            platform,
        }
    }

    /// Host identity for the running process
    pub fn current(name: impl Into<String>) -> Result<Self> {
        let exe = std::env::current_exe()?;
        let exe_path = exe
            .to_str()
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("executable path is not valid UTF-8: {}", exe.display()),
                ))
            })?
            .to_string();
        Ok(Self::new(name, exe_path, detect_platform()))
    }

    /// Override the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Directory containing the executable
    pub fn exe_dir(&self) -> &str {
        winpath::parent(&self.exe_path)
    }

    /// Resolve a resource path: absolute paths as-is, relative ones against [`exe_dir`](Self::exe_dir)
    pub fn resolve_path(&self, path: &str) -> String {
        if winpath::is_absolute(path) {
            path.to_string()
        } else {
            winpath::join(self.exe_dir(), path)
        }
    }

    /// Path of a squirrel launcher one level above the versioned executable directory
    pub fn squirrel_launcher(&self, launcher: &str) -> String {
        winpath::join(self.exe_dir(), &format!("..\\{}", launcher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostApp {
        HostApp::new("Foo", r"C:\Users\me\AppData\Local\Foo\app-1.2.0\Foo.exe", Platform::Windows)
    }

    #[test]
    fn test_display_name_defaults_to_name() {
        assert_eq!(host().display_name, "Foo");
        assert_eq!(host().with_display_name("Foo Editor").display_name, "Foo Editor");
    }

    #[test]
    fn test_resolve_path() {
        let host = host();
        assert_eq!(host.resolve_path(r"D:\icons\foo.ico"), r"D:\icons\foo.ico");
        assert_eq!(
            host.resolve_path(r"resources\foo.ico"),
            r"C:\Users\me\AppData\Local\Foo\app-1.2.0\resources\foo.ico"
        );
    }

    #[test]
    fn test_squirrel_launcher_is_one_level_up() {
        assert_eq!(
            host().squirrel_launcher("Foo.exe"),
            r"C:\Users\me\AppData\Local\Foo\Foo.exe"
        );
    }
}
