//! Installer lifecycle events
//!
//! Squirrel launches the application with a single lifecycle flag as its
//! first argument (`--squirrel-install 1.2.0`, `--squirrel-uninstall`...)
//! instead of a normal start. Detecting the flag lets the application
//! register or unregister itself and exit.

use serde::Serialize;

/// Lifecycle event passed on the command line by the installer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartupEvent {
    /// First install
    Install,
    /// A new version was installed over an existing one
    Updated,
    /// The application is being removed
    Uninstall,
    /// This version has been superseded and is about to be deleted
    Obsolete,
}

impl StartupEvent {
    /// All events with their flags
    pub const ALL: [StartupEvent; 4] = [
        StartupEvent::Install,
        StartupEvent::Updated,
        StartupEvent::Uninstall,
        StartupEvent::Obsolete,
    ];

    /// Command-line flag carrying the event
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Install => "--squirrel-install",
            Self::Updated => "--squirrel-updated",
            Self::Uninstall => "--squirrel-uninstall",
            Self::Obsolete => "--squirrel-obsolete",
        }
    }

    /// Event for an exact flag
    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.flag() == flag)
    }

    /// Event carried by the first user argument (program name excluded)
    pub fn detect<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        args.into_iter()
            .next()
            .and_then(|first| Self::from_flag(first.as_ref()))
    }

    /// Event carried by the running process's arguments
    pub fn from_env() -> Option<Self> {
        Self::detect(std::env::args().skip(1))
    }

    /// Whether the event should write registrations (install/update)
    pub fn registers(&self) -> bool {
        matches!(self, Self::Install | Self::Updated)
    }
}

impl std::fmt::Display for StartupEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_each_flag() {
        for event in StartupEvent::ALL {
            assert_eq!(StartupEvent::detect([event.flag(), "1.2.0"]), Some(event));
        }
    }

    #[test]
    fn test_detect_ignores_other_positions_and_flags() {
        assert_eq!(StartupEvent::detect(["file.foo", "--squirrel-install"]), None);
        assert_eq!(StartupEvent::detect(["--squirrel-firstrun"]), None);
        assert_eq!(StartupEvent::detect(Vec::<String>::new()), None);
    }

    #[test]
    fn test_registers() {
        assert!(StartupEvent::Install.registers());
        assert!(StartupEvent::Updated.registers());
        assert!(!StartupEvent::Uninstall.registers());
    }
}
