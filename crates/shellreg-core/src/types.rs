//! Shared value types for ProgIds and shell verbs

use serde::{Deserialize, Serialize};

/// Registry hive that receives the class registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hive {
    /// HKEY_CURRENT_USER (per-user, no elevation required)
    #[default]
    CurrentUser,
    /// HKEY_LOCAL_MACHINE (machine-wide)
    LocalMachine,
    /// HKEY_CLASSES_ROOT (merged view)
    ClassesRoot,
}

impl Hive {
    /// Short name used when printing key paths
    pub fn abbrev(&self) -> &'static str {
        match self {
            Self::CurrentUser => "HKCU",
            Self::LocalMachine => "HKLM",
            Self::ClassesRoot => "HKCR",
        }
    }

    /// Path of the classes namespace relative to the hive root
    pub fn classes_prefix(&self) -> &'static str {
        match self {
            Self::CurrentUser | Self::LocalMachine => r"Software\Classes",
            Self::ClassesRoot => "",
        }
    }
}

impl std::fmt::Display for Hive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CurrentUser => write!(f, "current-user"),
            Self::LocalMachine => write!(f, "local-machine"),
            Self::ClassesRoot => write!(f, "classes-root"),
        }
    }
}

/// Shell verb exposed on a ProgId's context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    #[default]
    Open,
    OpenNew,
    Print,
    Explore,
    Find,
    OpenAs,
    Properties,
    Edit,
    Preview,
}

impl Verb {
    /// All verbs the shell recognises, in declaration order
    pub const ALL: [Verb; 9] = [
        Verb::Open,
        Verb::OpenNew,
        Verb::Print,
        Verb::Explore,
        Verb::Find,
        Verb::OpenAs,
        Verb::Properties,
        Verb::Edit,
        Verb::Preview,
    ];

    /// Registry key name of the verb
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::OpenNew => "opennew",
            Self::Print => "print",
            Self::Explore => "explore",
            Self::Find => "find",
            Self::OpenAs => "openas",
            Self::Properties => "properties",
            Self::Edit => "edit",
            Self::Preview => "preview",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown shell verb '{}'", s))
    }
}

/// Squirrel packaging mode
///
/// Squirrel installs each version into its own `app-x.y.z` directory and
/// keeps a stable launcher one level up. Commands registered in this mode
/// point at the launcher and pass `--process-start-args` through to the
/// versioned executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SquirrelMode {
    /// `true` uses `{app_name}.exe` as the launcher, `false` disables squirrel mode
    Enabled(bool),
    /// Explicit launcher executable name
    Executable(String),
}

impl Default for SquirrelMode {
    fn default() -> Self {
        Self::Enabled(false)
    }
}

impl SquirrelMode {
    /// Whether commands should go through the squirrel launcher
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Enabled(enabled) => *enabled,
            Self::Executable(name) => !name.is_empty(),
        }
    }

    /// Launcher executable name, falling back to `{app_name}.exe`
    pub fn launcher(&self, app_name: &str) -> Option<String> {
        match self {
            Self::Enabled(true) => Some(format!("{}.exe", app_name)),
            Self::Executable(name) if !name.is_empty() => Some(name.clone()),
            _ => None,
        }
    }
}

/// Friendly application name shown in "Open with" lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FriendlyAppName {
    /// `true` resolves to the host application's display name, `false` disables it
    Host(bool),
    /// Literal name
    Named(String),
}

impl FriendlyAppName {
    /// Resolve to the text written to the registry, if any
    pub fn resolve(&self, host_display_name: &str) -> Option<String> {
        match self {
            Self::Host(true) => Some(host_display_name.to_string()),
            Self::Named(name) if !name.is_empty() => Some(name.clone()),
            _ => None,
        }
    }
}

/// A file extension claimed by a ProgId
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExtension {
    /// Extension without the leading dot
    pub name: String,
    /// Whether the ProgId becomes the extension's default handler
    #[serde(default)]
    pub set_default: bool,
}

impl FileExtension {
    /// Create an extension entry, stripping a leading dot
    pub fn new(name: impl AsRef<str>, set_default: bool) -> Self {
        Self {
            name: name.as_ref().trim_start_matches('.').to_string(),
            set_default,
        }
    }
}

/// Outcome of an install or uninstall that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallOutcome {
    /// All registry writes were applied
    Applied,
    /// Skipped because the running platform has no registry
    NotApplicable,
}

impl std::fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::NotApplicable => write!(f, "not applicable"),
        }
    }
}
