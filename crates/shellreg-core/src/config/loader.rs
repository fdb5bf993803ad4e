//! Manifest file loading and parsing

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::host::HostApp;
use crate::platform::detect_platform;
use crate::progid::ProgId;
use crate::registrar::Registrar;
use crate::shell_option::ShellOption;
use crate::types::{FileExtension, FriendlyAppName, Hive, SquirrelMode, Verb};
use crate::winpath;

/// Manifest file names to search for
pub const MANIFEST_FILE_NAMES: &[&str] = &["shellreg.yaml", "shellreg.yml"];

/// Application identity section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name, the default ProgId name
    pub name: String,

    /// Name shown when a friendly app name resolves to the host
    #[serde(default)]
    pub display_name: Option<String>,

    /// Absolute path of the executable the shell verbs launch
    #[serde(default)]
    pub exe_path: Option<String>,
}

/// Extension entry: a bare name or a table with `set_default`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtensionEntry {
    Name(String),
    Full(FileExtension),
}

impl From<ExtensionEntry> for FileExtension {
    fn from(entry: ExtensionEntry) -> Self {
        match entry {
            ExtensionEntry::Name(name) => FileExtension::new(name, false),
            ExtensionEntry::Full(ext) => FileExtension::new(&ext.name, ext.set_default),
        }
    }
}

/// One shell verb
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub verb: Verb,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub friendly_app_name: Option<FriendlyAppName>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub squirrel: Option<SquirrelMode>,
}

impl ShellConfig {
    pub fn to_shell_option(&self) -> ShellOption {
        let mut option = ShellOption::new(self.verb).selected(self.selected);
        if let Some(action) = &self.action {
            option = option.with_action(action.clone());
        }
        if let Some(command) = &self.command {
            option = option.with_command(command.clone());
        }
        if let Some(args) = &self.args {
            option = option.with_args(args.iter().cloned());
        }
        if let Some(icon) = &self.icon {
            option = option.with_icon(icon.clone());
        }
        if let Some(name) = &self.friendly_app_name {
            option = option.with_friendly_app_name(name.clone());
        }
        if let Some(squirrel) = &self.squirrel {
            option = option.with_squirrel(squirrel.clone());
        }
        option
    }
}

/// One ProgId
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgIdConfig {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub prog_ext: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub perceived_type: Option<String>,
    #[serde(default)]
    pub hive: Hive,
    #[serde(default)]
    pub squirrel: SquirrelMode,
    #[serde(default)]
    pub friendly_app_name: Option<FriendlyAppName>,
    #[serde(default)]
    pub set_default: bool,
    #[serde(default)]
    pub extensions: Vec<ExtensionEntry>,
    #[serde(default)]
    pub shell: Vec<ShellConfig>,
}

impl ProgIdConfig {
    pub fn build(&self, host: &HostApp) -> Result<ProgId> {
        let mut builder = ProgId::builder()
            .hive(self.hive)
            .squirrel(self.squirrel.clone())
            .set_default(self.set_default);
        if let Some(app_name) = &self.app_name {
            builder = builder.app_name(app_name.clone());
        }
        if let Some(prog_ext) = &self.prog_ext {
            builder = builder.prog_ext(prog_ext.clone());
        }
        if let Some(description) = &self.description {
            builder = builder.description(description.clone());
        }
        if let Some(icon) = &self.icon {
            builder = builder.icon(icon.clone());
        }
        if let Some(content_type) = &self.content_type {
            builder = builder.content_type(content_type.clone());
        }
        if let Some(perceived_type) = &self.perceived_type {
            builder = builder.perceived_type(perceived_type.clone());
        }
        if let Some(name) = &self.friendly_app_name {
            builder = builder.friendly_app_name(name.clone());
        }
        for entry in &self.extensions {
            builder = builder.file_extension(entry.clone().into());
        }
        builder
            .shell_options(self.shell.iter().map(ShellConfig::to_shell_option))
            .build(host)
    }
}

/// Parsed `shellreg.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub app: AppConfig,
    #[serde(default)]
    pub prog_ids: Vec<ProgIdConfig>,
}

impl Manifest {
    /// Parse and validate manifest YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml_ng::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.app.name.trim().is_empty() {
            return Err(Error::invalid_manifest("app.name must not be empty"));
        }
        if self.prog_ids.is_empty() {
            return Err(Error::invalid_manifest("no prog_ids declared"));
        }
        Ok(())
    }

    /// Host identity described by the `app` section
    ///
    /// `app.exe_path` is required: the process reading the manifest is not
    /// the application being registered.
    pub fn host(&self) -> Result<HostApp> {
        let exe_path = match self.app.exe_path.as_deref().map(str::trim) {
            Some(exe) if winpath::is_absolute(exe) => exe,
            Some(exe) if !exe.is_empty() => {
                return Err(Error::invalid_manifest(format!(
                    "app.exe_path must be an absolute Windows path, got '{}'",
                    exe
                )))
            }
            _ => return Err(Error::invalid_manifest("app.exe_path is required")),
        };
        let host = HostApp::new(self.app.name.clone(), exe_path, detect_platform());
        Ok(match &self.app.display_name {
            Some(display_name) => host.with_display_name(display_name.clone()),
            None => host,
        })
    }

    /// Build every declared ProgId into a registrar, in manifest order
    pub fn registrar(&self, host: &HostApp) -> Result<Registrar> {
        let mut registrar = Registrar::new();
        for (index, config) in self.prog_ids.iter().enumerate() {
            let prog_id = config.build(host).map_err(|e| {
                Error::invalid_manifest(format!("prog_ids[{}]: {}", index, e))
            })?;
            registrar.add(prog_id);
        }
        Ok(registrar)
    }
}

/// Manifest together with where it was read from
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub path: Utf8PathBuf,
}

impl LoadedManifest {
    /// Load the manifest from `path`, or search the working directory
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_owned(),
            None => Self::find_manifest(Utf8Path::new("."))?,
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::manifest_not_found(path.as_str())
            } else {
                Error::Io(e)
            }
        })?;
        debug!("Loaded manifest from {}", path);

        Ok(Self {
            manifest: Manifest::from_yaml(&content)?,
            path,
        })
    }

    /// First manifest file name that exists in `dir`
    pub fn find_manifest(dir: &Utf8Path) -> Result<Utf8PathBuf> {
        MANIFEST_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.exists())
            .ok_or_else(|| Error::manifest_not_found(dir.join(MANIFEST_FILE_NAMES[0]).as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
app:
  name: Foo
prog_ids:
  - prog_ext: doc
"#;

    #[test]
    fn test_minimal_manifest_defaults() {
        let manifest = Manifest::from_yaml(MINIMAL).unwrap();
        let prog = &manifest.prog_ids[0];
        assert_eq!(prog.hive, Hive::CurrentUser);
        assert_eq!(prog.squirrel, SquirrelMode::Enabled(false));
        assert!(prog.shell.is_empty());
        assert!(manifest.app.exe_path.is_none());
    }

    #[test]
    fn test_host_requires_exe_path() {
        let manifest = Manifest::from_yaml(MINIMAL).unwrap();
        let err = manifest.host().unwrap_err();
        assert!(matches!(err, Error::InvalidManifest { .. }));
        assert!(err.to_string().contains("app.exe_path is required"));

        let yaml = "app: { name: MyEditor, exe_path: 'bin\\MyEditor.exe' }\nprog_ids: [{ prog_ext: doc }]\n";
        let err = Manifest::from_yaml(yaml).unwrap().host().unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn test_host_uses_declared_executable() {
        let yaml = "app: { name: MyEditor, exe_path: 'C:\\Apps\\MyEditor\\MyEditor.exe' }\nprog_ids: [{ prog_ext: doc }]\n";
        let manifest = Manifest::from_yaml(yaml).unwrap();
        let host = manifest.host().unwrap();
        let registrar = manifest.registrar(&host).unwrap();

        let open = &registrar.prog_ids()[0].shell_options()[0];
        assert_eq!(
            open.command_line(&host).unwrap(),
            r#""C:\Apps\MyEditor\MyEditor.exe" "%1""#
        );
    }

    #[test]
    fn test_empty_prog_ids_rejected() {
        let err = Manifest::from_yaml("app:\n  name: Foo\n").unwrap_err();
        assert!(err.to_string().contains("no prog_ids"));
    }

    #[test]
    fn test_extension_entries() {
        let yaml = r#"
app: { name: Foo }
prog_ids:
  - extensions:
      - .foo
      - { name: bar, set_default: true }
"#;
        let manifest = Manifest::from_yaml(yaml).unwrap();
        let exts: Vec<FileExtension> = manifest.prog_ids[0]
            .extensions
            .iter()
            .cloned()
            .map(Into::into)
            .collect();
        assert_eq!(exts[0], FileExtension::new("foo", false));
        assert_eq!(exts[1], FileExtension::new("bar", true));
    }

    #[test]
    fn test_unknown_verb_is_a_parse_error() {
        let yaml = r#"
app: { name: Foo }
prog_ids:
  - shell:
      - verb: launch
"#;
        assert!(matches!(
            Manifest::from_yaml(yaml).unwrap_err(),
            Error::YamlParse(_)
        ));
    }

    #[test]
    fn test_shell_config_to_option() {
        let config = ShellConfig {
            verb: Verb::Edit,
            action: Some("Edit with Foo".into()),
            args: Some(vec!["--edit".into(), "%1".into()]),
            selected: true,
            ..Default::default()
        };
        let option = config.to_shell_option();
        assert_eq!(option.verb(), Verb::Edit);
        assert_eq!(option.action(), Some("Edit with Foo"));
        assert_eq!(option.args(), ["--edit", "%1"]);
        assert!(option.is_selected());
        assert!(option.squirrel().is_none());
    }
}
