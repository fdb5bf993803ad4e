//! ProgIds
//!
//! A [`ProgId`] is a file-type identity registered in the classes
//! namespace: its key, description and icon, the shell verbs it exposes
//! and the file extensions that point at it.
//!
//! Installation order:
//! 1. base key, description, `DefaultIcon`
//! 2. every shell verb (concurrently)
//! 3. every file extension (concurrently)
//!
//! Each verb and each extension writes its own keys strictly in order.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::host::HostApp;
use crate::keystore::{KeyOp, KeyPath, KeyStore, DEFAULT_VALUE};
use crate::plan::{InstallPlan, Stage, Task};
use crate::shell_option::{ProgBinding, ShellOption};
use crate::types::{FileExtension, FriendlyAppName, Hive, InstallOutcome, SquirrelMode};
use crate::winpath;

/// Longest key name the registry accepts
const MAX_KEY_NAME_LEN: usize = 255;

/// A registered file-type identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgId {
    id: String,
    app_name: String,
    description: Option<String>,
    icon: Option<String>,
    content_type: Option<String>,
    perceived_type: Option<String>,
    hive: Hive,
    squirrel: SquirrelMode,
    friendly_app_name: Option<FriendlyAppName>,
    extensions: Vec<FileExtension>,
    shell_options: Vec<ShellOption>,
    base_key: KeyPath,
}

impl ProgId {
    pub fn builder() -> ProgIdBuilder {
        ProgIdBuilder::default()
    }

    /// Registry name: `{app_name}.{prog_ext}` or `{app_name}`
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn perceived_type(&self) -> Option<&str> {
        self.perceived_type.as_deref()
    }

    pub fn hive(&self) -> Hive {
        self.hive
    }

    pub fn squirrel(&self) -> &SquirrelMode {
        &self.squirrel
    }

    pub fn friendly_app_name(&self) -> Option<&FriendlyAppName> {
        self.friendly_app_name.as_ref()
    }

    pub fn extensions(&self) -> &[FileExtension] {
        &self.extensions
    }

    pub fn shell_options(&self) -> &[ShellOption] {
        &self.shell_options
    }

    /// `Classes\{id}` under the selected hive
    pub fn base_key(&self) -> &KeyPath {
        &self.base_key
    }

    /// Every key store call `install` makes, staged
    pub fn plan(&self, host: &HostApp) -> Result<InstallPlan> {
        let mut plan = InstallPlan::new(&self.id);

        let mut ops = vec![KeyOp::create(self.base_key.clone())];
        if let Some(description) = &self.description {
            ops.push(KeyOp::set(
                self.base_key.clone(),
                DEFAULT_VALUE,
                description.clone(),
            ));
        }
        if let Some(icon) = &self.icon {
            let icon_key = self.base_key.join("DefaultIcon");
            ops.push(KeyOp::create(icon_key.clone()));
            ops.push(KeyOp::set(
                icon_key,
                DEFAULT_VALUE,
                winpath::quote(&host.resolve_path(icon)),
            ));
        }
        plan.push(Stage::Sequential(Task::new(self.id.clone(), ops)));

        let shell_tasks = self
            .shell_options
            .iter()
            .map(|option| option.plan(host))
            .collect::<Result<Vec<_>>>()?;
        plan.push(Stage::Concurrent {
            label: "shell".into(),
            tasks: shell_tasks,
        });

        plan.push(Stage::Concurrent {
            label: "extensions".into(),
            tasks: self
                .extensions
                .iter()
                .map(|ext| self.extension_task(ext))
                .collect(),
        });

        Ok(plan)
    }

    /// Key store calls `uninstall` makes
    pub fn uninstall_plan(&self) -> InstallPlan {
        let mut plan = InstallPlan::new(&self.id);
        plan.push(Stage::Sequential(Task::new(
            self.id.clone(),
            vec![KeyOp::destroy(self.base_key.clone())],
        )));
        plan
    }

    /// Write the ProgId, its verbs and its extension claims
    ///
    /// Returns [`InstallOutcome::NotApplicable`] without touching the
    /// store when the host platform has no registry. The first failing
    /// step aborts the rest and is returned; writes already applied stay.
    pub async fn install(&self, store: &dyn KeyStore, host: &HostApp) -> Result<InstallOutcome> {
        if !host.platform.supports_registry() {
            debug!("Skipping install of {} on {}", self.id, host.platform);
            return Ok(InstallOutcome::NotApplicable);
        }

        let plan = self.plan(host)?;
        plan.execute(store).await?;

        info!("Installed registry \"{}\" successfully", self.id);
        Ok(InstallOutcome::Applied)
    }

    /// Remove the ProgId's key subtree; an absent key is not an error
    ///
    /// Extension claims live outside the subtree and are left in place.
    pub async fn uninstall(&self, store: &dyn KeyStore, host: &HostApp) -> Result<InstallOutcome> {
        if !host.platform.supports_registry() {
            debug!("Skipping uninstall of {} on {}", self.id, host.platform);
            return Ok(InstallOutcome::NotApplicable);
        }

        self.uninstall_plan().execute(store).await?;

        info!("Uninstalled registry \"{}\"", self.id);
        Ok(InstallOutcome::Applied)
    }

    fn extension_task(&self, ext: &FileExtension) -> Task {
        let ext_key = KeyPath::classes(self.hive, &format!(".{}", ext.name));
        let open_with = ext_key.join("OpenWithProgids");

        let mut ops = vec![
            KeyOp::create(open_with.clone()),
            KeyOp::set(open_with, self.id.clone(), ""),
        ];
        if ext.set_default {
            ops.push(KeyOp::set(ext_key.clone(), DEFAULT_VALUE, self.id.clone()));
        }
        // Unquoted values here make Explorer spin on the extension.
        if let Some(content_type) = &self.content_type {
            ops.push(KeyOp::set(
                ext_key.clone(),
                "Content Type",
                winpath::quote(content_type),
            ));
        }
        if let Some(perceived_type) = &self.perceived_type {
            ops.push(KeyOp::set(
                ext_key,
                "PerceivedType",
                winpath::quote(perceived_type),
            ));
        }

        Task::new(format!(".{}", ext.name), ops)
    }
}

/// Builder for [`ProgId`]
#[derive(Debug, Clone, Default)]
pub struct ProgIdBuilder {
    app_name: Option<String>,
    prog_ext: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    content_type: Option<String>,
    perceived_type: Option<String>,
    hive: Hive,
    squirrel: SquirrelMode,
    friendly_app_name: Option<FriendlyAppName>,
    set_default: bool,
    extensions: Vec<FileExtension>,
    shell_options: Vec<ShellOption>,
}

impl ProgIdBuilder {
    /// Application name; defaults to the host application's name
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Suffix appended to the app name to form the id
    pub fn prog_ext(mut self, prog_ext: impl Into<String>) -> Self {
        self.prog_ext = Some(prog_ext.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Default icon; relative paths resolve against the executable's directory
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// MIME type written as `Content Type` on every claimed extension
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Perceived type (`text`, `image`, `document`...) written on every claimed extension
    pub fn perceived_type(mut self, perceived_type: impl Into<String>) -> Self {
        self.perceived_type = Some(perceived_type.into());
        self
    }

    pub fn hive(mut self, hive: Hive) -> Self {
        self.hive = hive;
        self
    }

    pub fn squirrel(mut self, squirrel: SquirrelMode) -> Self {
        self.squirrel = squirrel;
        self
    }

    pub fn friendly_app_name(mut self, name: FriendlyAppName) -> Self {
        self.friendly_app_name = Some(name);
        self
    }

    /// Make this ProgId the default handler of every claimed extension
    pub fn set_default(mut self, set_default: bool) -> Self {
        self.set_default = set_default;
        self
    }

    /// Claim an extension (leading dot optional)
    pub fn extension(mut self, ext: impl AsRef<str>) -> Self {
        self.extensions.push(FileExtension::new(ext, false));
        self
    }

    /// Claim an extension and become its default handler
    pub fn default_extension(mut self, ext: impl AsRef<str>) -> Self {
        self.extensions.push(FileExtension::new(ext, true));
        self
    }

    pub fn file_extension(mut self, ext: FileExtension) -> Self {
        self.extensions.push(FileExtension::new(&ext.name, ext.set_default));
        self
    }

    pub fn shell_option(mut self, option: ShellOption) -> Self {
        self.shell_options.push(option);
        self
    }

    pub fn shell_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = ShellOption>,
    {
        self.shell_options.extend(options);
        self
    }

    /// Resolve defaults against `host`, validate and bind the shell verbs
    pub fn build(self, host: &HostApp) -> Result<ProgId> {
        let app_name = self.app_name.unwrap_or_else(|| host.name.clone());
        let id = match self.prog_ext.as_deref() {
            Some(ext) if !ext.is_empty() => format!("{}.{}", app_name, ext),
            _ => app_name.clone(),
        };
        validate_key_name(&id, &id)?;

        let mut extensions: Vec<FileExtension> = Vec::new();
        for ext in self.extensions {
            validate_key_name(&id, &ext.name)?;
            if extensions
                .iter()
                .any(|e| e.name.eq_ignore_ascii_case(&ext.name))
            {
                continue;
            }
            extensions.push(FileExtension {
                set_default: ext.set_default || self.set_default,
                ..ext
            });
        }

        let base_key = KeyPath::classes(self.hive, &id);
        let binding = ProgBinding {
            prog_id: id.clone(),
            app_name: app_name.clone(),
            base_key: base_key.clone(),
            squirrel: self.squirrel.clone(),
            friendly_app_name: self.friendly_app_name.clone(),
        };

        let mut options = self.shell_options;
        if options.is_empty() {
            options.push(ShellOption::default());
        }
        let shell_options = options
            .into_iter()
            .map(|option| option.bind(binding.clone()))
            .collect::<Result<Vec<_>>>()?;

        Ok(ProgId {
            id,
            app_name,
            description: self.description,
            icon: self.icon,
            content_type: self.content_type,
            perceived_type: self.perceived_type,
            hive: self.hive,
            squirrel: self.squirrel,
            friendly_app_name: self.friendly_app_name,
            extensions,
            shell_options,
            base_key,
        })
    }
}

fn validate_key_name(id: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_prog_id(id, "key name is empty"));
    }
    if name.chars().count() > MAX_KEY_NAME_LEN {
        return Err(Error::invalid_prog_id(
            id,
            format!("'{}' is longer than {} characters", name, MAX_KEY_NAME_LEN),
        ));
    }
    if let Some(c) = name.chars().find(|c| *c == '\\' || c.is_control()) {
        return Err(Error::invalid_prog_id(
            id,
            format!("'{}' contains invalid character {:?}", name, c),
        ));
    }
    Ok(())
}
