//! Shell verbs
//!
//! A [`ShellOption`] is one entry of a ProgId's context menu: the verb key,
//! the command it launches and its display metadata. It is built on its
//! own, then bound to exactly one ProgId, which fills in the defaults it
//! inherits from its owner.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::host::HostApp;
use crate::keystore::{KeyOp, KeyPath, KeyStore, DEFAULT_VALUE};
use crate::plan::Task;
use crate::types::{FriendlyAppName, InstallOutcome, SquirrelMode, Verb};
use crate::winpath;

/// Argument squirrel's launcher forwards to the versioned executable
pub const SQUIRREL_START_ARGS: &str = "--process-start-args";

/// Default argument template: the file being opened
pub const DEFAULT_ARG: &str = "%1";

/// What a ShellOption knows about the ProgId it belongs to
///
/// Holds the owner's identity and inheritable defaults by value; the
/// ProgId owns its ShellOptions, never the other way round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgBinding {
    pub prog_id: String,
    pub app_name: String,
    pub base_key: KeyPath,
    pub squirrel: SquirrelMode,
    pub friendly_app_name: Option<FriendlyAppName>,
}

/// One shell verb of a ProgId
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellOption {
    verb: Verb,
    action: Option<String>,
    command: Option<String>,
    args: Vec<String>,
    icon: Option<String>,
    friendly_app_name: Option<FriendlyAppName>,
    selected: bool,
    squirrel: Option<SquirrelMode>,
    #[serde(skip)]
    binding: Option<ProgBinding>,
}

impl Default for ShellOption {
    fn default() -> Self {
        Self::new(Verb::Open)
    }
}

impl ShellOption {
    /// Unbound option for `verb` with `%1` as its only argument
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            action: None,
            command: None,
            args: vec![DEFAULT_ARG.to_string()],
            icon: None,
            friendly_app_name: None,
            selected: false,
            squirrel: None,
            binding: None,
        }
    }

    /// Display text of the menu entry
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Executable to launch instead of the host executable
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Replace the argument templates
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_friendly_app_name(mut self, name: FriendlyAppName) -> Self {
        self.friendly_app_name = Some(name);
        self
    }

    /// Make this verb the ProgId's default double-click action
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_squirrel(mut self, squirrel: SquirrelMode) -> Self {
        self.squirrel = Some(squirrel);
        self
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn friendly_app_name(&self) -> Option<&FriendlyAppName> {
        self.friendly_app_name.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn squirrel(&self) -> Option<&SquirrelMode> {
        self.squirrel.as_ref()
    }

    pub fn binding(&self) -> Option<&ProgBinding> {
        self.binding.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Attach to a ProgId, inheriting its unset defaults
    ///
    /// In squirrel mode `--process-start-args` is prepended to the
    /// arguments. An option can only be bound once; a second bind fails
    /// with [`Error::AlreadyBound`] and leaves the arguments untouched.
    pub fn bind(mut self, owner: ProgBinding) -> Result<Self> {
        if let Some(existing) = &self.binding {
            return Err(Error::already_bound(self.verb, existing.prog_id.clone()));
        }

        if self.squirrel.is_none() {
            self.squirrel = Some(owner.squirrel.clone());
        }
        if self.friendly_app_name.is_none() {
            self.friendly_app_name = owner.friendly_app_name.clone();
        }
        if self.squirrel.as_ref().is_some_and(SquirrelMode::is_enabled) {
            self.args.insert(0, SQUIRREL_START_ARGS.to_string());
        }

        self.binding = Some(owner);
        Ok(self)
    }

    /// Key of the verb: `{base}\shell\{verb}`
    pub fn verb_key(&self) -> Result<KeyPath> {
        let binding = self.require_binding()?;
        Ok(binding.base_key.join("shell").join(self.verb.as_str()))
    }

    /// Executable path the verb launches
    pub fn resolve_command(&self, host: &HostApp) -> Result<String> {
        let binding = self.require_binding()?;
        if let Some(command) = &self.command {
            return Ok(command.clone());
        }
        let launcher = self
            .squirrel
            .as_ref()
            .and_then(|mode| mode.launcher(&binding.app_name));
        Ok(match launcher {
            Some(launcher) => host.squirrel_launcher(&launcher),
            None => host.exe_path.clone(),
        })
    }

    /// Full command line: every token quoted, joined by spaces
    pub fn command_line(&self, host: &HostApp) -> Result<String> {
        let command = self.resolve_command(host)?;
        let tokens: Vec<String> = std::iter::once(command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(winpath::quote)
            .collect();
        Ok(tokens.join(" "))
    }

    /// Display text, defaulting to `Open with {app_name}` for the open verb
    pub fn resolve_action(&self) -> Result<Option<String>> {
        let binding = self.require_binding()?;
        let action = match (&self.action, self.verb) {
            (Some(action), _) => Some(action.clone()),
            (None, Verb::Open) => Some(format!("Open with {}", binding.app_name)),
            (None, _) => None,
        };
        Ok(action.filter(|a| !a.is_empty()))
    }

    /// Registry operations for this verb, in dependency order
    pub fn plan(&self, host: &HostApp) -> Result<Task> {
        let verb_key = self.verb_key()?;
        let command_key = verb_key.join("command");
        let mut ops = vec![
            KeyOp::create(command_key.clone()),
            KeyOp::set(command_key, DEFAULT_VALUE, self.command_line(host)?),
        ];

        if let Some(action) = self.resolve_action()? {
            ops.push(KeyOp::set(verb_key.clone(), DEFAULT_VALUE, action));
        }

        if let Some(icon) = &self.icon {
            ops.push(KeyOp::set(
                verb_key.clone(),
                "Icon",
                winpath::quote(&host.resolve_path(icon)),
            ));
        }

        if let Some(name) = self
            .friendly_app_name
            .as_ref()
            .and_then(|f| f.resolve(&host.display_name))
        {
            ops.push(KeyOp::set(verb_key.clone(), "FriendlyAppName", name));
        }

        if self.selected {
            if let Some(shell_key) = verb_key.parent() {
                ops.push(KeyOp::set(shell_key, DEFAULT_VALUE, self.verb.as_str()));
            }
        }

        Ok(Task::new(format!(r"shell\{}", self.verb), ops))
    }

    /// Write this verb's keys
    ///
    /// Fails with [`Error::UnboundShellOption`] before touching the store
    /// if the option was never bound; returns
    /// [`InstallOutcome::NotApplicable`] off Windows.
    pub async fn install(&self, store: &dyn KeyStore, host: &HostApp) -> Result<InstallOutcome> {
        let task = self.plan(host)?;
        if !host.platform.supports_registry() {
            debug!("Skipping shell verb {} on {}", self.verb, host.platform);
            return Ok(InstallOutcome::NotApplicable);
        }
        for op in &task.ops {
            op.apply(store).await?;
        }
        Ok(InstallOutcome::Applied)
    }

    fn require_binding(&self) -> Result<&ProgBinding> {
        self.binding.as_ref().ok_or_else(|| Error::unbound(self.verb))
    }
}
