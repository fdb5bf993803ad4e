//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// shellreg - Register file types and shell verbs in the Windows registry
#[derive(Parser, Debug)]
#[command(name = "shellreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to shellreg.yaml manifest
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Preview registry writes against an in-memory store
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Give up after this many seconds
    #[arg(long, global = true, default_value_t = 60)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every command
    pub fn global(&self) -> GlobalArgs {
        GlobalArgs {
            config: self.config.clone(),
            dry_run: self.dry_run,
            timeout: self.timeout,
        }
    }
}

/// Global options handed to commands
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: Option<Utf8PathBuf>,
    pub dry_run: bool,
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register every ProgId in the manifest
    Install(InstallArgs),

    /// Remove every ProgId in the manifest
    Uninstall(UninstallArgs),

    /// Show the registry operations an install would perform
    Plan(PlanArgs),

    /// Check the manifest without touching the registry
    Validate(ValidateArgs),

    /// Handle a squirrel installer event (--squirrel-install, ...)
    Startup(StartupArgs),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Only install this ProgId
    #[arg(long)]
    pub only: Option<String>,
}

#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Only uninstall this ProgId
    #[arg(long)]
    pub only: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    #[default]
    Human,
    Json,
    Yaml,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = PlanFormat::Human)]
    pub format: PlanFormat,

    /// Show the uninstall plan instead
    #[arg(long)]
    pub uninstall: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Print every ProgId's verbs and extensions
    #[arg(long)]
    pub detail: bool,
}

#[derive(Args, Debug)]
pub struct StartupArgs {
    /// Arguments the installer passed to the application
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["shellreg", "install", "--dry-run", "-c", "app.yaml", "-vv"]);
        let global = cli.global();
        assert!(global.dry_run);
        assert_eq!(global.config.as_deref().map(|p| p.as_str()), Some("app.yaml"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(global.timeout, 60);
    }

    #[test]
    fn test_startup_takes_squirrel_flags() {
        let cli = Cli::parse_from(["shellreg", "startup", "--", "--squirrel-install", "1.2.0"]);
        match cli.command {
            Commands::Startup(args) => assert_eq!(args.args, ["--squirrel-install", "1.2.0"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_plan_format() {
        let cli = Cli::parse_from(["shellreg", "plan", "--format", "json"]);
        match cli.command {
            Commands::Plan(args) => assert_eq!(args.format, PlanFormat::Json),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
