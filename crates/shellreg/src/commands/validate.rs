//! Validate command - check the manifest builds without touching the registry

use anyhow::Result;
use owo_colors::OwoColorize;

use super::Session;
use crate::cli::{GlobalArgs, ValidateArgs};
use crate::output;

pub fn run(args: ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;

    output::header(session.manifest.path.as_str());
    output::kv("app", &session.host.name);
    output::kv("executable", &session.host.exe_path);
    output::kv("platform", &session.host.platform.to_string());

    for prog in session.registrar.prog_ids() {
        println!("  {} {}", "•".cyan(), prog.id().bold());
        if args.detail {
            output::kv("key", &prog.base_key().to_string());
            let verbs: Vec<String> = prog
                .shell_options()
                .iter()
                .map(|o| {
                    if o.is_selected() {
                        format!("{}*", o.verb())
                    } else {
                        o.verb().to_string()
                    }
                })
                .collect();
            output::kv("verbs", &verbs.join(", "));
            let extensions: Vec<String> = prog
                .extensions()
                .iter()
                .map(|e| {
                    if e.set_default {
                        format!(".{} (default)", e.name)
                    } else {
                        format!(".{}", e.name)
                    }
                })
                .collect();
            if !extensions.is_empty() {
                output::kv("extensions", &extensions.join(", "));
            }
        }
    }

    output::success(&format!(
        "Manifest is valid: {} ProgId(s)",
        session.registrar.len()
    ));
    Ok(())
}
