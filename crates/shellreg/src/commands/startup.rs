//! Startup command - react to squirrel installer lifecycle flags
//!
//! Meant to be called with the arguments squirrel passed to the
//! application: `shellreg startup -- --squirrel-install 1.2.0`.

use anyhow::Result;
use shellreg_core::Registrar;

use super::{conclude, with_timeout, Session, Target};
use crate::cli::{GlobalArgs, StartupArgs};
use crate::output;

pub async fn run(args: StartupArgs, global: &GlobalArgs) -> Result<()> {
    let Some(event) = Registrar::detect_startup_event(&args.args) else {
        output::info("No installer event in arguments; nothing to do");
        return Ok(());
    };

    let session = Session::load(global)?;
    let target = Target::select(global.dry_run);
    output::info(&format!("Installer event {}", event));

    let report = with_timeout(
        global.timeout,
        session
            .registrar
            .handle_startup_event(event, target.store(), &session.host),
    )
    .await?;

    match report {
        Some(report) => conclude(&report, &target),
        None => {
            output::info("Nothing to register for this event");
            Ok(())
        }
    }
}
