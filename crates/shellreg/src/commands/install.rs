//! Install command - register every ProgId in the manifest

use anyhow::Result;

use super::{conclude, with_timeout, Session, Target};
use crate::cli::{GlobalArgs, InstallArgs};
use crate::output;

pub async fn run(args: InstallArgs, global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?.only(args.only.as_deref())?;
    let target = Target::select(global.dry_run);

    let spinner = output::spinner(&format!(
        "Registering {} ProgId(s) via {}...",
        session.registrar.len(),
        target.store().name()
    ));
    let report = with_timeout(
        global.timeout,
        session.registrar.install_all(target.store(), &session.host),
    )
    .await;
    spinner.finish_and_clear();

    conclude(&report?, &target)
}
