//! Plan command - show the staged registry operations without writing

use anyhow::Result;
use shellreg_core::{InstallPlan, Stage};
use tabled::{settings::Style, Table, Tabled};

use super::Session;
use crate::cli::{GlobalArgs, PlanArgs, PlanFormat};
use crate::output;

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "stage")]
    stage: String,
    #[tabled(rename = "task")]
    task: String,
    #[tabled(rename = "operation")]
    operation: String,
}

pub fn run(args: PlanArgs, global: &GlobalArgs) -> Result<()> {
    let session = Session::load(global)?;
    let plans: Vec<InstallPlan> = if args.uninstall {
        session
            .registrar
            .prog_ids()
            .iter()
            .map(|p| p.uninstall_plan())
            .collect()
    } else {
        session.registrar.plan_all(&session.host)?
    };

    match args.format {
        PlanFormat::Json => println!("{}", serde_json::to_string_pretty(&plans)?),
        PlanFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&plans)?),
        PlanFormat::Human => {
            if !session.host.platform.supports_registry() {
                output::warning(&format!(
                    "{} has no registry; install would be skipped",
                    session.host.platform
                ));
            }
            for plan in &plans {
                print_plan(plan);
            }
        }
    }
    Ok(())
}

fn print_plan(plan: &InstallPlan) {
    output::header(&format!("{} ({} operations)", plan.prog_id, plan.op_count()));
    let rows: Vec<PlanRow> = plan
        .stages
        .iter()
        .enumerate()
        .flat_map(|(index, stage)| {
            let stage_label = format!("{}. {}{}", index + 1, stage.label(), mode(stage));
            stage.tasks().iter().flat_map(move |task| {
                let stage_label = stage_label.clone();
                task.ops.iter().map(move |op| PlanRow {
                    stage: stage_label.clone(),
                    task: task.label.clone(),
                    operation: op.to_string(),
                })
            })
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}

fn mode(stage: &Stage) -> &'static str {
    match stage {
        Stage::Sequential(_) => "",
        Stage::Concurrent { .. } => " (concurrent)",
    }
}
