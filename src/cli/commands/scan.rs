//! Scan command - list the packages a workspace references

use crate::cli::args::{OutputFormat, ScanArgs};
use crate::config::Config;
use crate::context::resolve_workspace;
use crate::error::NuPruneResult;
use crate::package::PackageIdentity;
use crate::scan::{scan_workspace, ScanReport};
use crate::ui::{self, UiContext};
use crate::workers::{build_pool, resolve_jobs};
use console::style;
use tokio::task::spawn_blocking;
use tracing::warn;

/// Execute the scan command
pub async fn execute(args: ScanArgs, config: &Config) -> NuPruneResult<()> {
    let root = resolve_workspace(args.workspace, config)?;
    let jobs = resolve_jobs(args.jobs.unwrap_or(config.parallelism.jobs));
    let exclude = config.workspace.exclude.clone();

    let report = spawn_blocking(move || -> NuPruneResult<ScanReport> {
        let pool = build_pool(jobs)?;
        Ok(scan_workspace(&root, &exclude, &pool))
    })
    .await??;

    let packages = report.used.to_sorted_vec();

    match args.format {
        OutputFormat::Table => print_table(&report, &packages),
        OutputFormat::Json => {
            log_failures(&report);
            print_json(&packages)?
        }
        OutputFormat::Plain => {
            log_failures(&report);
            print_plain(&packages)
        }
    }

    Ok(())
}

// Machine-readable formats keep stdout clean; parse failures go to the log
fn log_failures(report: &ScanReport) {
    for failure in &report.failures {
        warn!("{}", failure);
    }
}

fn print_table(report: &ScanReport, packages: &[PackageIdentity]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Referenced packages");

    for failure in &report.failures {
        ui::step_warn(&ctx, &failure.to_string());
    }

    if packages.is_empty() {
        ui::step_info(&ctx, "No package references found");
        return;
    }

    let id_width = packages
        .iter()
        .map(|p| p.id().len())
        .max()
        .unwrap_or(0)
        .max(10);

    println!(
        "{:<width$}  {}",
        style("ID").bold(),
        style("VERSION").bold(),
        width = id_width
    );
    println!("{}", "-".repeat(id_width + 12));

    for package in packages {
        println!("{:<width$}  {}", package.id(), package.version(), width = id_width);
    }

    println!();
    println!(
        "{} package(s) from {} manifest(s)",
        packages.len(),
        report.manifest_count
    );
}

fn print_json(packages: &[PackageIdentity]) -> NuPruneResult<()> {
    let json = serde_json::to_string_pretty(packages)?;
    println!("{}", json);
    Ok(())
}

fn print_plain(packages: &[PackageIdentity]) {
    for package in packages {
        println!("{}", package);
    }
}
