//! Prune command - delete cache versions no manifest references

use crate::cache::{delete_entries, find_unused, CacheEntry};
use crate::cli::args::PruneArgs;
use crate::config::Config;
use crate::context::{RunContext, RunOverrides, RunPhase};
use crate::error::NuPruneResult;
use crate::manifest::discover_manifests;
use crate::scan::build_used_set;
use crate::ui::{self, TaskSpinner, UiContext};
use crate::workers::build_pool;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::debug;

/// Execute the prune command
pub async fn execute(args: PruneArgs, config: &Config) -> NuPruneResult<()> {
    let ui_ctx = UiContext::detect().with_auto_yes(args.yes);
    let ctx = RunContext::resolve(
        RunOverrides {
            workspace: args.workspace,
            cache: args.cache,
            jobs: args.jobs,
            preview_limit: args.preview,
        },
        config,
    )?;

    ui::intro(&ui_ctx, "nuprune");
    ui::key_value(&ui_ctx, "Workspace", &ctx.workspace_root.display().to_string());
    ui::key_value(&ui_ctx, "Cache", &ctx.cache_root.display().to_string());

    let pool = Arc::new(build_pool(ctx.jobs)?);
    let mut spinner = TaskSpinner::new(&ui_ctx);

    enter(RunPhase::Scanning);
    spinner.start("Scanning workspace for manifests...");
    let manifests = {
        let root = ctx.workspace_root.clone();
        let exclude = ctx.exclude.clone();
        spawn_blocking(move || discover_manifests(&root, &exclude)).await?
    };
    spinner.stop(&format!(
        "Found {}",
        count(manifests.len(), "manifest file", "manifest files")
    ));

    enter(RunPhase::Aggregating);
    let report = {
        let pool = Arc::clone(&pool);
        spawn_blocking(move || build_used_set(&manifests, &pool)).await?
    };
    for failure in &report.failures {
        ui::step_warn(&ui_ctx, &failure.to_string());
    }
    ui::step_ok(
        &ui_ctx,
        &format!(
            "{} referenced",
            count(report.used.len(), "distinct package", "distinct packages")
        ),
    );

    enter(RunPhase::Diffing);
    spinner.start("Comparing package cache...");
    let diff = {
        let pool = Arc::clone(&pool);
        let cache_root = ctx.cache_root.clone();
        let reserved = ctx.reserved.clone();
        let used = report.used;
        spawn_blocking(move || find_unused(&cache_root, &used, &reserved, &pool)).await?
    };
    let diff = match diff {
        Ok(diff) => diff,
        Err(e) => {
            spinner.stop_error("Package cache could not be read");
            return Err(e);
        }
    };
    spinner.stop(&format!(
        "Checked {} across {}",
        count(diff.version_dirs, "version directory", "version directories"),
        count(diff.package_dirs, "package", "packages")
    ));
    for dir in &diff.unreadable {
        ui::step_warn(
            &ui_ctx,
            &format!("Could not list versions in {}", dir.display()),
        );
    }

    if diff.unused.is_empty() {
        enter(RunPhase::Done);
        ui::outro_success(&ui_ctx, "No unused package directories found.");
        return Ok(());
    }

    ui::step_info(
        &ui_ctx,
        &format!(
            "{} to delete",
            count(diff.unused.len(), "unused version directory", "unused version directories")
        ),
    );
    ui::preview_list(&ui_ctx, &diff.unused, ctx.preview_limit);

    if args.dry_run {
        enter(RunPhase::Done);
        ui::outro_success(&ui_ctx, "Dry run - nothing was deleted.");
        return Ok(());
    }

    enter(RunPhase::AwaitingConfirmation);
    let prompt = format!(
        "Delete these {}?",
        count(diff.unused.len(), "directory", "directories")
    );
    if !ui::confirm(&ui_ctx, &prompt).await? {
        enter(RunPhase::Cancelled);
        ui::outro_warn(&ui_ctx, "Cancelled, nothing was deleted.");
        return Ok(());
    }

    enter(RunPhase::Deleting);
    ui::set_accent(ui::Accent::Destructive);
    let summary = {
        let pool = Arc::clone(&pool);
        let unused = diff.unused;
        let out = ui_ctx.clone();
        spawn_blocking(move || {
            delete_entries(&unused, &pool, |entry, result| {
                report_deletion(&out, entry, result)
            })
        })
        .await?
    };

    enter(RunPhase::Done);
    if summary.failures.is_empty() {
        ui::outro_success(
            &ui_ctx,
            &format!(
                "Cleanup complete: deleted {}",
                count(summary.deleted, "directory", "directories")
            ),
        );
    } else {
        ui::outro_warn(
            &ui_ctx,
            &format!(
                "Cleanup finished: deleted {}, {} failed",
                count(summary.deleted, "directory", "directories"),
                summary.failures.len()
            ),
        );
    }

    Ok(())
}

fn report_deletion(
    ctx: &UiContext,
    entry: &CacheEntry,
    result: &Result<(), crate::error::DeletionError>,
) {
    match result {
        Ok(()) => ui::step_ok(ctx, &format!("Deleted {}", entry)),
        Err(e) => ui::step_error_detail(ctx, &format!("Failed to delete {}", entry), &e.reason),
    }
}

fn enter(phase: RunPhase) {
    debug!("Run phase: {}", phase);
}

fn count(n: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { plural })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_pluralizes() {
        assert_eq!(count(1, "directory", "directories"), "1 directory");
        assert_eq!(count(0, "directory", "directories"), "0 directories");
        assert_eq!(count(21, "package", "packages"), "21 packages");
    }
}
