//! Clear command - drop cached stages

use crate::cache::{catalog, ArtifactCache, ClearScope};
use crate::cli::args::ClearArgs;
use crate::config::Config;
use crate::error::{StageCacheError, StageCacheResult};
use crate::ui::{self, UiContext};

use super::open_cache;

/// Execute the clear command
pub fn execute(args: ClearArgs, config: &Config) -> StageCacheResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    let mut cache = open_cache(config)?;

    // A CLI run owns a fresh session, so only files carry state worth clearing
    let scope = ClearScope {
        session: true,
        file: args.files,
    };

    if !args.files {
        ui::remark(&ctx, "Session entries cleared; pass --files to delete persisted artifacts");
    }

    match args.stage {
        Some(stage) if !args.all => clear_one(&ctx, &mut cache, &stage, scope),
        _ => clear_every(&ctx, &mut cache, scope),
    }
}

fn clear_one(
    ctx: &UiContext,
    cache: &mut ArtifactCache,
    stage: &str,
    scope: ClearScope,
) -> StageCacheResult<()> {
    if scope.file && !catalog::is_known(stage) {
        return Err(StageCacheError::unknown_stage(stage));
    }

    let prompt = format!("Delete persisted artifact for {}?", stage);
    if scope.file && !ui::confirm(ctx, &prompt, false)? {
        ui::step_info(ctx, "Aborted");
        return Ok(());
    }

    cache.clear_stage(stage, scope)?;
    ui::step_ok(ctx, &format!("Cleared {}", stage));
    Ok(())
}

fn clear_every(
    ctx: &UiContext,
    cache: &mut ArtifactCache,
    scope: ClearScope,
) -> StageCacheResult<()> {
    if scope.file {
        let persisted = cache.completed_stages();
        if persisted.is_empty() {
            ui::step_info(ctx, "No persisted artifacts to clear");
            return Ok(());
        }

        ui::step_warn(
            ctx,
            &format!("This will delete {} persisted artifact(s)", persisted.len()),
        );
        if !ui::confirm(ctx, "Are you sure?", false)? {
            ui::step_info(ctx, "Aborted");
            return Ok(());
        }
    }

    let report = cache.clear_all(scope);
    let failures = report.failures();
    ui::stage_failures(ctx, &failures);

    let failed = failures.len();
    if failed > 0 {
        return Err(StageCacheError::User(format!(
            "{} of {} stage(s) could not be cleared",
            failed,
            report.len()
        )));
    }

    ui::step_ok(ctx, &format!("Cleared {} stage(s)", report.len()));
    Ok(())
}
