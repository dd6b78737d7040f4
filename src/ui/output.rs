//! Line-oriented output: generic steps plus per-stage result rendering

use super::context::UiContext;
use crate::cache::LoadOutcome;
use crate::error::{StageCacheError, StageCacheResult};
use console::{style, StyledObject};

/// Plain-mode line with a bracketed tag
fn tagged(tag: StyledObject<&str>, message: &str) {
    println!("  {} {}", tag, message);
}

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}\n", style(title).cyan().bold());
    }
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        tagged(style("[OK]").green(), message);
    }
}

pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(format!("{} ({})", message, style(detail).dim())).ok();
    } else {
        tagged(style("[OK]").green(), &format!("{} ({})", message, detail));
    }
}

pub fn step_warn(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(message).ok();
    } else {
        tagged(style("[WARN]").yellow(), message);
    }
}

pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(format!("{} - {}", message, style(hint).dim())).ok();
    } else {
        tagged(style("[WARN]").yellow(), &format!("{} - {}", message, hint));
    }
}

pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::info(message).ok();
    } else {
        tagged(style("[INFO]").cyan(), message);
    }
}

/// Dimmed hint line
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// A stage that failed, followed by the error's hint if it has one
pub fn stage_error(ctx: &UiContext, stage: &str, err: &StageCacheError) {
    if ctx.use_fancy_output() {
        cliclack::log::error(format!("{}: {}", stage, style(err).red())).ok();
    } else {
        tagged(style("[FAIL]").red(), &format!("{}: {}", stage, err));
    }
    if let Some(hint) = err.hint() {
        remark(ctx, hint);
    }
}

/// Every failed stage of a bulk operation
pub fn stage_failures(ctx: &UiContext, failures: &[(&str, &StageCacheError)]) {
    for (stage, err) in failures {
        stage_error(ctx, stage, err);
    }
}

/// How a single stage came out of a restore
pub fn stage_outcome(ctx: &UiContext, stage: &str, result: &StageCacheResult<LoadOutcome>) {
    match result {
        Ok(LoadOutcome::NotPersisted) => step_warn(ctx, &format!("{} not persisted", stage)),
        Ok(outcome) => step_ok_detail(ctx, stage, &outcome.to_string()),
        Err(e) => stage_error(ctx, stage, e),
    }
}

/// Closing line of a restore: success only when every stage is loaded
pub fn restore_summary(ctx: &UiContext, loaded: usize, total: usize, failed: usize) {
    let summary = format!("{}/{} stage(s) restored", loaded, total);
    let (tag, styled) = if failed > 0 {
        (style("[ERROR]").red(), style(summary.as_str()).red().bold())
    } else if loaded == total {
        (style("[OK]").green(), style(summary.as_str()).green().bold())
    } else {
        (style("[WARN]").yellow(), style(summary.as_str()).yellow().bold())
    };

    if ctx.use_fancy_output() {
        cliclack::outro(styled).ok();
    } else {
        println!("\n{} {}", tag, summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_non_interactive() {
        let ctx = UiContext::non_interactive();
        // These should not panic
        intro(&ctx, "Restore");
        step_ok(&ctx, "gnn_graph restored");
        step_warn_hint(&ctx, "training_time not persisted", "run the training step");
        remark(&ctx, "3 stages missing");
    }

    #[test]
    fn stage_results_render_non_interactive() {
        let ctx = UiContext::non_interactive();
        let unknown = StageCacheError::unknown_stage("nope");

        stage_outcome(&ctx, "gnn_graph", &Ok(LoadOutcome::Restored));
        stage_outcome(&ctx, "gnn_training", &Ok(LoadOutcome::NotPersisted));
        stage_outcome(&ctx, "nope", &Err(StageCacheError::unknown_stage("nope")));
        stage_failures(&ctx, &[("nope", &unknown)]);
        restore_summary(&ctx, 2, 18, 1);
        restore_summary(&ctx, 18, 18, 0);
    }
}
