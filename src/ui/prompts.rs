//! Confirmation prompt with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{StageCacheError, StageCacheResult};

/// Ask a yes/no question.
///
/// `--yes` answers yes; a non-interactive environment answers `default`.
pub fn confirm(ctx: &UiContext, message: &str, default: bool) -> StageCacheResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    cliclack::confirm(message)
        .initial_value(default)
        .interact()
        .map_err(|e| StageCacheError::User(format!("Prompt failed: {}", e)))
}
