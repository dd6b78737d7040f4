//! Terminal output helpers
//!
//! `cliclack` framing when attached to a terminal, plain `[OK]`/`[WARN]`
//! prefixed lines otherwise (CI, pipes, tests).

mod context;
mod output;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, remark, restore_summary, stage_error, stage_failures, stage_outcome, step_info, step_ok,
    step_ok_detail, step_warn, step_warn_hint,
};
pub use prompts::confirm;
