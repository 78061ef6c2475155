//! UI module for consistent CLI output
//!
//! Uses `cliclack` for spinners and log lines in interactive terminals,
//! with plain prefixed lines in CI or when output is piped.
//!
//! # Example
//!
//! ```rust,ignore
//! use nuprune::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect().with_auto_yes(args.yes);
//!
//! ui::intro(&ctx, "nuprune");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Scanning manifests...");
//! // ... do work ...
//! spinner.stop("Found 12 manifest(s)");
//!
//! if ui::confirm(&ctx, "Delete these directories?").await? {
//!     ui::outro_success(&ctx, "Cleanup complete");
//! }
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, outro_warn, preview_list, remark, step_error_detail,
    step_info, step_ok, step_warn,
};
pub use progress::TaskSpinner;
pub use prompts::{confirm, is_affirmative, read_confirmation};
pub use theme::{init_theme, set_accent, Accent, NuPruneTheme};
