//! Catch-all render boundary.
//!
//! The whole render pass runs inside `catch_unwind`: a panic anywhere in the
//! presentation layer is logged and the entire output is replaced by a
//! static fallback message. There is no partial recovery and no retry; the
//! user re-runs the command.

use std::panic::{self, AssertUnwindSafe};
use tracing::error;

pub const FALLBACK_MESSAGE: &str =
    "Something went wrong while rendering the report. Please run the command again.";

pub fn render_with_fallback(render: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(render)) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        error!(%message, "Render pass panicked; substituting fallback view");
        println!("{FALLBACK_MESSAGE}");
    }
}
