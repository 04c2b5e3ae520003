//! Command execution helpers
//!
//! Every dashboard command times itself, logs one structured event, and
//! converts failures into the message the user sees in place of the view.

use std::future::Future;
use std::time::Instant;

use ticketboard_domain::Result as DomainResult;
use tracing::error;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Execute a command with timing, logging and user-message conversion
///
/// # Example
///
/// ```rust,ignore
/// pub async fn get_home(ctx: &AppContext) -> Result<HomeSnapshot, String> {
///     execute_command(ctx, "issues::get_home", || ctx.issues.home()).await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(
    ctx: &AppContext,
    command_name: &str,
    command_fn: F,
) -> Result<T, String>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();
    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.is_ok());

    result.map_err(|err| {
        error!(command = command_name, error_type = err.label(), error = %err, "command failed");
        err.user_message(ctx.locale)
    })
}
