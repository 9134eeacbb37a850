pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands, LoggingArgs, SourceArgs};

use crate::domain::ResolutionError;
use crate::infrastructure::logging::SecretScrubber;

/// Render a command error and exit with status 1.
///
/// Resolution violations are printed as-is since they carry only redacted
/// values; any other error chain goes through the secret scrubber first.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let (message, violations) = render_error(&err);
    tracing::error!(violations = violations.len(), "command failed");

    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": message,
            "violations": violations,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {message}");
    }
    std::process::exit(1);
}

/// Error message and, for resolution failures, one line per violation.
pub fn render_error(err: &anyhow::Error) -> (String, Vec<String>) {
    if let Some(resolution) = err.downcast_ref::<ResolutionError>() {
        let violations = resolution.violations().iter().map(ToString::to_string).collect();
        return (resolution.to_string(), violations);
    }
    let scrubber = SecretScrubber::new();
    (scrubber.scrub(&format!("{err:#}")), Vec::new())
}
