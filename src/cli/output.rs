//! Output formatting for `check`, `show` and `schema`.

use serde::Serialize;

/// A command result that can be printed as a human report or as JSON.
///
/// Implementors hold only redacted or non-secret data, so either rendering
/// is safe to print.
pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

/// Print a command result to stdout, as pretty JSON when `--json` is set.
pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}
