//! Output formatting for CLI.

mod json;
mod status;

pub use json::JsonEventOutput;
pub use status::StatusLine;
