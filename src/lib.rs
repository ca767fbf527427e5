//! Directory tree listing and text bundling.

pub mod app;

pub use app::cli::Cli;
pub use app::error::Interrupted;
pub use app::models::{FilterConfig, ScanOutcome};
pub use app::{run, run_with};
