use thiserror::Error;

/// Raised when the user interrupts a run. Kept apart from other failures so
/// the binary can report a cancellation instead of an error.
#[derive(Debug, Error)]
#[error("aborted by user")]
pub struct Interrupted;
