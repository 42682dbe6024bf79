//! Error types for agenda operations.
//!
//! All validation happens at construction time; queries never fail.

use thiserror::Error;

/// Errors surfaced when constructing events or parsing their parameters.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// The event cannot be constructed as described (negative duration,
    /// termination date before the start date, ...).
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// A repetition unit outside daily/weekly/monthly was requested.
    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),
}

/// Convenience alias used throughout agenda-core.
pub type Result<T> = std::result::Result<T, AgendaError>;
