//! Error types for the reference machine
//!
//! Tape and pointer overflow are not errors: both wrap by construction. The
//! machine only fails when its byte streams fail or when a configured step
//! budget runs out.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MachineError {
    /// Reading program input failed
    #[error("failed to read input: {source}")]
    Input { source: std::io::Error },

    /// Writing program output failed
    #[error("failed to write output: {source}")]
    Output { source: std::io::Error },

    /// The run executed more steps than `MachineConfig::step_limit` allows
    #[error("step limit of {limit} exceeded at instruction {position}")]
    StepLimitExceeded { limit: u64, position: usize },
}
