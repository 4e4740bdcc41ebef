/*
 * Error Module
 *
 * Errors raised while building a simulation from its parameters. The running
 * simulation itself never fails; numeric degeneracies are absorbed where they
 * occur.
 */

use thiserror::Error;

/// Errors that can occur when loading or validating simulation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A parameter value is out of its valid range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    /// The parameter file could not be read.
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
    /// The parameter file is not valid JSON for `SimulationParams`.
    #[error("failed to parse parameters: {0}")]
    Parse(#[from] serde_json::Error),
}
