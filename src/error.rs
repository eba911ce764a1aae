//! Error types for cell sphere generation

use thiserror::Error;

/// Errors that can occur during cell sphere generation or queries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The builder was handed no points at all
    #[error("cannot build a cell sphere from zero points")]
    EmptyInput,
    /// The sites cannot be tessellated (too few, duplicated, coplanar, ...)
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    /// Generation failed inside the tessellation engine
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    /// Requested cell index does not exist
    #[error("cell not found: {0}")]
    CellNotFound(usize),
}

/// Result type alias for cell sphere operations
pub type Result<T> = std::result::Result<T, VoronoiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            VoronoiError::CellNotFound(7).to_string(),
            "cell not found: 7"
        );
        assert_eq!(
            VoronoiError::DegenerateInput("3 sites".into()).to_string(),
            "degenerate input: 3 sites"
        );
    }
}
