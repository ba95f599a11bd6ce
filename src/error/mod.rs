// Error types for the speech emotion service
//
// Upload validation and rendering failures are plain enums carrying numeric
// codes, so HTTP and CLI callers can report them uniformly.

mod analysis;
mod visualization;

pub use analysis::{log_analysis_error, AnalysisError, AnalysisErrorCodes};
pub use visualization::{log_visualization_error, VisualizationError, VisualizationErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
