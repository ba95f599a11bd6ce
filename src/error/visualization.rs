// Visualization error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Visualization error code constants
///
/// Error code range: 4001-4004
pub struct VisualizationErrorCodes {}

impl VisualizationErrorCodes {
    /// Canvas or panel dimensions are unusable
    pub const INVALID_DIMENSIONS: i32 = 4001;

    /// Synthesized waveform contained NaN or infinity
    pub const NON_FINITE_SAMPLE: i32 = 4002;

    /// PNG encoder rejected the raster
    pub const ENCODE_FAILED: i32 = 4003;

    /// Synthesis parameters out of range
    pub const INVALID_GRID: i32 = 4004;
}

/// Log a visualization error with structured context
pub fn log_visualization_error(err: &VisualizationError, context: &str) {
    error!(
        "Visualization error in {}: code={}, component=SyntheticVisualizer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Rendering-backend errors
///
/// Recovered by the analyzer: a failed render yields an absent image while
/// the label and confidence are still delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualizationError {
    /// Image too small to hold both panels
    InvalidDimensions { width: u32, height: u32 },

    /// Waveform sample was not finite
    NonFiniteSample { index: usize },

    /// PNG encoding failed
    Encode { reason: String },

    /// Heat-map or waveform parameters too large or not finite
    InvalidGrid { reason: String },
}

impl ErrorCode for VisualizationError {
    fn code(&self) -> i32 {
        match self {
            VisualizationError::InvalidDimensions { .. } => {
                VisualizationErrorCodes::INVALID_DIMENSIONS
            }
            VisualizationError::NonFiniteSample { .. } => {
                VisualizationErrorCodes::NON_FINITE_SAMPLE
            }
            VisualizationError::Encode { .. } => VisualizationErrorCodes::ENCODE_FAILED,
            VisualizationError::InvalidGrid { .. } => VisualizationErrorCodes::INVALID_GRID,
        }
    }

    fn message(&self) -> String {
        match self {
            VisualizationError::InvalidDimensions { width, height } => {
                format!("Invalid visualization size {}x{}", width, height)
            }
            VisualizationError::NonFiniteSample { index } => {
                format!("Waveform sample {} is not finite", index)
            }
            VisualizationError::Encode { reason } => {
                format!("Failed to encode PNG: {}", reason)
            }
            VisualizationError::InvalidGrid { reason } => {
                format!("Invalid synthesis parameters: {}", reason)
            }
        }
    }
}

impl fmt::Display for VisualizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VisualizationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for VisualizationError {}

impl From<image::ImageError> for VisualizationError {
    fn from(err: image::ImageError) -> Self {
        VisualizationError::Encode {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visualization_error_codes() {
        assert_eq!(
            VisualizationError::InvalidDimensions {
                width: 0,
                height: 0
            }
            .code(),
            VisualizationErrorCodes::INVALID_DIMENSIONS
        );
        assert_eq!(
            VisualizationError::NonFiniteSample { index: 3 }.code(),
            VisualizationErrorCodes::NON_FINITE_SAMPLE
        );
        assert_eq!(
            VisualizationError::Encode {
                reason: "test".to_string()
            }
            .code(),
            VisualizationErrorCodes::ENCODE_FAILED
        );
        assert_eq!(
            VisualizationError::InvalidGrid {
                reason: "bins".to_string()
            }
            .code(),
            VisualizationErrorCodes::INVALID_GRID
        );
    }

    #[test]
    fn test_visualization_error_messages() {
        let err = VisualizationError::InvalidDimensions {
            width: 4,
            height: 2,
        };
        assert_eq!(err.message(), "Invalid visualization size 4x2");

        let err = VisualizationError::Encode {
            reason: "boom".to_string(),
        };
        assert!(format!("{}", err).contains("boom"));
    }
}
