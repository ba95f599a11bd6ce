// Analysis error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Analysis error code constants
///
/// Error code range: 3001-3006
pub struct AnalysisErrorCodes {}

impl AnalysisErrorCodes {
    /// Upload did not carry an `audio` field
    pub const MISSING_AUDIO: i32 = 3001;

    /// Upload carried an `audio` field with an empty file name
    pub const NO_FILE_SELECTED: i32 = 3002;

    /// Upload carried zero bytes of audio
    pub const EMPTY_PAYLOAD: i32 = 3003;

    /// Upload exceeded the configured body limit
    pub const PAYLOAD_TOO_LARGE: i32 = 3004;

    /// Upload body could not be parsed
    pub const MALFORMED_UPLOAD: i32 = 3005;

    /// Analysis task failed unexpectedly
    pub const INTERNAL: i32 = 3006;
}

/// Log an analysis error with structured context
///
/// Logs the numeric code, the component and the human-readable message.
pub fn log_analysis_error(err: &AnalysisError, context: &str) {
    error!(
        "Analysis error in {}: code={}, component=Analyzer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Caller-level analysis errors
///
/// The core pipeline never fails on a byte buffer; these errors come from
/// validating the upload around it, or from the analysis task itself dying.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No `audio` field in the request
    MissingAudio,

    /// `audio` field present but no file was chosen
    NoFileSelected,

    /// Zero-length audio payload
    EmptyPayload,

    /// Body exceeded the upload limit
    PayloadTooLarge { limit: usize },

    /// Multipart body could not be read
    MalformedUpload { reason: String },

    /// Unexpected fault while analyzing
    Internal { details: String },
}

impl ErrorCode for AnalysisError {
    fn code(&self) -> i32 {
        match self {
            AnalysisError::MissingAudio => AnalysisErrorCodes::MISSING_AUDIO,
            AnalysisError::NoFileSelected => AnalysisErrorCodes::NO_FILE_SELECTED,
            AnalysisError::EmptyPayload => AnalysisErrorCodes::EMPTY_PAYLOAD,
            AnalysisError::PayloadTooLarge { .. } => AnalysisErrorCodes::PAYLOAD_TOO_LARGE,
            AnalysisError::MalformedUpload { .. } => AnalysisErrorCodes::MALFORMED_UPLOAD,
            AnalysisError::Internal { .. } => AnalysisErrorCodes::INTERNAL,
        }
    }

    fn message(&self) -> String {
        match self {
            AnalysisError::MissingAudio => "No audio file provided".to_string(),
            AnalysisError::NoFileSelected => "No file selected".to_string(),
            AnalysisError::EmptyPayload => "Empty audio payload".to_string(),
            AnalysisError::PayloadTooLarge { limit } => {
                format!("Audio file exceeds the {} byte upload limit", limit)
            }
            AnalysisError::MalformedUpload { reason } => {
                format!("Could not read upload: {}", reason)
            }
            AnalysisError::Internal { .. } => {
                "Server error occurred while processing audio".to_string()
            }
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AnalysisError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AnalysisError {}
