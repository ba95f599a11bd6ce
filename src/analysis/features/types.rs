// Types module - Data structures for byte-level features
//
// This module defines the feature record handed from the extractor to the
// classifier and the visualizer.

/// Features derived from a raw upload
///
/// A pure function of the buffer contents: identical buffers always yield
/// identical records. Statistical fields that cannot be computed for tiny
/// buffers are zero rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureRecord {
    /// Total buffer length in bytes
    pub byte_count: usize,

    /// Buffer length in kibibytes (`byte_count / 1024`)
    pub size_kb: f64,

    /// True when the buffer starts with the `RIFF` magic
    ///
    /// Always false for buffers shorter than four bytes.
    pub looks_like_wave: bool,

    /// Population variance of the first 100 byte values
    ///
    /// Only computed when more than 100 bytes exist; 0 otherwise.
    pub sample_variance: f64,

    /// Adjacent equal-byte pairs across the whole buffer, divided by `byte_count`
    ///
    /// Only computed when more than 50 bytes exist; 0 otherwise. Always in [0, 1).
    pub repetition_ratio: f64,
}

impl FeatureRecord {
    /// Record for an empty buffer
    pub fn empty() -> Self {
        Self {
            byte_count: 0,
            size_kb: 0.0,
            looks_like_wave: false,
            sample_variance: 0.0,
            repetition_ratio: 0.0,
        }
    }
}
