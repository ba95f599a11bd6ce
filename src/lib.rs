// Speech Emotion - toy signal-to-label classifier
// Byte-level features → rule table + seeded jitter → emotion label,
// plus a synthetic waveform/spectrum image for display.

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod visualization;

// Re-exports for convenience
pub use analysis::{
    AnalysisReport, Analyzer, ClassificationResult, EmotionClassifier, EmotionLabel,
    FeatureExtractor, FeatureRecord,
};
pub use config::AppConfig;
pub use visualization::{SyntheticVisualizer, VisualizationImage};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, honouring `RUST_LOG` (default `info`)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Analyze an upload with default configuration
pub fn analyze(bytes: &[u8]) -> AnalysisReport {
    Analyzer::default().analyze(bytes)
}
