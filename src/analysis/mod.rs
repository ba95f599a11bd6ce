// Analysis module - byte-level emotion analysis pipeline
//
// Architecture:
// - Pipeline: FeatureExtractor → EmotionClassifier, with SyntheticVisualizer
//   consuming the same FeatureRecord independently
// - Output: AnalysisReport (features, label + confidence, optional image)
//
// Every stage is synchronous and pure. A rendering failure is logged and
// reported as an absent image; it never hides the classification.

pub mod classifier;
pub mod features;

pub use classifier::{ClassificationResult, EmotionClassifier, EmotionLabel};
pub use features::{FeatureExtractor, FeatureRecord};

use crate::config::AppConfig;
use crate::error::log_visualization_error;
use crate::visualization::{SyntheticVisualizer, VisualizationImage};

/// Result of analyzing one upload
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Features derived from the upload
    pub features: FeatureRecord,
    /// Detected emotion and confidence
    pub classification: ClassificationResult,
    /// Synthetic visualization, absent when rendering failed
    pub visualization: Option<VisualizationImage>,
}

/// Analyzer wires the three stages together
///
/// Holds configuration only, so a single instance can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    extractor: FeatureExtractor,
    classifier: EmotionClassifier,
    visualizer: SyntheticVisualizer,
}

impl Analyzer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            classifier: EmotionClassifier::new(config.classifier.clone()),
            visualizer: SyntheticVisualizer::new(config.visualization.clone()),
        }
    }

    /// Feature extraction only
    pub fn features(&self, bytes: &[u8]) -> FeatureRecord {
        self.extractor.extract(bytes)
    }

    /// Run the full pipeline on an upload
    ///
    /// Total over byte buffers: empty input yields zeroed features and a
    /// small-tier label.
    pub fn analyze(&self, bytes: &[u8]) -> AnalysisReport {
        let features = self.extractor.extract(bytes);
        let classification = self.classifier.classify(&features);

        let visualization = match self.visualizer.render(&features, features.byte_count) {
            Ok(image) => Some(image),
            Err(err) => {
                log_visualization_error(&err, "Analyzer::analyze");
                None
            }
        };

        tracing::info!(
            "[Analyzer] {} bytes (wave={}, var={:.1}, rep={:.3}) → {} {:.2}{}",
            features.byte_count,
            features.looks_like_wave,
            features.sample_variance,
            features.repetition_ratio,
            classification.label,
            classification.confidence,
            if visualization.is_some() { "" } else { " (no image)" }
        );

        AnalysisReport {
            features,
            classification,
            visualization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualizationConfig;

    fn fast_config() -> AppConfig {
        AppConfig {
            visualization: VisualizationConfig {
                width: 240,
                height: 160,
                sample_rate: 1000,
                ..VisualizationConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_analyze_empty_buffer() {
        let report = Analyzer::new(&fast_config()).analyze(&[]);
        assert_eq!(report.features, FeatureRecord::empty());
        assert_eq!(report.classification.label, EmotionLabel::Sad);
        assert!(report.visualization.is_some());
    }

    #[test]
    fn test_render_failure_keeps_classification() {
        let mut config = fast_config();
        config.visualization.width = 0;
        let analyzer = Analyzer::new(&config);

        let bytes = vec![5u8; 2000];
        let report = analyzer.analyze(&bytes);
        assert!(report.visualization.is_none());

        let expected = EmotionClassifier::default().classify(&FeatureExtractor::new().extract(&bytes));
        assert_eq!(report.classification, expected);
    }

    #[test]
    fn test_oversized_grid_keeps_classification() {
        let mut config = fast_config();
        config.visualization.frequency_bins = usize::MAX / 2;
        config.visualization.time_bins = 4;
        let analyzer = Analyzer::new(&config);

        let bytes = vec![1u8; 5000];
        let report = analyzer.analyze(&bytes);
        assert!(report.visualization.is_none());

        let expected = EmotionClassifier::default().classify(&FeatureExtractor::new().extract(&bytes));
        assert_eq!(report.classification, expected);
    }

    #[test]
    fn test_features_matches_analyze() {
        let analyzer = Analyzer::new(&fast_config());
        let bytes: Vec<u8> = (0..3000u32).map(|i| (i * 7 % 256) as u8).collect();
        assert_eq!(analyzer.features(&bytes), analyzer.analyze(&bytes).features);
    }

    #[test]
    fn test_analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }
}
