// Classifier - heuristic rule-based emotion labelling
//
// This module maps a FeatureRecord to one of six emotion labels through an
// ordered decision table keyed on upload size:
//
// Large uploads: sample variance picks Angry / Happy / Neutral
// Small uploads: repetition ratio picks Fearful / Sad
// Medium uploads: a weighted draw picks any of the six labels
//
// Confidence is a per-branch base plus seeded jitter. The jitter source is
// seeded from the byte count and built fresh on every call, so identical
// sizes always replay the identical draw sequence and no random state is
// shared between threads.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::features::FeatureRecord;
use crate::config::ClassifierConfig;

/// Lowest confidence ever reported
pub const MIN_CONFIDENCE: f64 = 0.60;

/// Highest confidence ever reported
pub const MAX_CONFIDENCE: f64 = 0.95;

/// EmotionLabel represents the closed set of classifier outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EmotionLabel {
    Happy,
    Angry,
    Sad,
    Neutral,
    Surprised,
    Fearful,
}

impl EmotionLabel {
    /// Every label, in table order
    pub const ALL: [EmotionLabel; 6] = [
        EmotionLabel::Happy,
        EmotionLabel::Angry,
        EmotionLabel::Sad,
        EmotionLabel::Neutral,
        EmotionLabel::Surprised,
        EmotionLabel::Fearful,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EmotionLabel::Happy => "Happy",
            EmotionLabel::Angry => "Angry",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::Neutral => "Neutral",
            EmotionLabel::Surprised => "Surprised",
            EmotionLabel::Fearful => "Fearful",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            EmotionLabel::Happy => "😊",
            EmotionLabel::Angry => "😠",
            EmotionLabel::Sad => "😢",
            EmotionLabel::Neutral => "😐",
            EmotionLabel::Surprised => "😲",
            EmotionLabel::Fearful => "😨",
        }
    }

    /// Glyph-prefixed label shown to end users, e.g. "😊 Happy"
    pub fn display_label(self) -> String {
        format!("{} {}", self.glyph(), self.name())
    }

    /// Fixed display color (hex RGB) for downstream rendering
    pub fn color(self) -> &'static str {
        match self {
            EmotionLabel::Happy => "#4CAF50",
            EmotionLabel::Angry => "#F44336",
            EmotionLabel::Sad => "#2196F3",
            EmotionLabel::Neutral => "#9E9E9E",
            EmotionLabel::Surprised => "#E91E63",
            EmotionLabel::Fearful => "#FF9800",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label weights for the medium-size tier (sum to 1.0)
pub const LABEL_WEIGHTS: [(EmotionLabel, f64); 6] = [
    (EmotionLabel::Happy, 0.25),
    (EmotionLabel::Angry, 0.20),
    (EmotionLabel::Sad, 0.15),
    (EmotionLabel::Neutral, 0.20),
    (EmotionLabel::Surprised, 0.10),
    (EmotionLabel::Fearful, 0.10),
];

/// Map a uniform draw in [0, 1) to a label by walking the cumulative weights
///
/// The label whose cumulative band contains `draw` wins. Draws past the
/// final band (float rounding) fall to the last label.
pub fn pick_weighted(draw: f64) -> EmotionLabel {
    let mut cumulative = 0.0;
    for (label, weight) in LABEL_WEIGHTS {
        cumulative += weight;
        if draw < cumulative {
            return label;
        }
    }
    LABEL_WEIGHTS[LABEL_WEIGHTS.len() - 1].0
}

/// Call-scoped uniform random source seeded from an upload size
pub struct JitterSource {
    rng: StdRng,
}

impl JitterSource {
    pub fn for_byte_count(byte_count: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(byte_count as u64),
        }
    }

    /// Next uniform draw in [0, 1)
    pub fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Size tier selected by the first level of the decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SizeTier {
    Large,
    Small,
    Medium,
}

/// Outcome of one classification call
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassificationResult {
    /// Detected emotion
    pub label: EmotionLabel,
    /// Confidence score, always within [MIN_CONFIDENCE, MAX_CONFIDENCE]
    pub confidence: f64,
}

/// EmotionClassifier applies the tiered decision table
///
/// Holds only thresholds; safe to share across threads.
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    config: ClassifierConfig,
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl EmotionClassifier {
    /// Create a new EmotionClassifier with the given thresholds
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Select the size tier for a record
    ///
    /// Large is checked first, then small; everything in between
    /// (boundaries included) is medium.
    pub fn tier(&self, features: &FeatureRecord) -> SizeTier {
        if features.size_kb > self.config.large_upload_kb {
            SizeTier::Large
        } else if features.size_kb < self.config.small_upload_kb {
            SizeTier::Small
        } else {
            SizeTier::Medium
        }
    }

    /// Classify a feature record
    ///
    /// Decision tree (first match wins):
    /// 1. Large: variance > angry threshold → Angry (0.85 + r·0.10)
    ///    variance > happy threshold → Happy (0.80 + r·0.15), else Neutral (0.70 + r·0.15)
    /// 2. Small: repetition > fearful threshold → Fearful (0.75 + r·0.15), else Sad (0.65 + r·0.20)
    /// 3. Medium: weighted draw over LABEL_WEIGHTS, then 0.70 + r·0.20
    ///
    /// # Returns
    /// ClassificationResult with confidence clamped to [0.60, 0.95]
    pub fn classify(&self, features: &FeatureRecord) -> ClassificationResult {
        let mut jitter = JitterSource::for_byte_count(features.byte_count);

        let (label, base, span) = match self.tier(features) {
            SizeTier::Large => {
                if features.sample_variance > self.config.angry_variance {
                    (EmotionLabel::Angry, 0.85, 0.10)
                } else if features.sample_variance > self.config.happy_variance {
                    (EmotionLabel::Happy, 0.80, 0.15)
                } else {
                    (EmotionLabel::Neutral, 0.70, 0.15)
                }
            }
            SizeTier::Small => {
                if features.repetition_ratio > self.config.fearful_repetition {
                    (EmotionLabel::Fearful, 0.75, 0.15)
                } else {
                    (EmotionLabel::Sad, 0.65, 0.20)
                }
            }
            SizeTier::Medium => (pick_weighted(jitter.next_unit()), 0.70, 0.20),
        };

        let confidence = (base + jitter.next_unit() * span).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

        tracing::debug!(
            "[Classifier] {} bytes → {} ({:.3})",
            features.byte_count,
            label,
            confidence
        );

        ClassificationResult { label, confidence }
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
