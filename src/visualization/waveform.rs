// Waveform module - synthetic time-domain curve
//
// Two sinusoids whose frequencies come from the upload size, plus Gaussian
// noise scaled by the byte variance, peak-normalized to [-1, 1]. Nothing
// here reads the upload itself.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::features::FeatureRecord;
use crate::config::VisualizationConfig;

/// Base frequency of the first sinusoid in Hz
pub const BASE_FREQUENCY_HZ: f64 = 220.0;

/// Base frequency of the second sinusoid in Hz
pub const OVERTONE_BASE_HZ: f64 = 440.0;

/// Noise amplitude ceiling
pub const MAX_NOISE_LEVEL: f64 = 0.2;

/// Frequencies (f1, f2) of the two sinusoids for an upload size
///
/// f1 = 220 + (n mod 100), f2 = 440 + (n mod 200)
pub fn sinusoid_frequencies(byte_count: usize) -> (f64, f64) {
    (
        BASE_FREQUENCY_HZ + (byte_count % 100) as f64,
        OVERTONE_BASE_HZ + (byte_count % 200) as f64,
    )
}

/// Noise amplitude for a record: min(variance / 100, 0.2)
pub fn noise_level(features: &FeatureRecord) -> f64 {
    (features.sample_variance / 100.0).min(MAX_NOISE_LEVEL)
}

/// Evenly spaced sample times over [0, duration], endpoints included
pub fn sample_times(duration_secs: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = duration_secs / (count - 1) as f64;
            (0..count).map(|i| i as f64 * step).collect()
        }
    }
}

/// Synthetic waveform with its time axis
#[derive(Debug, Clone)]
pub struct SyntheticWaveform {
    pub times: Vec<f64>,
    pub samples: Vec<f64>,
    pub duration_secs: f64,
}

impl SyntheticWaveform {
    /// Build the waveform for a record
    ///
    /// w(t) = 0.5·sin(2π f1 t) + 0.3·sin(2π f2 t + π/4) + noise, then divided
    /// by max|w| when that peak is non-zero. The noise generator is seeded
    /// from `byte_count`, so the curve is reproducible.
    pub fn synthesize(features: &FeatureRecord, byte_count: usize, config: &VisualizationConfig) -> Self {
        let raw_count = config.duration_secs * config.sample_rate as f64;
        let count = if raw_count.is_finite() { raw_count.max(0.0) as usize } else { 0 };
        let times = sample_times(config.duration_secs, count);
        let (f1, f2) = sinusoid_frequencies(byte_count);
        let level = noise_level(features);
        let mut rng = StdRng::seed_from_u64(byte_count as u64);

        let mut samples: Vec<f64> = times
            .iter()
            .map(|&t| {
                let tone = 0.5 * (2.0 * PI * f1 * t).sin()
                    + 0.3 * (2.0 * PI * f2 * t + PI / 4.0).sin();
                if level > 0.0 {
                    tone + level * standard_normal(&mut rng)
                } else {
                    tone
                }
            })
            .collect();

        let peak = samples.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));
        if peak > 0.0 {
            for sample in &mut samples {
                *sample /= peak;
            }
        }

        Self {
            times,
            samples,
            duration_secs: config.duration_secs,
        }
    }

    /// Index of the first NaN or infinite sample, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.samples.iter().position(|s| !s.is_finite())
    }
}

/// Standard normal draw (Box-Muller)
fn standard_normal(rng: &mut StdRng) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
