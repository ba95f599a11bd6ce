//! Synthetic visualization of an analyzed upload.
//!
//! Purely decorative and never consulted by the classifier. The picture is a
//! deterministic function of the feature record and the byte count: a
//! two-tone waveform on top and a Gaussian "spectrum" heat map below.

mod colormap;
mod heatmap;
mod raster;
mod waveform;

pub use heatmap::IntensityGrid;
pub use waveform::{sinusoid_frequencies, SyntheticWaveform};

use raster::layout;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::analysis::features::FeatureRecord;
use crate::config::VisualizationConfig;
use crate::error::VisualizationError;

/// Largest heat-map grid (frequency bins × time bins) rendered
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Largest synthetic waveform (duration × sample rate) rendered
pub const MAX_WAVEFORM_SAMPLES: usize = 1 << 22;

/// Reject synthesis parameters that are not finite or exceed the caps
fn check_synthesis_limits(config: &VisualizationConfig) -> Result<(), VisualizationError> {
    let cells = config.frequency_bins.checked_mul(config.time_bins);
    if !matches!(cells, Some(n) if n <= MAX_GRID_CELLS) {
        return Err(VisualizationError::InvalidGrid {
            reason: format!(
                "{}x{} heat-map bins exceed {} cells",
                config.frequency_bins, config.time_bins, MAX_GRID_CELLS
            ),
        });
    }
    if !config.max_frequency_hz.is_finite() {
        return Err(VisualizationError::InvalidGrid {
            reason: format!("max frequency {} Hz is not finite", config.max_frequency_hz),
        });
    }
    if !config.duration_secs.is_finite() || config.duration_secs < 0.0 {
        return Err(VisualizationError::InvalidGrid {
            reason: format!("duration {} s is not a finite non-negative value", config.duration_secs),
        });
    }
    let samples = config.duration_secs * config.sample_rate as f64;
    if samples > MAX_WAVEFORM_SAMPLES as f64 {
        return Err(VisualizationError::InvalidGrid {
            reason: format!("{} waveform samples exceed {}", samples, MAX_WAVEFORM_SAMPLES),
        });
    }
    Ok(())
}

/// Encoded raster image (PNG)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizationImage {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl VisualizationImage {
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Standard base64 of the PNG bytes, for JSON transport
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.png)
    }
}

/// Renders the two-panel synthetic visualization
#[derive(Debug, Clone, Default)]
pub struct SyntheticVisualizer {
    config: VisualizationConfig,
}

impl SyntheticVisualizer {
    pub fn new(config: VisualizationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VisualizationConfig {
        &self.config
    }

    /// Render the visualization for a record
    ///
    /// # Arguments
    /// * `features` - Record whose variance drives the noise level
    /// * `byte_count` - Original upload length; drives both frequencies and the noise seed
    ///
    /// # Returns
    /// A complete PNG, or an error. Never a partially written image.
    pub fn render(
        &self,
        features: &FeatureRecord,
        byte_count: usize,
    ) -> Result<VisualizationImage, VisualizationError> {
        // Fail on layout before spending time on synthesis
        layout(self.config.width, self.config.height)?;
        check_synthesis_limits(&self.config)?;

        let waveform = SyntheticWaveform::synthesize(features, byte_count, &self.config);
        if let Some(index) = waveform.first_non_finite() {
            return Err(VisualizationError::NonFiniteSample { index });
        }

        let (f1, _) = sinusoid_frequencies(byte_count);
        let grid = IntensityGrid::gaussian_bump(f1, &self.config);

        let canvas = raster::draw(self.config.width, self.config.height, &waveform, &grid)?;
        let png = raster::encode_png(&canvas)?;

        tracing::debug!(
            "[Visualizer] {} bytes → {}x{} PNG ({} bytes, f1={} Hz)",
            byte_count,
            self.config.width,
            self.config.height,
            png.len(),
            f1
        );

        Ok(VisualizationImage {
            png,
            width: self.config.width,
            height: self.config.height,
        })
    }
}
