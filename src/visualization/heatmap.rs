// Heat-map module - synthetic frequency × time intensity grid
//
// A single 2D Gaussian bump: centred on the first sinusoid's frequency along
// the frequency axis and on the temporal midpoint along the time axis.

use crate::config::VisualizationConfig;

/// Spread of the bump along the frequency axis (Hz²)
pub const FREQUENCY_SPREAD: f64 = 100_000.0;

/// Spread of the bump along the normalized time axis
pub const TIME_SPREAD: f64 = 0.1;

/// Row-major intensity grid, row 0 is the lowest frequency
#[derive(Debug, Clone)]
pub struct IntensityGrid {
    frequency_bins: usize,
    time_bins: usize,
    max_frequency_hz: f64,
    values: Vec<f64>,
}

impl IntensityGrid {
    /// Build the Gaussian bump centred on `center_hz`
    ///
    /// intensity[i][j] = exp(-(f_i - center)² / 100000) · exp(-(j / T - 0.5)² / 0.1)
    /// where f_i is evenly spaced over [0, max_frequency_hz] and T is the
    /// number of time bins.
    pub fn gaussian_bump(center_hz: f64, config: &VisualizationConfig) -> Self {
        let frequency_bins = config.frequency_bins;
        let time_bins = config.time_bins;
        let frequencies = frequency_axis(config.max_frequency_hz, frequency_bins);

        let time_profile: Vec<f64> = (0..time_bins)
            .map(|j| {
                let x = j as f64 / time_bins as f64 - 0.5;
                (-(x * x) / TIME_SPREAD).exp()
            })
            .collect();

        let mut values = Vec::with_capacity(frequency_bins * time_bins);
        for f in &frequencies {
            let d = f - center_hz;
            let frequency_weight = (-(d * d) / FREQUENCY_SPREAD).exp();
            values.extend(time_profile.iter().map(|t| frequency_weight * t));
        }

        Self {
            frequency_bins,
            time_bins,
            max_frequency_hz: config.max_frequency_hz,
            values,
        }
    }

    pub fn frequency_bins(&self) -> usize {
        self.frequency_bins
    }

    pub fn time_bins(&self) -> usize {
        self.time_bins
    }

    pub fn max_frequency_hz(&self) -> f64 {
        self.max_frequency_hz
    }

    /// Intensity at (frequency row, time column)
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.time_bins + col]
    }

    /// (min, max) over the grid, (0, 0) when empty
    pub fn range(&self) -> (f64, f64) {
        if self.values.is_empty() {
            return (0.0, 0.0);
        }
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Grid cell holding the maximum intensity
    pub fn peak(&self) -> Option<(usize, usize)> {
        let (index, _) = self
            .values
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((i, v)),
            })?;
        Some((index / self.time_bins, index % self.time_bins))
    }
}

/// Evenly spaced frequencies over [0, max_hz], endpoints included
pub fn frequency_axis(max_hz: f64, bins: usize) -> Vec<f64> {
    match bins {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = max_hz / (bins - 1) as f64;
            (0..bins).map(|i| i as f64 * step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let config = VisualizationConfig::default();
        let grid = IntensityGrid::gaussian_bump(300.0, &config);
        assert_eq!(grid.frequency_bins(), 100);
        assert_eq!(grid.time_bins(), 100);
        assert_eq!(grid.max_frequency_hz(), 5000.0);
    }

    #[test]
    fn test_peak_at_center_frequency_and_midpoint() {
        let config = VisualizationConfig::default();
        // Centre exactly on row 6 (~303 Hz)
        let center = frequency_axis(5000.0, 100)[6];
        let grid = IntensityGrid::gaussian_bump(center, &config);
        assert_eq!(grid.peak(), Some((6, 50)));
        assert!((grid.get(6, 50) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_values_are_bounded() {
        let config = VisualizationConfig::default();
        let grid = IntensityGrid::gaussian_bump(254.0, &config);
        let (lo, hi) = grid.range();
        assert!(lo >= 0.0);
        assert!(hi <= 1.0);
        assert!(hi > lo);
    }

    #[test]
    fn test_far_rows_fade_out() {
        let config = VisualizationConfig::default();
        let grid = IntensityGrid::gaussian_bump(220.0, &config);
        assert!(grid.get(99, 50) < 1e-12);
    }

    #[test]
    fn test_frequency_axis() {
        let axis = frequency_axis(5000.0, 100);
        assert_eq!(axis.len(), 100);
        assert_eq!(axis[0], 0.0);
        assert!((axis[99] - 5000.0).abs() < 1e-9);
    }
}
