// Statistics module - byte-level "energy" and "pattern" measures
//
// These are statistics over raw byte values, not over decoded samples.
// They stand in for loudness and periodicity in the rule table.

/// Number of leading bytes the variance is taken over
pub const VARIANCE_WINDOW: usize = 100;

/// Variance is computed only for buffers longer than this
pub const VARIANCE_MIN_LEN: usize = 100;

/// Repetition ratio is computed only for buffers longer than this
pub const REPETITION_MIN_LEN: usize = 50;

/// Population variance of the leading byte values
///
/// Formula: Var = (1 / N) × Σ(x[n] - mean)², over the first
/// `VARIANCE_WINDOW` bytes.
///
/// # Returns
/// Variance, or 0.0 when the buffer holds `VARIANCE_MIN_LEN` bytes or fewer
pub fn leading_variance(buffer: &[u8]) -> f64 {
    if buffer.len() <= VARIANCE_MIN_LEN {
        return 0.0;
    }

    let window = &buffer[..VARIANCE_WINDOW];
    let n = window.len() as f64;
    let mean = window.iter().map(|&b| b as f64).sum::<f64>() / n;

    window
        .iter()
        .map(|&b| {
            let d = b as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

/// Fraction of adjacent byte pairs that are equal
///
/// Counts pairs over the entire buffer but divides by the buffer length, not
/// the pair count, so the ratio never reaches 1.0.
///
/// # Returns
/// Ratio in [0, 1), or 0.0 when the buffer holds `REPETITION_MIN_LEN` bytes or fewer
pub fn repetition_ratio(buffer: &[u8]) -> f64 {
    if buffer.len() <= REPETITION_MIN_LEN {
        return 0.0;
    }

    let repeats = buffer.windows(2).filter(|pair| pair[0] == pair[1]).count();
    repeats as f64 / buffer.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_threshold() {
        // 100 bytes is not enough, 101 is
        let mut buffer: Vec<u8> = (0..100).map(|i| if i % 2 == 0 { 0 } else { 20 }).collect();
        assert_eq!(leading_variance(&buffer), 0.0);

        buffer.push(255);
        assert!((leading_variance(&buffer) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_variance_ignores_tail() {
        let mut buffer = vec![7u8; 100];
        buffer.extend(std::iter::repeat(200u8).take(1000));
        assert_eq!(leading_variance(&buffer), 0.0);
    }

    #[test]
    fn test_variance_known_value() {
        // Alternating 0/16 has mean 8 and variance 64
        let buffer: Vec<u8> = (0..512).map(|i| if i % 2 == 0 { 0 } else { 16 }).collect();
        assert!((leading_variance(&buffer) - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_repetition_threshold() {
        let buffer = vec![0u8; 50];
        assert_eq!(repetition_ratio(&buffer), 0.0);

        let buffer = vec![0u8; 51];
        assert!((repetition_ratio(&buffer) - 50.0 / 51.0).abs() < 1e-12);
    }

    #[test]
    fn test_repetition_counts_whole_buffer() {
        // Distinct bytes up front, a run of repeats far past the variance window
        let mut buffer: Vec<u8> = (0..=255).collect();
        buffer.extend(std::iter::repeat(9u8).take(257));
        let expected = 256.0 / buffer.len() as f64;
        assert!((repetition_ratio(&buffer) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_repetition_no_pairs() {
        let buffer: Vec<u8> = (0..200).map(|i| (i % 2) as u8).collect();
        assert_eq!(repetition_ratio(&buffer), 0.0);
    }
}
