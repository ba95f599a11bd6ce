// Colormap module - scalar → RGB for the heat-map panel

/// Viridis anchor colors at t = 0, 0.25, 0.5, 0.75, 1
const VIRIDIS_STOPS: [[f32; 3]; 5] = [
    [0.267, 0.005, 0.329],
    [0.229, 0.322, 0.546],
    [0.128, 0.567, 0.551],
    [0.369, 0.789, 0.383],
    [0.993, 0.906, 0.144],
];

/// Map a normalized intensity in [0, 1] to a viridis-like RGB triple
///
/// Piecewise-linear between five anchors; out-of-range input is clamped.
pub fn viridis(t: f32) -> [u8; 3] {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let segments = (VIRIDIS_STOPS.len() - 1) as f32;
    let pos = t * segments;
    let index = (pos as usize).min(VIRIDIS_STOPS.len() - 2);
    let s = pos - index as f32;

    let lo = VIRIDIS_STOPS[index];
    let hi = VIRIDIS_STOPS[index + 1];
    let mut rgb = [0u8; 3];
    for c in 0..3 {
        rgb[c] = ((lo[c] + (hi[c] - lo[c]) * s) * 255.0).round() as u8;
    }
    rgb
}

/// Alpha-blend `color` over `background`
pub fn blend(color: [u8; 3], background: [u8; 3], alpha: f32) -> [u8; 3] {
    let a = alpha.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for c in 0..3 {
        out[c] = (color[c] as f32 * a + background[c] as f32 * (1.0 - a)).round() as u8;
    }
    out
}
