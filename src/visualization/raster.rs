// Raster module - draws both panels into an RGB image and encodes PNG
//
// Layout (top to bottom): waveform panel, gap, heat-map panel. Both panels
// share the same horizontal extent; the heat-map colour bar sits in the
// right margin. No text is drawn.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use super::colormap::{blend, viridis};
use super::heatmap::IntensityGrid;
use super::waveform::SyntheticWaveform;
use crate::error::VisualizationError;

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 100;
const MARGIN_VERTICAL: u32 = 20;
const PANEL_GAP: u32 = 40;
const COLORBAR_OFFSET: u32 = 20;
const COLORBAR_WIDTH: u32 = 20;

/// Smallest usable panel edge in pixels
pub const MIN_PANEL_EDGE: u32 = 16;

const WHITE: [u8; 3] = [255, 255, 255];
const AXIS: [u8; 3] = [64, 64, 64];
const GRID: [u8; 3] = [179, 179, 179];
const CURVE: [u8; 3] = [0, 0, 255];
const CURVE_ALPHA: f32 = 0.8;
const FILL_ALPHA: f32 = 0.3;
const GRID_ALPHA: f32 = 0.3;
const HEATMAP_ALPHA: f32 = 0.8;

/// Pixel rectangle of one plot area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PanelRect {
    fn right(&self) -> u32 {
        self.x + self.width - 1
    }

    fn bottom(&self) -> u32 {
        self.y + self.height - 1
    }
}

/// Split a canvas into (waveform, heat map) panels
///
/// # Returns
/// Err(InvalidDimensions) when either panel would be smaller than MIN_PANEL_EDGE
pub fn layout(width: u32, height: u32) -> Result<(PanelRect, PanelRect), VisualizationError> {
    let invalid = VisualizationError::InvalidDimensions { width, height };

    let plot_width = width
        .checked_sub(MARGIN_LEFT + MARGIN_RIGHT)
        .ok_or_else(|| invalid.clone())?;
    let panel_height = height
        .checked_sub(2 * MARGIN_VERTICAL + PANEL_GAP)
        .ok_or_else(|| invalid.clone())?
        / 2;

    if plot_width < MIN_PANEL_EDGE || panel_height < MIN_PANEL_EDGE {
        return Err(invalid);
    }

    let top = PanelRect {
        x: MARGIN_LEFT,
        y: MARGIN_VERTICAL,
        width: plot_width,
        height: panel_height,
    };
    let bottom = PanelRect {
        x: MARGIN_LEFT,
        y: MARGIN_VERTICAL + panel_height + PANEL_GAP,
        width: plot_width,
        height: panel_height,
    };
    Ok((top, bottom))
}

/// Render both panels into a fresh white canvas
pub fn draw(
    width: u32,
    height: u32,
    waveform: &SyntheticWaveform,
    grid: &IntensityGrid,
) -> Result<RgbImage, VisualizationError> {
    let (top, bottom) = layout(width, height)?;
    let mut canvas = RgbImage::from_pixel(width, height, Rgb(WHITE));

    draw_grid_lines(&mut canvas, top);
    draw_waveform(&mut canvas, top, &waveform.samples);
    draw_frame(&mut canvas, top);

    draw_heatmap(&mut canvas, bottom, grid);
    draw_frame(&mut canvas, bottom);
    draw_colorbar(&mut canvas, bottom);

    Ok(canvas)
}

/// Encode a canvas as PNG bytes
pub fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, VisualizationError> {
    let mut png = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

fn put(canvas: &mut RgbImage, x: u32, y: u32, color: [u8; 3]) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, Rgb(color));
    }
}

fn put_blended(canvas: &mut RgbImage, x: u32, y: u32, color: [u8; 3], alpha: f32) {
    if x < canvas.width() && y < canvas.height() {
        let under = canvas.get_pixel(x, y).0;
        canvas.put_pixel(x, y, Rgb(blend(color, under, alpha)));
    }
}

/// Map an amplitude in [-1, 1] to a row inside `rect` (+1 at the top)
fn amplitude_to_row(rect: PanelRect, value: f64) -> u32 {
    let v = value.clamp(-1.0, 1.0);
    let span = (rect.height - 1) as f64;
    rect.y + ((1.0 - (v + 1.0) / 2.0) * span).round() as u32
}

fn draw_frame(canvas: &mut RgbImage, rect: PanelRect) {
    for x in rect.x..=rect.right() {
        put(canvas, x, rect.y, AXIS);
        put(canvas, x, rect.bottom(), AXIS);
    }
    for y in rect.y..=rect.bottom() {
        put(canvas, rect.x, y, AXIS);
        put(canvas, rect.right(), y, AXIS);
    }
}

fn draw_grid_lines(canvas: &mut RgbImage, rect: PanelRect) {
    // Vertical lines every half second of the 3 s axis, horizontal every 0.5 amplitude
    const COLUMNS: u32 = 6;
    const ROWS: u32 = 4;
    for i in 1..COLUMNS {
        let x = rect.x + i * (rect.width - 1) / COLUMNS;
        for y in rect.y..=rect.bottom() {
            put_blended(canvas, x, y, GRID, GRID_ALPHA);
        }
    }
    for i in 1..ROWS {
        let y = rect.y + i * (rect.height - 1) / ROWS;
        for x in rect.x..=rect.right() {
            put_blended(canvas, x, y, GRID, GRID_ALPHA);
        }
    }
}

/// Min/max envelope per pixel column, filled down (or up) to the zero line
fn draw_waveform(canvas: &mut RgbImage, rect: PanelRect, samples: &[f64]) {
    if samples.is_empty() {
        return;
    }

    let zero_row = amplitude_to_row(rect, 0.0);
    let columns = rect.width as usize;
    let mut previous: Option<(u32, u32)> = None;

    for px in 0..columns {
        let i0 = px * samples.len() / columns;
        let i1 = ((px + 1) * samples.len() / columns).max(i0 + 1).min(samples.len());
        if i0 >= samples.len() {
            break;
        }

        let (lo, hi) = samples[i0..i1]
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));

        let x = rect.x + px as u32;
        let mut y_top = amplitude_to_row(rect, hi);
        let mut y_bottom = amplitude_to_row(rect, lo);

        // Fill between curve and zero line
        let fill_from = y_top.min(zero_row);
        let fill_to = y_bottom.max(zero_row);
        for y in fill_from..=fill_to {
            put_blended(canvas, x, y, CURVE, FILL_ALPHA);
        }

        // Join to the previous column so sparse envelopes stay connected
        if let Some((prev_top, prev_bottom)) = previous {
            y_top = y_top.min(prev_bottom);
            y_bottom = y_bottom.max(prev_top);
        }
        for y in y_top..=y_bottom {
            put_blended(canvas, x, y, CURVE, CURVE_ALPHA);
        }

        previous = Some((amplitude_to_row(rect, hi), amplitude_to_row(rect, lo)));
    }
}

/// Nearest-neighbour scale of the grid, lowest frequency at the bottom
fn draw_heatmap(canvas: &mut RgbImage, rect: PanelRect, grid: &IntensityGrid) {
    let rows = grid.frequency_bins();
    let cols = grid.time_bins();
    if rows == 0 || cols == 0 {
        return;
    }

    let (lo, hi) = grid.range();
    let span = hi - lo;

    for py in 0..rect.height {
        let row = (((rect.height - 1 - py) as usize * rows) / rect.height as usize).min(rows - 1);
        for px in 0..rect.width {
            let col = ((px as usize * cols) / rect.width as usize).min(cols - 1);
            let t = if span > 0.0 {
                (grid.get(row, col) - lo) / span
            } else {
                0.0
            };
            put_blended(
                canvas,
                rect.x + px,
                rect.y + py,
                viridis(t as f32),
                HEATMAP_ALPHA,
            );
        }
    }
}

fn draw_colorbar(canvas: &mut RgbImage, rect: PanelRect) {
    let bar = PanelRect {
        x: rect.right() + COLORBAR_OFFSET,
        y: rect.y,
        width: COLORBAR_WIDTH,
        height: rect.height,
    };
    for py in 0..bar.height {
        let t = 1.0 - py as f32 / (bar.height - 1) as f32;
        let color = blend(viridis(t), WHITE, HEATMAP_ALPHA);
        for px in 0..bar.width {
            put(canvas, bar.x + px, bar.y + py, color);
        }
    }
    draw_frame(canvas, bar);
}
