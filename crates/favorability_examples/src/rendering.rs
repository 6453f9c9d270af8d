//! PNG rendering of favorability grids and histogram comparisons.
use std::path::Path;

use favorability::prelude::{HistogramComparison, Raster};
use image::{Rgb, RgbImage};

/// Output image settings for raster rendering.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Pixels per raster cell.
    pub scale: u32,
    /// Color for cells with value 0.
    pub low: [u8; 3],
    /// Color for cells with value 1.
    pub high: [u8; 3],
    /// Color for nodata cells.
    pub nodata: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 8,
            low: [20, 24, 82],
            high: [250, 200, 40],
            nodata: [0, 0, 0],
        }
    }
}

impl RenderConfig {
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_colors(mut self, low: [u8; 3], high: [u8; 3]) -> Self {
        self.low = low;
        self.high = high;
        self
    }
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgb([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])])
}

/// Render a `[0, 1]` raster as a two-color ramp, north row at the top.
pub fn render_raster_to_png(
    raster: &Raster,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (rows, cols) = raster.shape();
    let s = config.scale;
    let mut img = RgbImage::new(cols as u32 * s, rows as u32 * s);

    for row in 0..rows {
        for col in 0..cols {
            let v = raster.get(row, col).unwrap_or(f32::NAN);
            let color = if raster.is_valid(v) {
                lerp_color(config.low, config.high, v)
            } else {
                Rgb(config.nodata)
            };
            for dy in 0..s {
                for dx in 0..s {
                    img.put_pixel(col as u32 * s + dx, row as u32 * s + dy, color);
                }
            }
        }
    }

    img.save(path.as_ref())?;
    Ok(())
}

/// Histogram chart settings.
#[derive(Clone, Debug)]
pub struct HistogramStyle {
    pub size: (u32, u32),
    pub background: [u8; 3],
    pub foreground_color: [u8; 3],
    pub background_color: [u8; 3],
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            size: (800, 500),
            background: [250, 250, 250],
            foreground_color: [31, 119, 180],
            background_color: [255, 127, 14],
        }
    }
}

/// Draw foreground and background bars side by side within each shared bin.
pub fn render_histograms_to_png(
    cmp: &HistogramComparison,
    style: &HistogramStyle,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = style.size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(style.background));
    let bins = (cmp.foreground.bins() as u32).max(1);
    let max_count = cmp.max_count().max(1) as f32;
    let bin_w = (w / bins).max(2);
    let bar_w = bin_w / 2;

    let series = [
        (&cmp.foreground, style.foreground_color, 0),
        (&cmp.background, style.background_color, bar_w),
    ];
    for (hist, color, offset) in series {
        for (i, &count) in hist.counts.iter().enumerate() {
            let bar_h = ((count as f32 / max_count) * (h as f32 - 1.0)).round() as u32;
            let x0 = i as u32 * bin_w + offset;
            for x in x0..(x0 + bar_w).min(w) {
                for y in (h - bar_h)..h {
                    img.put_pixel(x, y, Rgb(color));
                }
            }
        }
    }

    img.save(path.as_ref())?;
    Ok(())
}
