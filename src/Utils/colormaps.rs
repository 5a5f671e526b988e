use plotters::style::RGBColor;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use strum_macros::{Display, EnumString};

/// normalized position of step i on the time axis of the whole run,
/// i / (num_steps - 1), so the first step maps to 0.0 and the last one to 1.0.
/// For num_steps <= 1 the denominator degenerates and the index is defined
/// to be 0.0 instead of dividing by zero.
pub fn color_index(i: usize, num_steps: usize) -> f64 {
    if num_steps <= 1 {
        return 0.0;
    }
    let h = i as f64 / (num_steps - 1) as f64;
    h.clamp(0.0, 1.0)
}

/// num_steps values evenly covering [0, 1], one per trajectory segment
pub fn time_color_scale(num_steps: usize) -> Vec<f64> {
    (0..num_steps).map(|i| color_index(i, num_steps)).collect()
}

// control stops of the plasma palette, interpolated linearly between
// the 0.0, 0.25, 0.5, 0.75, 1.0 anchors
const PLASMA_STOPS: [(f64, f64, f64); 5] = [
    (13.0, 8.0, 135.0),   // dark violet      (0.00)
    (126.0, 3.0, 168.0),  // magenta          (0.25)
    (204.0, 71.0, 120.0), // pink-red         (0.50)
    (248.0, 149.0, 64.0), // orange           (0.75)
    (240.0, 249.0, 33.0), // yellow           (1.00)
];

/// which palette to use when coloring the trajectory by time progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TimeColorMap {
    #[strum(serialize = "viridis")]
    Viridis,
    #[strum(serialize = "plasma")]
    Plasma,
}

impl Default for TimeColorMap {
    fn default() -> Self {
        TimeColorMap::Viridis
    }
}

impl TimeColorMap {
    /// map a normalized time progression value in [0, 1] to a color;
    /// out of range input is clamped
    pub fn get(&self, h: f64) -> RGBColor {
        let h = h.clamp(0.0, 1.0);
        match self {
            TimeColorMap::Viridis => ViridisRGB.get_color(h as f32),
            TimeColorMap::Plasma => {
                let seg = h * 4.0;
                let i = (seg as usize).min(3);
                let s = seg - i as f64;
                let (r0, g0, b0) = PLASMA_STOPS[i];
                let (r1, g1, b1) = PLASMA_STOPS[i + 1];
                RGBColor(
                    (r0 + s * (r1 - r0)) as u8,
                    (g0 + s * (g1 - g0)) as u8,
                    (b0 + s * (b1 - b0)) as u8,
                )
            }
        }
    }
}
