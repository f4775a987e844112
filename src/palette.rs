//! The escape-time palette.
//!
//! One color per possible iteration count.  Hue climbs by 1/256 of the
//! wheel per step and keeps climbing past a full turn (the conversion
//! wraps it), saturation is pinned at 1, and value rises from 0 toward
//! 1 as `i / (i + 8)`, so quick escapes are dark and slow ones bright.

use image::Rgb;

/// Hue steps per full turn of the color wheel.
const HUE_STEPS: f64 = 256.0;

/// How slowly the value channel approaches full brightness.
const VALUE_KNEE: f64 = 8.0;

/// Convert a hue/saturation/value triple to red/green/blue fractions.
/// All inputs are fractions of a full range; `h` may exceed 1.0, in
/// which case the sector index wraps modulo 6.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0) as i64;
    let f = h * 6.0 - sector as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector.rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Scale a fraction to a channel byte, truncating.
#[inline]
fn channel(fraction: f64) -> u8 {
    (fraction * 255.0) as u8
}

/// A lookup table from escape time to color.  Built once, read-only
/// afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette(Vec<Rgb<u8>>);

impl Palette {
    /// Build a palette of `iterations` colors.
    pub fn new(iterations: usize) -> Palette {
        let colors: Vec<Rgb<u8>> = (0..iterations)
            .map(|i| {
                let i = i as f64;
                let (r, g, b) = hsv_to_rgb(i / HUE_STEPS, 1.0, i / (i + VALUE_KNEE));
                Rgb([channel(r), channel(g), channel(b)])
            })
            .collect();
        debug!("built palette of {} colors", colors.len());
        trace!("palette: {:?}", colors);
        Palette(colors)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The color at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<Rgb<u8>> {
        self.0.get(index).cloned()
    }
}
