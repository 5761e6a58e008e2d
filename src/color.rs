use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging colour map: amplitude → colour
// ---------------------------------------------------------------------------

/// Blue–white–red map over a value range, blended in linear RGB.
///
/// `lo` maps to blue, the midpoint to near-white, `hi` to red.
#[derive(Debug, Clone, Copy)]
pub struct DivergingMap {
    lo: f64,
    hi: f64,
}

const COOL: (u8, u8, u8) = (59, 76, 192);
const MID: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

impl DivergingMap {
    /// A degenerate or non-finite range widens to `[-1, 1]` around its centre
    /// so a flat field still renders.
    pub fn new(lo: f64, hi: f64) -> Self {
        if !lo.is_finite() || !hi.is_finite() {
            return DivergingMap { lo: -1.0, hi: 1.0 };
        }
        if (hi - lo).abs() < 1e-12 {
            return DivergingMap {
                lo: lo - 1.0,
                hi: hi + 1.0,
            };
        }
        DivergingMap {
            lo: lo.min(hi),
            hi: lo.max(hi),
        }
    }

    pub fn from_range(range: Option<(f64, f64)>) -> Self {
        match range {
            Some((lo, hi)) => Self::new(lo, hi),
            None => Self::new(f64::NAN, f64::NAN),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    /// Non-finite values render grey.
    pub fn color_for(&self, value: f64) -> Srgb<u8> {
        if !value.is_finite() {
            return Srgb::new(128, 128, 128);
        }
        let s = (((value - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0)) as f32;
        let (from, to, t) = if s < 0.5 {
            (COOL, MID, s * 2.0)
        } else {
            (MID, WARM, (s - 0.5) * 2.0)
        };
        let mixed = linear(from).mix(linear(to), t);
        Srgb::<f32>::from_linear(mixed).into_format()
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(3);
        assert_eq!(colours.len(), 3);
        assert_ne!(colours[0], colours[1]);
        assert_ne!(colours[1], colours[2]);
    }

    #[test]
    fn diverging_map_endpoints() {
        let map = DivergingMap::new(-2.0, 2.0);
        assert_eq!(map.color_for(-2.0), Srgb::new(59, 76, 192));
        assert_eq!(map.color_for(2.0), Srgb::new(180, 4, 38));
        assert_eq!(map.color_for(0.0), Srgb::new(221, 221, 221));
        // Out-of-range values clamp.
        assert_eq!(map.color_for(10.0), map.color_for(2.0));
        assert_eq!(map.color_for(f64::NAN), Srgb::new(128, 128, 128));
    }

    #[test]
    fn flat_range_is_widened() {
        assert_eq!(DivergingMap::new(3.0, 3.0).range(), (2.0, 4.0));
        assert_eq!(DivergingMap::from_range(None).range(), (-1.0, 1.0));
        assert_eq!(DivergingMap::new(5.0, 1.0).range(), (1.0, 5.0));
    }
}
