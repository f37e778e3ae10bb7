//! Page geometry: physical size plus a uniform minimum margin.

/// Fixed page with a uniform margin on all four sides.
///
/// Invariants:
/// - all fields finite, `margin >= 0`;
/// - `width > 2·margin` and `height > 2·margin` (positive printable area).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSpec {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageSpec {
    /// US Letter in centimeters with a 0.75 cm margin.
    pub const LETTER: PageSpec = PageSpec {
        width: 21.6,
        height: 27.9,
        margin: 0.75,
    };

    /// ISO A4 in centimeters with a 0.75 cm margin.
    pub const A4: PageSpec = PageSpec {
        width: 21.0,
        height: 29.7,
        margin: 0.75,
    };

    /// Checked constructor; `None` if the printable area would be empty.
    pub fn new(width: f64, height: f64, margin: f64) -> Option<Self> {
        let finite = width.is_finite() && height.is_finite() && margin.is_finite();
        if !finite || margin < 0.0 || width <= 2.0 * margin || height <= 2.0 * margin {
            return None;
        }
        Some(Self {
            width,
            height,
            margin,
        })
    }

    #[inline]
    pub fn printable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    #[inline]
    pub fn printable_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    /// Top edge of the printable area.
    #[inline]
    pub fn ceiling(&self) -> f64 {
        self.height - self.margin
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::LETTER
    }
}
