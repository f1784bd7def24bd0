//! Palette stops and intensity interpolation
//!
//! Every color family ships eleven stock stops (`50`, `100`, ..., `900`,
//! `950`). Any other intensity is approximated by mixing the two stops around
//! it in oklab space. Below the first stop the mix runs toward white, above
//! the last stop it runs toward black.
//!
//! The weight is not uniform across the ladder: the `50..100` band uses the
//! raw intensity, the two half-width bands at either end (`<50` and
//! `900..950`, `>=950`) double the distance, and every full hundred band uses
//! the offset from its lower stop.
//!
//! ```
//! use shade_theme::palette::synthesize;
//!
//! assert_eq!(
//!     synthesize("blue", 150),
//!     "color-mix(in oklab, var(--color-blue-100) 50%, var(--color-blue-200))"
//! );
//! ```

use std::fmt;

/// Stock palette stops, strictly increasing
pub const STOPS: [u32; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Whether an intensity is one of the stock [`STOPS`]
pub fn is_stop(intensity: u32) -> bool {
    STOPS.binary_search(&intensity).is_ok()
}

/// Render a `var(--color-<family>-<intensity>)` reference
pub fn color_var(family: &str, intensity: impl fmt::Display) -> String {
    format!("var(--color-{}-{})", family, intensity)
}

/// An intensity as written in a utility token.
///
/// Keeps the literal digit run next to its numeric value: variant variable
/// names are built from the digits exactly as written, while stop checks and
/// interpolation use the number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Intensity {
    digits: String,
    value: u32,
}

impl Intensity {
    /// Parse a run of ASCII digits. Returns `None` if the run is empty,
    /// contains anything else, or does not fit in a `u32`.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = digits.parse().ok()?;
        Some(Self {
            digits: digits.to_string(),
            value,
        })
    }

    /// Numeric value
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Digits as they appeared in the source token
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Whether the numeric value is a stock stop
    pub fn is_stop(&self) -> bool {
        is_stop(self.value)
    }
}

impl From<u32> for Intensity {
    fn from(value: u32) -> Self {
        Self {
            digits: value.to_string(),
            value,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Where an intensity falls on the stop ladder and how much of each side
/// goes into the mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Below the first stop: `weight`% of stop 50, the rest white
    White { weight: u64 },
    /// Between two adjacent stops: `weight`% of `lo`, the rest `hi`
    Between { lo: u32, hi: u32, weight: u64 },
    /// At or past the last stop: stop 950 with `weight`% black
    Black { weight: u64 },
}

impl Band {
    /// Render the band as a `color-mix` expression for `family`
    pub fn expression(&self, family: &str) -> String {
        match *self {
            Band::White { weight } => format!(
                "color-mix(in oklab, {} {}%, var(--color-white))",
                color_var(family, STOPS[0]),
                weight
            ),
            Band::Between { lo, hi, weight } => format!(
                "color-mix(in oklab, {} {}%, {})",
                color_var(family, lo),
                weight,
                color_var(family, hi)
            ),
            Band::Black { weight } => format!(
                "color-mix(in oklab, {}, var(--color-black) {}%)",
                color_var(family, STOPS[STOPS.len() - 1]),
                weight
            ),
        }
    }
}

/// Locate `intensity` on the stop ladder.
///
/// No clamping is applied: very large intensities produce percentages over
/// 100 and are left for the caller to avoid.
pub fn bracket(intensity: u32) -> Band {
    let i = u64::from(intensity);
    match intensity {
        0..=49 => Band::White { weight: i * 2 },
        50..=99 => Band::Between {
            lo: 50,
            hi: 100,
            weight: i,
        },
        100..=899 => {
            let lo = intensity / 100 * 100;
            Band::Between {
                lo,
                hi: lo + 100,
                weight: i - u64::from(lo),
            }
        }
        900..=949 => Band::Between {
            lo: 900,
            hi: 950,
            weight: (i - 900) * 2,
        },
        _ => Band::Black {
            weight: (i - 950) * 2,
        },
    }
}

/// Synthesize the color expression for `family` at `intensity`
pub fn synthesize(family: &str, intensity: u32) -> String {
    bracket(intensity).expression(family)
}
