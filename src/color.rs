//! Turns escape counts into gray levels.
//!
//! Two policies are available.  The linear one shades by how far the
//! escape count got toward the iteration limit, white for an immediate
//! escape and darkening from there.  The histogram one shades by where
//! the count falls in the distribution of all counts actually seen,
//! which spreads the image across the whole gray range.  The linear
//! policy is inverted and the histogram one is not; that difference is
//! part of how the two look and is kept deliberately.  Points in the
//! set are black under both.

use std::fmt;
use std::str::FromStr;

use escape::Escape;
use histogram::{CumulativeTable, Histogram};

/// Which coloring policy to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Coloring {
    /// Shade by escape count over the iteration limit.
    Linear,
    /// Shade by the cumulative distribution of escape counts.
    Histogram,
}

impl FromStr for Coloring {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Coloring::Linear),
            "histogram" => Ok(Coloring::Histogram),
            _ => Err(format!("Unknown coloring '{}'", s)),
        }
    }
}

impl fmt::Display for Coloring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Coloring::Linear => write!(f, "linear"),
            Coloring::Histogram => write!(f, "histogram"),
        }
    }
}

/// Bits per gray sample in the output image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BitDepth {
    /// 0..=255
    Eight,
    /// 0..=65535
    Sixteen,
}

impl BitDepth {
    /// The brightest representable gray.
    pub fn max_value(self) -> u16 {
        match self {
            BitDepth::Eight => u16::from(u8::max_value()),
            BitDepth::Sixteen => u16::max_value(),
        }
    }
}

impl FromStr for BitDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "8" => Ok(BitDepth::Eight),
            "16" => Ok(BitDepth::Sixteen),
            _ => Err(format!("Unsupported bit depth '{}'", s)),
        }
    }
}

/// A coloring policy bound to everything it needs to shade a pixel.
#[derive(Clone, Debug)]
pub enum ColorMapper {
    /// See `Coloring::Linear`.
    Linear {
        /// The iteration limit the counts were taken against.
        limit: usize,
        /// The brightest gray.
        max: u16,
    },
    /// See `Coloring::Histogram`.
    Equalized {
        /// Precomputed cumulative fractions.
        table: CumulativeTable,
        /// The brightest gray.
        max: u16,
    },
}

impl ColorMapper {
    /// Linear shading against `limit`.
    pub fn linear(limit: usize, depth: BitDepth) -> Self {
        ColorMapper::Linear {
            limit,
            max: depth.max_value(),
        }
    }

    /// Histogram shading.  The cumulative table is computed here, once,
    /// before any pixel is mapped.
    pub fn equalized(histogram: &Histogram, depth: BitDepth) -> Self {
        ColorMapper::Equalized {
            table: histogram.cumulative(),
            max: depth.max_value(),
        }
    }

    /// Picks the policy named by `coloring`.  Histogram coloring falls
    /// back to an empty histogram when none was collected, which
    /// shades every escaped pixel black.
    pub fn new(
        coloring: Coloring,
        depth: BitDepth,
        limit: usize,
        histogram: Option<&Histogram>,
    ) -> Self {
        match (coloring, histogram) {
            (Coloring::Linear, _) => ColorMapper::linear(limit, depth),
            (Coloring::Histogram, Some(h)) => ColorMapper::equalized(h, depth),
            (Coloring::Histogram, None) => {
                warn!("histogram coloring requested without a histogram");
                ColorMapper::equalized(&Histogram::new(limit), depth)
            }
        }
    }

    /// The gray level for one pixel's result.
    pub fn intensity(&self, escape: Escape) -> u16 {
        let i = match escape {
            Escape::InSet => return 0,
            Escape::Escaped(i) => i,
        };
        match *self {
            ColorMapper::Linear { limit, max } => {
                let gray = (i as f64) / (limit as f64) * f64::from(max);
                (f64::from(max) - gray) as u16
            }
            ColorMapper::Equalized { ref table, max } => (table.fraction(i) * f64::from(max)) as u16,
        }
    }
}
