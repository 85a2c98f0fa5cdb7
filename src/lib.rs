#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Histobrot renderer
//!
//! Renders the classic view of the Mandelbrot set as a gray image.
//! Every pixel is mapped to a point on the complex plane and iterated
//! until it either escapes the circle of radius two or runs out of
//! iterations.  Points that never escape are in the set and painted
//! black; everything else is shaded by how quickly it escaped.
//!
//! Shading by raw escape count crams most of the detail into a thin
//! band near the set, because the overwhelming majority of points
//! escape within a handful of iterations.  The histogram option counts
//! how many pixels escaped at each iteration and shades by the
//! cumulative distribution of those counts instead, which spreads the
//! image across the whole range of grays.
//!
//! The computation runs on a pool of threads that claim rows from a
//! shared queue, with a single aggregator thread collecting escape
//! counts for the histogram.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

#[cfg(test)]
extern crate tempfile;

pub mod color;
pub mod errors;
pub mod escape;
pub mod fractal;
pub mod histogram;
pub mod planes;
pub mod raster;
pub mod render;

pub use color::{BitDepth, ColorMapper, Coloring};
pub use errors::RenderError;
pub use escape::{escape_time, Escape};
pub use fractal::Fractal;
pub use histogram::{CumulativeTable, Histogram};
pub use planes::{Pixel, PlaneMapper};
pub use render::{RenderConfig, Rendered, RowRenderer};

use std::time::Duration;

/// What a finished run looked like.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Wall-clock time of the parallel phase.
    pub elapsed: Duration,
    /// Pixels that escaped.
    pub escaped: usize,
    /// Pixels presumed to be in the set.
    pub in_set: usize,
}

/// Renders, shades and writes one image as described by `config`.
/// Coloring starts only after every worker has finished and the
/// histogram, if any, is complete.
pub fn render_to_file(config: &RenderConfig) -> Result<Report, RenderError> {
    let rendered = RowRenderer::from_config(config)?.render()?;
    let mapper = ColorMapper::new(
        config.coloring,
        config.depth,
        config.limit,
        rendered.histogram.as_ref(),
    );
    debug!("coloring with {} policy", config.coloring);
    let img = raster::assemble(&rendered.fractal, &mapper, config.depth);
    raster::write_png(&config.output, &img)?;
    Ok(Report {
        elapsed: rendered.elapsed,
        escaped: rendered.fractal.escaped(),
        in_set: rendered.fractal.in_set(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image;
    use image::GenericImageView;
    use tempfile::tempdir;

    fn config(dir: &std::path::Path, name: &str) -> RenderConfig {
        let mut config = RenderConfig::default().with_width(140);
        config.limit = 150;
        config.threads = 3;
        config.output = dir.join(name);
        config
    }

    #[test]
    fn renders_every_variant() {
        let dir = tempdir().unwrap();
        for &(coloring, depth) in &[
            (Coloring::Histogram, BitDepth::Sixteen),
            (Coloring::Linear, BitDepth::Sixteen),
            (Coloring::Histogram, BitDepth::Eight),
            (Coloring::Linear, BitDepth::Eight),
        ] {
            let mut config = config(dir.path(), &format!("{}-{:?}.png", coloring, depth));
            config.coloring = coloring;
            config.depth = depth;
            let report = render_to_file(&config).unwrap();
            assert_eq!(report.escaped + report.in_set, 140 * 80);
            let img = image::open(&config.output).unwrap();
            assert_eq!(img.dimensions(), (140, 80));
            match depth {
                BitDepth::Eight => assert!(img.as_luma8().is_some()),
                BitDepth::Sixteen => assert!(img.as_luma16().is_some()),
            }
        }
    }

    #[test]
    fn bad_output_path_is_reported() {
        let dir = tempdir().unwrap();
        let config = config(&dir.path().join("nope"), "out.png");
        match render_to_file(&config) {
            Err(RenderError::Create { .. }) => (),
            other => panic!("expected a create failure, got {:?}", other),
        }
        assert!(!config.output.exists());
    }
}
