//! The per-pixel result buffer.  One slot per pixel, laid out row by
//! row, so a row of the image is a contiguous slice that can be handed
//! to exactly one worker at a time.

use std::slice::{Chunks, ChunksMut};

use escape::Escape;
use planes::{Pixel, PlaneMapper};

/// Escape results for every pixel of a plane.
#[derive(Clone, Debug)]
pub struct Fractal {
    plane: PlaneMapper,
    cells: Vec<Escape>,
}

impl Fractal {
    /// A buffer for `plane` with every slot presumed in the set.  The
    /// renderer overwrites every slot before handing the buffer back.
    pub fn new(plane: PlaneMapper) -> Self {
        Fractal {
            plane,
            cells: vec![Escape::InSet; plane.len()],
        }
    }

    /// The plane this buffer was computed over.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.plane.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.plane.height()
    }

    /// The result for a single pixel.
    pub fn get(&self, pixel: &Pixel) -> Escape {
        self.cells[pixel.1 * self.width() + pixel.0]
    }

    /// Every row, top to bottom.
    pub fn rows(&self) -> Chunks<Escape> {
        self.cells.chunks(self.width())
    }

    /// Every row as a disjoint mutable slice.  Only the renderer
    /// writes through these.
    pub(crate) fn rows_mut(&mut self) -> ChunksMut<Escape> {
        let width = self.width();
        self.cells.chunks_mut(width)
    }

    /// Every slot, row-major.
    pub fn cells(&self) -> &[Escape] {
        &self.cells
    }

    /// How many pixels escaped.
    pub fn escaped(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_in_set()).count()
    }

    /// How many pixels are presumed to be in the set.
    pub fn in_set(&self) -> usize {
        self.cells.len() - self.escaped()
    }
}

impl PartialEq for Fractal {
    fn eq(&self, other: &Fractal) -> bool {
        self.plane.integral_plane == other.plane.integral_plane
            && self.plane.complex_plane == other.plane.complex_plane
            && self.cells == other.cells
    }
}
