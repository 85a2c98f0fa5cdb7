//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the leftlower and rightupper corners.  Unlike a
//! nearest-pixel mapping, both pairs of corners are inclusive: the
//! last pixel of a row lands exactly on the right edge of the
//! complex plane.
use num::Complex;

use errors::RenderError;

/// The left-lower corner of the classic Mandelbrot view.
pub const LEFTLOWER: Complex<f64> = Complex { re: -2.5, im: -1.0 };

/// The right-upper corner of the classic Mandelbrot view.
pub const RIGHTUPPER: Complex<f64> = Complex { re: 1.0, im: 1.0 };

/// Width divided by height for the classic view.  The complex plane is
/// 3.5 x 2.0, but the image is a touch taller than that ratio would
/// make it.
pub const ASPECT: f64 = 1.75;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian
/// plane, and a complex cartesian plane.  Maps pixels from the one to
/// points in the other.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the complex cartesian plane,
    /// left-lower and right-upper
    pub complex_plane: ComplexPlane,
    // Width and height of the complex plane.
    spans: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane, and two
    /// points describing the complex plane.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, RenderError> {
        if rightupper.re < leftlower.re {
            return Err(RenderError::BadPlane(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if rightupper.im < leftlower.im {
            return Err(RenderError::BadPlane(
                "The left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        // Both edges are inclusive, so a plane needs at least two
        // pixels on a side to span anything.
        if width < 2 || height < 2 {
            return Err(RenderError::BadPlane(format!(
                "An image of {}x{} pixels cannot span the complex plane",
                width, height
            )));
        }

        let spans = (rightupper.re - leftlower.re, rightupper.im - leftlower.im);

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            spans,
        })
    }

    /// The classic view, -2.5-1.0i to 1.0+1.0i, at the given size.
    pub fn mandelbrot(width: usize, height: usize) -> Result<PlaneMapper, RenderError> {
        PlaneMapper::new(width, height, LEFTLOWER, RIGHTUPPER)
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Given a pixel on the integral cartesian plane, map that to the
    /// equivalent point on the complex cartesian plane.  The pixel is
    /// normalized to 0..=1 first so the far edges land exactly on the
    /// plane's corners.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let last = (
            (self.integral_plane.0 - 1) as f64,
            (self.integral_plane.1 - 1) as f64,
        );
        Complex::new(
            (pixel.0 as f64) / last.0 * self.spans.0 + self.complex_plane.0.re,
            (pixel.1 as f64) / last.1 * self.spans.1 + self.complex_plane.0.im,
        )
    }
}

/// The image height that goes with a given width for the classic view.
pub fn derived_height(width: usize) -> usize {
    ((width as f64) / ASPECT) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_degenerate_size() {
        assert!(PlaneMapper::mandelbrot(1, 100).is_err());
        assert!(PlaneMapper::mandelbrot(100, 1).is_err());
        assert!(PlaneMapper::mandelbrot(0, 0).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(pm.is_ok());
    }

    #[test]
    fn derived_height_matches_classic_image() {
        assert_eq!(derived_height(1600), 914);
        assert_eq!(derived_height(175), 100);
    }

    #[test]
    fn corners_map_to_plane_bounds() {
        let pm = PlaneMapper::mandelbrot(1600, derived_height(1600)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.5, -1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(1599, 913)), Complex::new(1.0, 1.0));
        assert_eq!(pm.len(), 1600 * 914);
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Complex::new(0.0, 0.0), Complex::new(4.0, 4.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(5, 5, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(1, 3)), Complex::new(-1.0, 1.0));
    }
}
