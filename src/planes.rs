//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! (the canvas, rows growing downward) and a window on the complex
//! plane centered on the origin.
//!
//! The window is 4.0 units wide.  Both axes are scaled by the canvas
//! *width*, so pixels are square and the window is `4.0 * height /
//! width` units tall: a 600x400 canvas covers `re` in [-2, 2) and `im`
//! in [-4/3, 4/3).  A canvas taller than it is wide therefore reaches
//! past the radius-2 disk vertically.
use num::Complex;

use error::RenderError;

/// Width of the complex window, in complex-plane units.
const SPAN: f64 = 4.0;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the column, row of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the canvas to points on the complex plane.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The size of the canvas.
    pub integral_plane: IntegralPlane,
}

impl PlaneMapper {
    /// Constructor.  Refuses empty canvases, since there would be no
    /// width to scale by.
    pub fn new(width: usize, height: usize) -> Result<PlaneMapper, RenderError> {
        if width == 0 {
            return Err(RenderError::ZeroWidth);
        }
        if height == 0 {
            return Err(RenderError::ZeroHeight);
        }
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
        })
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// point on the complex plane it samples.  The operations are
    /// kept in this order (offset, scale, divide) so results are
    /// bit-for-bit stable across renders.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let width = self.integral_plane.0 as f64;
        let height = self.integral_plane.1 as f64;
        Complex::new(
            ((pixel.0 as f64) - width / 2.0) * SPAN / width,
            ((pixel.1 as f64) - height / 2.0) * SPAN / width,
        )
    }
}
