// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image renderer.
//!
//! Walks the canvas row by row, asks the fractal how long each pixel's
//! point took to escape, and turns that count into a color.  Nothing
//! here touches the filesystem or the network; the finished canvas is
//! handed back to the caller for encoding.

use image::{Rgb, RgbImage};
use itertools::iproduct;

use error::RenderError;
use escape::Fractal;
use palette::Palette;
use planes::{Pixel, PlaneMapper};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Everything that decides what a render looks like.  Once built,
/// these do not change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderParams {
    width: u32,
    height: u32,
    iterations: usize,
    monochrome: bool,
    fractal: Fractal,
}

impl RenderParams {
    /// A color Mandelbrot render of the given size and depth.  Every
    /// dimension must be positive.
    pub fn new(width: u32, height: u32, iterations: usize) -> Result<Self, RenderError> {
        if width == 0 {
            return Err(RenderError::ZeroWidth);
        }
        if height == 0 {
            return Err(RenderError::ZeroHeight);
        }
        if iterations == 0 {
            return Err(RenderError::ZeroIterations);
        }
        Ok(RenderParams {
            width,
            height,
            iterations,
            monochrome: false,
            fractal: Fractal::Mandelbrot,
        })
    }

    /// Render inside/outside as black and white instead of the palette.
    pub fn monochrome(mut self, monochrome: bool) -> Self {
        self.monochrome = monochrome;
        self
    }

    /// Draw a different fractal.
    pub fn fractal(mut self, fractal: Fractal) -> Self {
        self.fractal = fractal;
        self
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maximum iterations per pixel, and the palette length.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the render is black and white.
    pub fn is_monochrome(&self) -> bool {
        self.monochrome
    }

    /// Which fractal is drawn.
    pub fn fractal_kind(&self) -> Fractal {
        self.fractal
    }
}

/// Holds the parameters and the palette built from them.  The palette
/// is computed once here and only read while rendering.
pub struct Renderer {
    params: RenderParams,
    plane: PlaneMapper,
    palette: Palette,
}

impl Renderer {
    /// Builds the plane mapping and the palette for `params`.
    pub fn new(params: RenderParams) -> Result<Self, RenderError> {
        let plane = PlaneMapper::new(params.width as usize, params.height as usize)?;
        let palette = Palette::new(params.iterations);
        Ok(Renderer {
            params,
            plane,
            palette,
        })
    }

    /// The parameters this renderer was built with.
    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// The palette this renderer colors with.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Escape time of a single pixel.
    pub fn escape_time(&self, column: usize, row: usize) -> usize {
        let point = self.plane.pixel_to_point(&Pixel(column, row));
        self.params.fractal.escape_time(point, self.params.iterations)
    }

    /// Resolve an escape time to a color.
    ///
    /// The palette is indexed at `escape_time - 1`.  A point that never
    /// escapes reports the full iteration count and so shares the last
    /// palette entry with a point that escaped on the final pass.  The
    /// Mandelbrot orbit always completes one pass, so its index is never
    /// negative; a Julia point already outside the radius reports zero
    /// and is clamped to the first entry.
    pub fn color_for(&self, escape_time: usize) -> Rgb<u8> {
        if self.params.monochrome {
            return if escape_time < self.params.iterations {
                WHITE
            } else {
                BLACK
            };
        }
        self.palette
            .get(escape_time.saturating_sub(1))
            .unwrap_or(BLACK)
    }

    /// Escape times of every pixel, row-major.
    pub fn escape_times(&self) -> Vec<usize> {
        let (width, height) = (self.plane.integral_plane.0, self.plane.integral_plane.1);
        let mut times = Vec::with_capacity(self.plane.len());
        for (row, column) in iproduct!(0..height, 0..width) {
            times.push(self.escape_time(column, row));
        }
        times
    }

    /// Render the whole canvas, one row after another.
    pub fn render(&self) -> RgbImage {
        debug!(
            "rendering {} at {}x{}, {} iterations{}",
            self.params.fractal,
            self.params.width,
            self.params.height,
            self.params.iterations,
            if self.params.monochrome {
                ", monochrome"
            } else {
                ""
            }
        );
        let mut canvas = RgbImage::new(self.params.width, self.params.height);
        for (row, column) in iproduct!(0..self.params.height, 0..self.params.width) {
            let time = self.escape_time(column as usize, row as usize);
            canvas.put_pixel(column, row, self.color_for(time));
        }
        canvas
    }
}

/// Convenience: validate, build, and render in one go.
pub fn render(params: RenderParams) -> Result<RgbImage, RenderError> {
    Ok(Renderer::new(params)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn small() -> RenderParams {
        RenderParams::new(4, 4, 10).unwrap()
    }

    #[test]
    fn params_reject_empty_dimensions() {
        assert!(RenderParams::new(0, 4, 10).is_err());
        assert!(RenderParams::new(4, 0, 10).is_err());
        assert!(RenderParams::new(4, 4, 0).is_err());
    }

    #[test]
    fn canvas_has_every_pixel() {
        let params = RenderParams::new(7, 3, 20).unwrap();
        let canvas = render(params).unwrap();
        assert_eq!(canvas.dimensions(), (7, 3));
        assert_eq!(canvas.pixels().count(), 21);
        assert_eq!(canvas.into_raw().len(), 7 * 3 * 3);
    }

    #[test]
    fn small_render_matches_reference() {
        let renderer = Renderer::new(small()).unwrap();
        let canvas = renderer.render();
        let last = renderer.palette().get(9).unwrap();
        assert_eq!(*canvas.get_pixel(2, 2), last);
        assert_eq!(*canvas.get_pixel(1, 2), last);
        assert_eq!(*canvas.get_pixel(0, 0), renderer.palette().get(0).unwrap());
        assert_eq!(*canvas.get_pixel(3, 3), renderer.palette().get(1).unwrap());
    }

    #[test]
    fn center_never_escapes() {
        for &(width, height, iterations) in &[(2, 2, 1), (600, 400, 500), (10, 30, 64)] {
            let params = RenderParams::new(width, height, iterations).unwrap();
            let renderer = Renderer::new(params).unwrap();
            let (column, row) = (width as usize / 2, height as usize / 2);
            assert_eq!(renderer.escape_time(column, row), iterations);
        }
    }

    #[test]
    fn small_escape_times() {
        let renderer = Renderer::new(small()).unwrap();
        let times = renderer.escape_times();
        assert_eq!(times.len(), 16);
        assert_eq!(times[2 * 4 + 2], 10);
        assert_eq!(times[0], 1);
        assert!(times.iter().all(|&t| t <= 10));
    }

    #[test]
    fn every_color_comes_from_the_palette() {
        let renderer = Renderer::new(RenderParams::new(30, 20, 40).unwrap()).unwrap();
        let canvas = renderer.render();
        let palette = renderer.palette();
        let colors: Vec<Rgb<u8>> = (0..palette.len()).filter_map(|i| palette.get(i)).collect();
        assert!(canvas.pixels().all(|p| colors.contains(p)));
    }

    #[test]
    fn monochrome_is_black_and_white() {
        let params = RenderParams::new(30, 20, 40).unwrap().monochrome(true);
        let canvas = render(params).unwrap();
        assert!(canvas.pixels().all(|p| *p == WHITE || *p == BLACK));
        assert_eq!(*canvas.get_pixel(15, 10), BLACK);
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn last_pass_and_inside_share_a_color() {
        let renderer = Renderer::new(small()).unwrap();
        assert_eq!(renderer.color_for(10), renderer.palette().get(9).unwrap());
        assert_eq!(renderer.color_for(0), renderer.palette().get(0).unwrap());
    }

    #[test]
    fn renders_are_repeatable() {
        let params = RenderParams::new(60, 40, 100).unwrap();
        let first = render(params).unwrap().into_raw();
        let second = render(params).unwrap().into_raw();
        assert_eq!(first, second);
    }

    #[test]
    fn julia_renders_through_the_same_pipeline() {
        let params = RenderParams::new(16, 16, 32)
            .unwrap()
            .fractal(Fractal::Julia(Complex::new(-0.8, 0.156)));
        let renderer = Renderer::new(params).unwrap();
        assert_eq!(renderer.params().fractal_kind(), Fractal::Julia(Complex::new(-0.8, 0.156)));
        assert_eq!(renderer.render().dimensions(), (16, 16));
    }
}
