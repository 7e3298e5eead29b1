// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0
//! in the top-left corner, and a rectangle on the complex plane
//! described by its center and a magnification.
use crate::error::{Error, Result};
use num::Complex;

/// Describes the column, row of a pixel in the integral plane.
/// Column 0, row 0 is the top-left of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The region of the complex plane mapped onto a grid of pixels,
/// plus the iteration limit used to probe every sample point.
///
/// The horizontal extent of the region is `1 / magnification`; the
/// vertical extent is scaled by `rows / columns` so that pixels stay
/// square.  Sample points sit at pixel centers, not pixel edges.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    center: Complex<f64>,
    magnification: f64,
    columns: usize,
    rows: usize,
    limit: usize,
    // Plane width and height covered by the grid.
    extent: (f64, f64),
    // Plane distance between neighbouring pixels, x then y.
    step: (f64, f64),
    // Plane coordinate of the center of pixel (0, 0).
    origin: Complex<f64>,
}

fn positive_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::Domain(format!(
            "{} must be finite and greater than zero, got {}",
            name, value
        )))
    }
}

impl Viewport {
    /// Constructor.  Validates every parameter and derives the grid
    /// once, so nothing downstream can divide by zero or sample NaN.
    pub fn new(
        center: Complex<f64>,
        magnification: f64,
        columns: usize,
        rows: usize,
        limit: usize,
    ) -> Result<Viewport> {
        if !(center.re.is_finite() && center.im.is_finite()) {
            return Err(Error::Domain(format!("center {} is not finite", center)));
        }
        positive_finite("magnification", magnification)?;
        if columns == 0 || rows == 0 {
            return Err(Error::Domain(format!(
                "image size {}x{} has no pixels",
                columns, rows
            )));
        }
        if limit == 0 {
            return Err(Error::Domain(
                "iteration limit must be at least 1".to_string(),
            ));
        }

        let x_extent = positive_finite("horizontal extent", 1.0 / magnification)?;
        let y_extent = positive_finite(
            "vertical extent",
            ((rows as f64) / (columns as f64)) * x_extent,
        )?;
        let x_step = positive_finite("horizontal step", x_extent / (columns as f64))?;
        let y_step = positive_finite("vertical step", y_extent / (rows as f64))?;

        let origin = Complex::new(
            center.re - 0.5 * (x_extent - x_step),
            center.im + 0.5 * (y_extent - y_step),
        );

        Ok(Viewport {
            center,
            magnification,
            columns,
            rows,
            limit,
            extent: (x_extent, y_extent),
            step: (x_step, y_step),
            origin,
        })
    }

    /// The plane coordinate the grid is centered on.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// The zoom factor; 1.0 shows a region one unit wide.
    pub fn magnification(&self) -> f64 {
        self.magnification
    }

    /// Width of the grid in pixels.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height of the grid in pixels.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The maximum number of iterations per sample point.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Width and height of the covered region of the plane.
    pub fn extent(&self) -> (f64, f64) {
        self.extent
    }

    /// Plane distance between horizontally and vertically adjacent
    /// pixels.
    pub fn step(&self) -> (f64, f64) {
        self.step
    }

    /// The sample point of the top-left pixel.
    pub fn origin(&self) -> Complex<f64> {
        self.origin
    }

    /// Given a pixel on the integral plane, return the complex number
    /// sampled for it.  Rows grow downward, the imaginary axis grows
    /// upward.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.origin.re + (pixel.0 as f64) * self.step.0,
            self.origin.im - (pixel.1 as f64) * self.step.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(columns: usize, rows: usize) -> Viewport {
        Viewport::new(Complex::new(0.0, 0.0), 1.0, columns, rows, 10).unwrap()
    }

    #[test]
    fn viewport_fails_on_zero_magnification() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), 0.0, 4, 4, 10);
        assert!(vp.is_err());
    }

    #[test]
    fn viewport_fails_on_negative_or_nan_magnification() {
        for m in &[-1.0, ::std::f64::NAN, ::std::f64::INFINITY] {
            let vp = Viewport::new(Complex::new(0.0, 0.0), *m, 4, 4, 10);
            assert!(vp.is_err(), "magnification {} accepted", m);
        }
    }

    #[test]
    fn viewport_fails_on_empty_grid_or_limit() {
        let c = Complex::new(0.0, 0.0);
        assert!(Viewport::new(c, 1.0, 0, 4, 10).is_err());
        assert!(Viewport::new(c, 1.0, 4, 0, 10).is_err());
        assert!(Viewport::new(c, 1.0, 4, 4, 0).is_err());
    }

    #[test]
    fn viewport_fails_on_non_finite_center() {
        let vp = Viewport::new(Complex::new(::std::f64::NAN, 0.0), 1.0, 4, 4, 10);
        assert!(vp.is_err());
    }

    #[test]
    fn viewport_fails_when_extent_overflows() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), 1.0e-320, 4, 4, 10);
        match vp {
            Err(Error::Domain(_)) => {}
            other => panic!("expected a domain error, got {:?}", other),
        }
    }

    #[test]
    fn viewport_passes_on_good_shape() {
        let vp = Viewport::new(Complex::new(-0.5, 0.0), 1.0, 100, 100, 100);
        assert!(vp.is_ok());
    }

    #[test]
    fn square_grids_have_square_pixels() {
        for size in &[1, 3, 7, 100, 1023] {
            let vp = Viewport::new(Complex::new(-0.51, 0.61), 10.0, *size, *size, 10).unwrap();
            let (x, y) = vp.step();
            assert_eq!(x, y);
            assert!(x > 0.0);
        }
    }

    #[test]
    fn vertical_extent_follows_aspect_ratio() {
        let vp = Viewport::new(Complex::new(0.0, 0.0), 2.0, 200, 100, 10).unwrap();
        assert_eq!(vp.extent(), (0.5, 0.25));
        assert_eq!(vp.step(), (0.0025, 0.0025));
    }

    #[test]
    fn pixel_to_point_samples_pixel_centers() {
        let vp = unit(2, 2);
        assert_eq!(vp.origin(), Complex::new(-0.25, 0.25));
        assert_eq!(vp.pixel_to_point(&Pixel(0, 0)), Complex::new(-0.25, 0.25));
        assert_eq!(vp.pixel_to_point(&Pixel(1, 0)), Complex::new(0.25, 0.25));
        assert_eq!(vp.pixel_to_point(&Pixel(0, 1)), Complex::new(-0.25, -0.25));
        assert_eq!(vp.pixel_to_point(&Pixel(1, 1)), Complex::new(0.25, -0.25));
    }

    #[test]
    fn single_pixel_samples_the_center() {
        let vp = Viewport::new(Complex::new(-0.5, 0.25), 3.0, 1, 1, 10).unwrap();
        assert_eq!(vp.pixel_to_point(&Pixel(0, 0)), Complex::new(-0.5, 0.25));
    }

    #[test]
    fn pixel_to_point_on_offset_planes() {
        let vp = Viewport::new(Complex::new(-0.5, 0.0), 0.25, 64, 64, 10).unwrap();
        assert_eq!(vp.step(), (0.0625, 0.0625));
        assert_eq!(vp.origin(), Complex::new(-2.46875, 1.96875));
        assert_eq!(vp.pixel_to_point(&Pixel(63, 63)), Complex::new(1.46875, -1.96875));
    }
}
