#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot rasterizer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the sequence `z = z * z + c`, started at zero, stays
//! bounded.  For every pixel of an image we take the point at the
//! pixel's center, iterate until `|z|` passes 2 or an iteration limit
//! is reached, and color the pixel by how many iterations that took.
//! Points that never escape are black.
//!
//! A render is described by a `Viewport` (center, magnification,
//! pixel grid, iteration limit), computed by a `Renderer` into a
//! `PixelBuffer`, and handed to an `ImageSink` that writes it out as
//! a bitmap and optionally converts it to a compressed format.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod bmp;
pub mod config;
pub mod error;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod raster;
pub mod render;
pub mod sink;

pub use config::RenderConfig;
pub use error::{Error, Result};
pub use escape::{escape_time, Escape};
pub use palette::Palette;
pub use planes::{Pixel, Viewport};
pub use raster::{PixelBuffer, Rgb};
pub use render::{render, Renderer};
pub use sink::{FileSink, ImageSink, TargetFormat, Transcoder};
