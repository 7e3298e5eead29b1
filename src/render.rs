// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! Every pixel is probed independently: map it to its sample point,
//! run the escape-time iteration, color the result.  Nothing is
//! shared between pixels except the read-only viewport, so the image
//! can be split into horizontal bands and each band handed to its
//! own thread, which writes only into its own slice of the buffer.

use itertools::iproduct;
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::escape::escape_time;
use crate::palette::Palette;
use crate::planes::{Pixel, Viewport};
use crate::raster::{store, PixelBuffer, CHANNELS};

/// Takes a viewport and a palette and produces a colored image of
/// the Mandelbrot set.  Once built, this object is not mutable and
/// can be shared freely between threads.
pub struct Renderer {
    viewport: Viewport,
    palette: Palette,
}

impl Renderer {
    /// The viewport is already validated, so a renderer can always
    /// run.
    pub fn new(viewport: Viewport, palette: Palette) -> Self {
        Renderer { viewport, palette }
    }

    /// The viewport being rendered.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn allocate(&self) -> Result<PixelBuffer> {
        let (x_step, y_step) = self.viewport.step();
        debug!(
            "grid {}x{} origin {} step ({:e}, {:e}) limit {}",
            self.viewport.columns(),
            self.viewport.rows(),
            self.viewport.origin(),
            x_step,
            y_step,
            self.viewport.limit()
        );
        PixelBuffer::new(self.viewport.columns(), self.viewport.rows())
    }

    /// Fill a run of whole rows, starting at `first_row`.  `band`
    /// holds exactly those rows and nothing else.
    fn render_band(&self, first_row: usize, band: &mut [u8]) {
        let row_len = self.viewport.columns() * CHANNELS;
        let limit = self.viewport.limit();
        for (i, row) in band.chunks_mut(row_len).enumerate() {
            for (column, slot) in row.chunks_mut(CHANNELS).enumerate() {
                let point = self.viewport.pixel_to_point(&Pixel(column, first_row + i));
                let color = self.palette.color(escape_time(point, limit), limit);
                store(slot, color);
            }
        }
    }

    /// The single-threaded render.
    pub fn render_single(&self) -> Result<PixelBuffer> {
        let mut buffer = self.allocate()?;
        let limit = self.viewport.limit();
        for (row, column) in iproduct!(0..self.viewport.rows(), 0..self.viewport.columns()) {
            let pixel = Pixel(column, row);
            let point = self.viewport.pixel_to_point(&pixel);
            buffer.put(&pixel, self.palette.color(escape_time(point, limit), limit));
        }
        Ok(buffer)
    }

    /// A multi-threaded version of the render function that takes a
    /// thread count.  The image is cut into contiguous bands of rows,
    /// one per thread; the output does not depend on the thread
    /// count.
    pub fn render(&self, threads: usize) -> Result<PixelBuffer> {
        if threads == 0 {
            return Err(Error::Domain("thread count must be at least 1".to_string()));
        }
        let mut buffer = self.allocate()?;
        let rows = self.viewport.rows();
        let threads = threads.min(rows);
        let band_rows = (rows + threads - 1) / threads;
        let band_len = band_rows * buffer.row_len();
        trace!("{} bands of up to {} rows", threads, band_rows);

        crossbeam::scope(|spawner| {
            for (i, band) in buffer.as_bytes_mut().chunks_mut(band_len).enumerate() {
                spawner.spawn(move |_| {
                    self.render_band(i * band_rows, band);
                });
            }
        })
        .map_err(|e| Error::Worker(panic_message(&*e)))?;

        Ok(buffer)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// Render a viewport in one call.
pub fn render(viewport: Viewport, palette: Palette, threads: usize) -> Result<PixelBuffer> {
    Renderer::new(viewport, palette).render(threads)
}
