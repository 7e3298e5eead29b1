// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The in-memory image: a row-major run of RGB triples with no
//! padding between pixels or rows.

use crate::error::{Error, Result};
use crate::planes::Pixel;

/// Bytes per pixel.
pub const CHANNELS: usize = 3;

/// An 8-bit-per-channel color, red first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The color of interior points.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// A fully allocated image buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    columns: usize,
    rows: usize,
    data: Vec<u8>,
}

fn byte_len(columns: usize, rows: usize) -> Option<usize> {
    columns.checked_mul(rows)?.checked_mul(CHANNELS)
}

fn check_size(columns: usize, rows: usize) -> Result<()> {
    if columns == 0 || rows == 0 {
        return Err(Error::Domain(format!(
            "image size {}x{} has no pixels",
            columns, rows
        )));
    }
    Ok(())
}

impl PixelBuffer {
    /// Allocate a black buffer of the given size.  Both dimensions
    /// must be at least 1.  An allocation that cannot be satisfied is
    /// reported instead of aborting the process.
    pub fn new(columns: usize, rows: usize) -> Result<PixelBuffer> {
        check_size(columns, rows)?;
        let resource = || Error::Resource { columns, rows };
        let len = byte_len(columns, rows).ok_or_else(resource)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| resource())?;
        data.resize(len, 0);
        Ok(PixelBuffer {
            columns,
            rows,
            data,
        })
    }

    /// Wrap bytes that already hold `columns * rows` RGB triples.
    pub fn from_raw(columns: usize, rows: usize, data: Vec<u8>) -> Result<PixelBuffer> {
        check_size(columns, rows)?;
        match byte_len(columns, rows) {
            Some(len) if len == data.len() => Ok(PixelBuffer {
                columns,
                rows,
                data,
            }),
            _ => Err(Error::Domain(format!(
                "{} bytes cannot hold a {}x{} image",
                data.len(),
                columns,
                rows
            ))),
        }
    }

    /// Width in pixels.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height in pixels.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of bytes in one row.
    pub fn row_len(&self) -> usize {
        self.columns * CHANNELS
    }

    fn offset(&self, pixel: &Pixel) -> Option<usize> {
        if pixel.0 < self.columns && pixel.1 < self.rows {
            Some((pixel.1 * self.columns + pixel.0) * CHANNELS)
        } else {
            None
        }
    }

    /// The color at a pixel, if the pixel is inside the image.
    pub fn get(&self, pixel: &Pixel) -> Option<Rgb> {
        self.offset(pixel).map(|o| Rgb(self.data[o], self.data[o + 1], self.data[o + 2]))
    }

    /// Set the color at a pixel.  Returns false if the pixel is
    /// outside the image.
    pub fn put(&mut self, pixel: &Pixel, color: Rgb) -> bool {
        match self.offset(pixel) {
            Some(o) => {
                self.data[o..o + CHANNELS].copy_from_slice(&[color.0, color.1, color.2]);
                true
            }
            None => false,
        }
    }

    /// The raw bytes, row-major, RGB.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes, for workers that each own a run of rows.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The rows of the image, top first.
    pub fn row_slices(&self) -> std::slice::Chunks<'_, u8> {
        self.data.chunks(self.row_len())
    }
}

/// Write a color into a three-byte slot.
pub fn store(slot: &mut [u8], color: Rgb) {
    slot[0] = color.0;
    slot[1] = color.1;
    slot[2] = color.2;
}
