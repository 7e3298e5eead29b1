// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Uncompressed 24-bit Windows bitmaps.
//!
//! The layout is a 14-byte file header, a 40-byte info header, then
//! the pixel rows bottom-to-top, each pixel stored blue-green-red,
//! each row zero-padded to a multiple of four bytes.  All integers
//! are little-endian.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::raster::{PixelBuffer, CHANNELS};

/// Size of the file header.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of the info header.
pub const INFO_HEADER_LEN: usize = 40;
/// Where the pixel data starts.
pub const PIXEL_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

const BITS_PER_PIXEL: u16 = 24;

/// Bytes of zero padding at the end of each stored row.
pub fn row_padding(columns: usize) -> usize {
    (4 - (columns * CHANNELS) % 4) % 4
}

fn put_u16(out: &mut [u8], at: usize, value: u16) {
    out[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut [u8], at: usize, value: u32) {
    out[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

fn get_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

fn get_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

fn fits_u32(value: usize, what: &str) -> Result<u32> {
    if value > i32::max_value() as usize {
        return Err(Error::Domain(format!(
            "{} {} is too large for a bitmap",
            what, value
        )));
    }
    Ok(value as u32)
}

/// Serialize a buffer into bitmap bytes.
pub fn encode(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let (columns, rows) = (buffer.columns(), buffer.rows());
    let padding = row_padding(columns);
    let stride = buffer.row_len() + padding;
    let file_len = stride
        .checked_mul(rows)
        .and_then(|n| n.checked_add(PIXEL_OFFSET))
        .ok_or(Error::Resource { columns, rows })?;

    let mut out = vec![0u8; PIXEL_OFFSET];
    out[0] = b'B';
    out[1] = b'M';
    put_u32(&mut out, 2, fits_u32(file_len, "file size")?);
    put_u32(&mut out, 10, PIXEL_OFFSET as u32);

    put_u32(&mut out, 14, INFO_HEADER_LEN as u32);
    put_u32(&mut out, 18, fits_u32(columns, "width")?);
    put_u32(&mut out, 22, fits_u32(rows, "height")?);
    put_u16(&mut out, 26, 1);
    put_u16(&mut out, 28, BITS_PER_PIXEL);

    out.reserve_exact(file_len - PIXEL_OFFSET);
    let pad = [0u8; 3];
    for row in buffer.row_slices().rev() {
        for rgb in row.chunks(CHANNELS) {
            out.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
        }
        out.extend_from_slice(&pad[..padding]);
    }
    Ok(out)
}

/// Parse bitmap bytes back into a buffer.  Accepts bottom-up files,
/// as `encode` writes them, and top-down files with a negative
/// height.
pub fn decode(data: &[u8]) -> Result<PixelBuffer> {
    if data.len() < PIXEL_OFFSET {
        return Err(Error::Decode(format!(
            "{} bytes is shorter than the headers",
            data.len()
        )));
    }
    if &data[0..2] != b"BM" {
        return Err(Error::Decode("missing BM signature".to_string()));
    }
    let offset = get_u32(data, 10) as usize;
    let info_len = get_u32(data, 14) as usize;
    if info_len < INFO_HEADER_LEN || offset < FILE_HEADER_LEN + info_len {
        return Err(Error::Decode(format!(
            "unsupported info header of {} bytes",
            info_len
        )));
    }
    let width = get_u32(data, 18) as i32;
    let height = get_u32(data, 22) as i32;
    let bits = get_u16(data, 28);
    let compression = get_u32(data, 30);
    if bits != BITS_PER_PIXEL {
        return Err(Error::Decode(format!("{} bits per pixel", bits)));
    }
    if compression != 0 {
        return Err(Error::Decode(format!("compression method {}", compression)));
    }
    if width <= 0 || height == 0 {
        return Err(Error::Decode(format!("image size {}x{}", width, height)));
    }

    let columns = width as usize;
    let rows = height.unsigned_abs() as usize;
    let stride = columns * CHANNELS + row_padding(columns);
    let needed = stride
        .checked_mul(rows)
        .and_then(|n| n.checked_add(offset))
        .ok_or_else(|| Error::Decode("image size overflows".to_string()))?;
    if data.len() < needed {
        return Err(Error::Decode(format!(
            "expected {} bytes, found {}",
            needed,
            data.len()
        )));
    }

    let mut buffer = PixelBuffer::new(columns, rows)?;
    let row_len = buffer.row_len();
    for (i, row) in buffer.as_bytes_mut().chunks_mut(row_len).enumerate() {
        let stored = if height > 0 { rows - 1 - i } else { i };
        let start = offset + stored * stride;
        let src = &data[start..start + row_len];
        for (dst, bgr) in row.chunks_mut(CHANNELS).zip(src.chunks(CHANNELS)) {
            dst.copy_from_slice(&[bgr[2], bgr[1], bgr[0]]);
        }
    }
    Ok(buffer)
}

/// Encode a buffer and write it to `path`.
pub fn write<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
    let bytes = encode(buffer)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Read and decode the bitmap at `path`.
pub fn read<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    decode(&fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::Pixel;
    use crate::raster::Rgb;

    fn two_by_two() -> PixelBuffer {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.put(&Pixel(0, 0), Rgb(255, 0, 0));
        buf.put(&Pixel(1, 0), Rgb(0, 255, 0));
        buf.put(&Pixel(0, 1), Rgb(0, 0, 255));
        buf.put(&Pixel(1, 1), Rgb(10, 20, 30));
        buf
    }

    #[test]
    fn padding_rounds_rows_to_four_bytes() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(5), 1);
    }

    #[test]
    fn headers_follow_the_layout() {
        let bytes = encode(&two_by_two()).unwrap();
        // 2 pixels * 3 bytes + 2 bytes padding, two rows.
        assert_eq!(bytes.len(), 54 + 16);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(get_u32(&bytes, 2), 70);
        assert_eq!(get_u32(&bytes, 6), 0);
        assert_eq!(get_u32(&bytes, 10), 54);
        assert_eq!(get_u32(&bytes, 14), 40);
        assert_eq!(get_u32(&bytes, 18), 2);
        assert_eq!(get_u32(&bytes, 22), 2);
        assert_eq!(get_u16(&bytes, 26), 1);
        assert_eq!(get_u16(&bytes, 28), 24);
        assert!(bytes[30..54].iter().all(|b| *b == 0));
    }

    #[test]
    fn rows_are_bottom_up_and_bgr() {
        let bytes = encode(&two_by_two()).unwrap();
        // Bottom image row first.
        assert_eq!(&bytes[54..62], &[255, 0, 0, 30, 20, 10, 0, 0]);
        assert_eq!(&bytes[62..70], &[0, 0, 255, 0, 255, 0, 0, 0]);
    }

    #[test]
    fn decode_restores_the_original_colors() {
        let buf = two_by_two();
        let back = decode(&encode(&buf).unwrap()).unwrap();
        assert_eq!(back, buf);
        assert_eq!(back.get(&Pixel(1, 1)), Some(Rgb(10, 20, 30)));
    }

    #[test]
    fn decode_reads_top_down_files() {
        let buf = two_by_two();
        let mut bytes = encode(&buf).unwrap();
        put_u32(&mut bytes, 22, (-2i32) as u32);
        // Swap the two stored rows so the file really is top-down.
        let (top, bottom) = bytes[54..].split_at_mut(8);
        top.swap_with_slice(bottom);
        assert_eq!(decode(&bytes).unwrap(), buf);
    }

    #[test]
    fn empty_images_never_reach_the_encoder() {
        assert!(PixelBuffer::new(0, 3).is_err());
        assert!(PixelBuffer::from_raw(3, 0, Vec::new()).is_err());
        let one = PixelBuffer::new(1, 1).unwrap();
        assert_eq!(encode(&one).unwrap().len(), 54 + 4);
    }

    #[test]
    fn decode_rejects_garbage() {
        let good = encode(&two_by_two()).unwrap();

        let mut bad_magic = good.clone();
        bad_magic[0] = b'P';
        assert!(decode(&bad_magic).is_err());

        let mut bad_depth = good.clone();
        put_u16(&mut bad_depth, 28, 32);
        assert!(decode(&bad_depth).is_err());

        assert!(decode(&good[..good.len() - 1]).is_err());
        assert!(decode(&good[..20]).is_err());
    }
}
