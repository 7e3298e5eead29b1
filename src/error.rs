// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type used across the crate.  Rendering failures
//! (`Domain`, `Resource`, `Worker`) are kept apart from the failures
//! of whatever the finished raster is handed to afterwards (`Io`,
//! `Decode`, `Transcode`), so a caller can always tell whether the
//! pixels themselves are trustworthy.

use failure::Fail;
use std::io;

/// Everything that can go wrong while rendering or writing an image.
#[derive(Debug, Fail)]
pub enum Error {
    /// The viewport or a render parameter cannot describe a valid grid.
    #[fail(display = "invalid render parameters: {}", _0)]
    Domain(String),

    /// The pixel buffer could not be allocated.
    #[fail(display = "could not allocate a {}x{} pixel buffer", columns, rows)]
    Resource {
        /// Requested width.
        columns: usize,
        /// Requested height.
        rows: usize,
    },

    /// A render worker panicked before finishing its band.
    #[fail(display = "render worker failed: {}", _0)]
    Worker(String),

    /// Reading or writing the bitmap failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),

    /// A bitmap could not be parsed.
    #[fail(display = "malformed bitmap: {}", _0)]
    Decode(String),

    /// The optional format conversion failed.  The bitmap it started
    /// from is still on disk.
    #[fail(display = "could not convert {}: {}", path, reason)]
    Transcode {
        /// The file that was being converted.
        path: String,
        /// What the converter reported.
        reason: String,
    },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn fails() -> Result<()> {
            Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        match fails() {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn transcode_message_names_the_file() {
        let e = Error::Transcode {
            path: "img.bmp".to_string(),
            reason: "no such program".to_string(),
        };
        assert_eq!(format!("{}", e), "could not convert img.bmp: no such program");
    }
}
