// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Where finished images go.  Writing the raster and converting it
//! to a compressed format are two separate operations with separate
//! failure modes: a conversion that fails leaves the bitmap intact.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use image::ImageFormat;
use log::info;

use crate::bmp;
use crate::error::{Error, Result};
use crate::raster::PixelBuffer;

/// The compressed formats a bitmap can be converted to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetFormat {
    /// Lossy JPEG.
    Jpeg,
    /// Lossless PNG.
    Png,
}

impl TargetFormat {
    /// The file extension used for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Jpeg => "jpg",
            TargetFormat::Png => "png",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            TargetFormat::Jpeg => ImageFormat::Jpeg,
            TargetFormat::Png => ImageFormat::Png,
        }
    }
}

impl FromStr for TargetFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            _ => Err(Error::Domain(format!("unknown image format '{}'", s))),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Append `.ext` to a path, keeping any dots already in it.
pub fn with_suffix(stem: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = stem.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Where the conversion of the bitmap at `bitmap` into `format` is
/// written.  A `.bmp` extension is replaced; any other name keeps all
/// of its dots and gets the new extension appended.
pub fn converted_path(bitmap: &Path, format: TargetFormat) -> PathBuf {
    let is_bmp = bitmap
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("bmp"));
    if is_bmp {
        with_suffix(&bitmap.with_extension(""), format.extension())
    } else {
        with_suffix(bitmap, format.extension())
    }
}

/// Something that can persist a pixel buffer.
pub trait ImageSink {
    /// Write the raster to `path` as an uncompressed bitmap.
    fn write_raster(&self, buffer: &PixelBuffer, path: &Path) -> Result<()>;

    /// Convert the bitmap at `path` into `format`, next to it, and
    /// return the path of the new file.
    fn transcode(&self, path: &Path, format: TargetFormat) -> Result<PathBuf>;
}

/// How a bitmap is turned into a compressed image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transcoder {
    /// Decode and re-encode in-process.
    Builtin,
    /// Run an external program as `program INPUT OUTPUT`, the way
    /// ImageMagick's `convert` is called.
    External(String),
}

impl Default for Transcoder {
    fn default() -> Self {
        Transcoder::Builtin
    }
}

impl Transcoder {
    fn run(&self, input: &Path, output: &Path, format: TargetFormat) -> Result<()> {
        let failed = |reason: String| Error::Transcode {
            path: input.display().to_string(),
            reason,
        };
        match self {
            Transcoder::Builtin => {
                // The bitmap's name need not end in .bmp, so sniff the header.
                let img = image::io::Reader::open(input)
                    .and_then(|reader| reader.with_guessed_format())
                    .map_err(|e| failed(e.to_string()))?
                    .decode()
                    .map_err(|e| failed(e.to_string()))?;
                img.save_with_format(output, format.image_format())
                    .map_err(|e| failed(e.to_string()))
            }
            Transcoder::External(program) => {
                let status = Command::new(program)
                    .arg(input)
                    .arg(output)
                    .status()
                    .map_err(|e| failed(format!("could not run {}: {}", program, e)))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(failed(format!("{} exited with {}", program, status)))
                }
            }
        }
    }
}

/// Writes bitmaps to the file system and converts them with a
/// configurable transcoder.
#[derive(Clone, Debug, Default)]
pub struct FileSink {
    transcoder: Transcoder,
}

impl FileSink {
    /// A sink that converts with `transcoder`.
    pub fn new(transcoder: Transcoder) -> Self {
        FileSink { transcoder }
    }
}

impl ImageSink for FileSink {
    fn write_raster(&self, buffer: &PixelBuffer, path: &Path) -> Result<()> {
        bmp::write(buffer, path)?;
        info!("Wrote image as bitmap: {}", path.display());
        Ok(())
    }

    fn transcode(&self, path: &Path, format: TargetFormat) -> Result<PathBuf> {
        let target = converted_path(path, format);
        self.transcoder.run(path, &target, format)?;
        info!("Converted bitmap to {}: {}", format, target.display());
        Ok(target)
    }
}
