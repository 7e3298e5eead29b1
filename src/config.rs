// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render parameters, their defaults, and the command line that sets
//! them.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use num::Complex;

use crate::error::{Error, Result};
use crate::palette::Palette;
use crate::planes::Viewport;
use crate::sink::{converted_path, with_suffix, TargetFormat, Transcoder};

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and expecting
/// floating point numbers.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> std::result::Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> std::result::Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_parse<T: FromStr>(s: &str) -> std::result::Result<(), String>
where
    T::Err: std::fmt::Display,
{
    T::from_str(s).map(|_| ()).map_err(|e| e.to_string())
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const MAGNIFICATION: &str = "magnification";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";
const FORMAT: &str = "format";
const CONVERTER: &str = "converter";

/// Everything needed for one render and its output.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub columns: usize,
    /// Image height in pixels.
    pub rows: usize,
    /// Zoom factor; the image is `1 / magnification` plane units wide.
    pub magnification: f64,
    /// Plane coordinate of the image center.
    pub center: Complex<f64>,
    /// Maximum iterations before a point counts as interior.
    pub limit: usize,
    /// Output path without extension.
    pub output: PathBuf,
    /// Worker threads.
    pub threads: usize,
    /// Color scheme.
    pub palette: Palette,
    /// Format to convert the bitmap to, if any.
    pub format: Option<TargetFormat>,
    /// What performs the conversion.
    pub transcoder: Transcoder,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            columns: 1000,
            rows: 1000,
            magnification: 10.0,
            center: Complex::new(-0.51, 0.61),
            limit: 600,
            output: PathBuf::from("img"),
            threads: num_cpus::get(),
            palette: Palette::Gradient,
            format: Some(TargetFormat::Jpeg),
            transcoder: Transcoder::Builtin,
        }
    }
}

impl RenderConfig {
    /// Build and validate the viewport these parameters describe.
    pub fn viewport(&self) -> Result<Viewport> {
        Viewport::new(
            self.center,
            self.magnification,
            self.columns,
            self.rows,
            self.limit,
        )
    }

    /// Where the bitmap is written.
    pub fn bitmap_path(&self) -> PathBuf {
        with_suffix(&self.output, "bmp")
    }

    /// Where a converted image in `format` ends up.
    pub fn target_path(&self, format: TargetFormat) -> PathBuf {
        converted_path(&self.bitmap_path(), format)
    }

    /// Read parameters from parsed command-line arguments.  Anything
    /// absent keeps its default.
    pub fn from_matches(matches: &ArgMatches) -> Result<RenderConfig> {
        let mut config = RenderConfig::default();
        let invalid = |what: &str, s: &str| Error::Domain(format!("could not parse {} '{}'", what, s));

        if let Some(s) = matches.value_of(SIZE) {
            let (columns, rows) = parse_pair(s, 'x').ok_or_else(|| invalid("image size", s))?;
            config.columns = columns;
            config.rows = rows;
        }
        if let Some(s) = matches.value_of(CENTER) {
            config.center = parse_complex(s).ok_or_else(|| invalid("center", s))?;
        }
        if let Some(s) = matches.value_of(MAGNIFICATION) {
            config.magnification = s.parse().map_err(|_| invalid("magnification", s))?;
        }
        if let Some(s) = matches.value_of(ITERATIONS) {
            config.limit = s.parse().map_err(|_| invalid("iteration count", s))?;
        }
        if let Some(s) = matches.value_of(THREADS) {
            config.threads = s.parse().map_err(|_| invalid("thread count", s))?;
        }
        if let Some(s) = matches.value_of(PALETTE) {
            config.palette = s.parse()?;
        }
        if let Some(s) = matches.value_of(FORMAT) {
            config.format = if s == "none" { None } else { Some(s.parse()?) };
        }
        if let Some(s) = matches.value_of(CONVERTER) {
            config.transcoder = if s == "builtin" {
                Transcoder::Builtin
            } else {
                Transcoder::External(s.to_string())
            };
        }
        if let Some(s) = matches.value_of_os(OUTPUT) {
            config.output = PathBuf::from(s);
        }
        Ok(config)
    }
}

/// The command line.  Defaults are left to `RenderConfig::default`.
pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("mandelraster")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders the Mandelbrot set to a bitmap")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output path without extension [default: img]"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, COLUMNSxROWS [default: 1000x1000]"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the view on the complex plane, X,Y [default: -0.51,0.61]"),
        )
        .arg(
            Arg::with_name(MAGNIFICATION)
                .long(MAGNIFICATION)
                .short("m")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        ::std::f64::MIN_POSITIVE,
                        "Could not parse magnification",
                        "Magnification must be greater than zero",
                    )
                })
                .help("Zoom factor; 1 shows a region one unit wide [default: 10]"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        "Could not parse iteration count",
                        "Iteration count must be at least 1",
                    )
                })
                .help("Iterations before a point counts as inside the set [default: 600]"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        "Could not parse thread count",
                        "Thread count must be at least 1",
                    )
                })
                .help("Number of threads to use in the renderer [default: CPU count]"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .validator(|s| validate_parse::<Palette>(&s))
                .help("Color scheme: gradient or grayscale [default: gradient]"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .long(FORMAT)
                .short("f")
                .takes_value(true)
                .validator(|s| {
                    if s == "none" {
                        Ok(())
                    } else {
                        validate_parse::<TargetFormat>(&s)
                    }
                })
                .help("Convert the bitmap to jpg or png, or none [default: jpg]"),
        )
        .arg(
            Arg::with_name(CONVERTER)
                .long(CONVERTER)
                .short("x")
                .takes_value(true)
                .help("Program to convert with, called as PROGRAM IN OUT, or builtin [default: builtin]"),
        )
}
