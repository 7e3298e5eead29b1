// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps escape counts to colors.  Interior points are black; every
//! escaped point gets a non-black color that depends only on its
//! escape count and the iteration limit.  All arithmetic is integral
//! so that the same inputs produce the same bytes everywhere.

use crate::error::Error;
use crate::escape::Escape;
use crate::raster::Rgb;
use std::fmt;
use std::str::FromStr;

/// Stops of the default gradient: deep blue, through white, to a
/// burnt orange.
const GRADIENT: [Rgb; 5] = [
    Rgb(0, 7, 100),
    Rgb(32, 107, 203),
    Rgb(237, 255, 255),
    Rgb(255, 170, 0),
    Rgb(120, 40, 0),
];

// Fixed-point scale used when interpolating between two stops.
const FRACTION: u64 = 256;

const GRAY_FLOOR: u64 = 48;

/// The available color schemes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// A five-stop gradient stretched over the full iteration range.
    Gradient,
    /// A gray ramp from dark to white.
    Grayscale,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Gradient
    }
}

fn lerp(a: u8, b: u8, fraction: u64) -> u8 {
    let (a, b) = (i64::from(a), i64::from(b));
    (a + (b - a) * fraction as i64 / FRACTION as i64) as u8
}

impl Palette {
    /// Color a single probe result.
    pub fn color(self, escape: Escape, limit: usize) -> Rgb {
        if !escape.escaped {
            return Rgb::BLACK;
        }
        // Escaped counts run from 0 to limit - 1.
        let span = limit.saturating_sub(1) as u64;
        let n = (escape.iterations as u64).min(span);
        match self {
            Palette::Gradient => {
                if span == 0 {
                    return GRADIENT[0];
                }
                let segments = (GRADIENT.len() - 1) as u64;
                let position = n * segments * FRACTION / span;
                let segment = (position / FRACTION) as usize;
                if segment >= GRADIENT.len() - 1 {
                    return GRADIENT[GRADIENT.len() - 1];
                }
                let fraction = position % FRACTION;
                let (from, to) = (GRADIENT[segment], GRADIENT[segment + 1]);
                Rgb(
                    lerp(from.0, to.0, fraction),
                    lerp(from.1, to.1, fraction),
                    lerp(from.2, to.2, fraction),
                )
            }
            Palette::Grayscale => {
                let level = if span == 0 {
                    GRAY_FLOOR
                } else {
                    GRAY_FLOOR + n * (255 - GRAY_FLOOR) / span
                };
                let level = level as u8;
                Rgb(level, level, level)
            }
        }
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gradient" => Ok(Palette::Gradient),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Palette::Grayscale),
            _ => Err(Error::Domain(format!("unknown palette '{}'", s))),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Palette::Gradient => write!(f, "gradient"),
            Palette::Grayscale => write!(f, "grayscale"),
        }
    }
}
