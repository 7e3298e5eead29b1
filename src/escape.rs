// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration.  The Mandelbrot takes a point on the
//! complex plane and repeatedly squares the running value and adds
//! the point back, measuring how quickly that number goes to
//! infinity.  Once `|z|` passes 2 the sequence is known to diverge,
//! so the count of iterations taken to get there is the "velocity"
//! used to color the pixel.

use num::Complex;

/// The outcome of probing one sample point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Escape {
    /// The index of the iteration that crossed the escape radius, or
    /// the limit if none did.
    pub iterations: usize,
    /// False if the point never escaped and is taken to be inside
    /// the set.
    pub escaped: bool,
}

impl Escape {
    /// The result for a point that stayed bounded for `limit`
    /// iterations.
    pub fn interior(limit: usize) -> Escape {
        Escape {
            iterations: limit,
            escaped: false,
        }
    }
}

/// Iterate `z = z * z + c` from zero at most `limit` times.  Each
/// pass squares and adds first, then tests `|z|^2 > 4`; the index of
/// the first pass whose result lies outside the radius is reported.
/// So `c = 3` escapes at 0, `c = 2` lands exactly on the radius at
/// index 0 and escapes at 1.
pub fn escape_time(c: Complex<f64>, limit: usize) -> Escape {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > 4.0 {
            return Escape {
                iterations: i,
                escaped: true,
            };
        }
    }
    Escape::interior(limit)
}
