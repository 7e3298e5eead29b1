// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate env_logger;
extern crate log;
extern crate mandelraster;

use log::info;
use mandelraster::config::{app, RenderConfig};
use mandelraster::{FileSink, ImageSink, PixelBuffer, Renderer};
use std::process;
use std::time::Instant;

// The bitmap is on disk but the conversion after it failed.
const EXIT_TRANSCODE: i32 = 2;

fn render(config: &RenderConfig) -> mandelraster::Result<PixelBuffer> {
    let viewport = config.viewport()?;
    let renderer = Renderer::new(viewport, config.palette);

    let start = Instant::now();
    let pixels = renderer.render(config.threads)?;
    info!(
        "Rendered {}x{} in {:.2?} on {} threads",
        config.columns,
        config.rows,
        start.elapsed(),
        config.threads
    );
    Ok(pixels)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = app().get_matches();
    let config = match RenderConfig::from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let pixels = match render(&config) {
        Ok(pixels) => pixels,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            process::exit(1);
        }
    };

    let sink = FileSink::new(config.transcoder.clone());
    let bitmap = config.bitmap_path();
    if let Err(e) = sink.write_raster(&pixels, &bitmap) {
        eprintln!("Could not write bitmap {}: {}", bitmap.display(), e);
        process::exit(1);
    }

    if let Some(format) = config.format {
        if let Err(e) = sink.transcode(&bitmap, format) {
            eprintln!(
                "Bitmap written to {}, but conversion to {} failed: {}",
                bitmap.display(),
                config.target_path(format).display(),
                e
            );
            process::exit(EXIT_TRANSCODE);
        }
    }
}
