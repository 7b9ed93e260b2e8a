//! Command-line entry point for the orrery viewer.

use std::path::Path;

use orrery::{Options, Viewer};

fn main() {
    env_logger::init();

    // Optional preset file argument; anything unloadable falls back to
    // the built-in defaults.
    let options = match std::env::args().nth(1) {
        Some(preset) => match Options::load(Path::new(&preset)) {
            Ok(options) => options,
            Err(e) => {
                log::warn!("preset {preset} not usable ({e}); using defaults");
                Options::default()
            }
        },
        None => Options::default(),
    };

    if let Err(e) = Viewer::builder().with_options(options).run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
