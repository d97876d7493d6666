//! Read the Sense HAT once and scroll the greeting across its LED matrix.
//!
//! Takes no arguments; `RUST_LOG` controls log verbosity only. Exits 0 on
//! success, 1 on any hardware failure.

use log::error;
use sensehat_message::{DisplayConfig, MessageDisplay};
use std::process;

fn main() {
    pretty_env_logger::init();

    let mut display = match MessageDisplay::new(DisplayConfig::default()) {
        Ok(display) => display,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = display.run() {
        error!("{}", e);
        process::exit(1);
    }
}
