//! Fireworks Player - headless show binary
//!
//! Plays the show described by `fireworks.toml` in the working directory,
//! or the default show when the file is absent. Set `RUST_LOG` to adjust
//! verbosity.

use anyhow::Result;
use fireworks_player::{play, ShowConfig};
use std::path::Path;

const CONFIG_FILE: &str = "fireworks.toml";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ShowConfig::load_or_default(Path::new(CONFIG_FILE))?;
    play(&config)
}
