use anyhow::Result;

use mano_engine::logging::{init_logging, LoggingConfig};
use mano_engine::window::Runtime;
use mano_hand::app::load_texture;
use mano_hand::{HandApp, HandConfig};

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = run() {
        eprintln!("mano-hand: {err:#}");
        std::process::exit(-1);
    }
}

fn run() -> Result<()> {
    let config = HandConfig::default();

    // Decoded up front so a missing asset fails before any window exists.
    let texture = load_texture(&config)?;

    let window = config.window.clone();
    let gpu = config.gpu.clone();
    Runtime::run(window, gpu, HandApp::new(config, texture))
}
