use anyhow::Context;
use carousel::config;
use carousel::gui::app::AppModel;
use carousel::sys::runtime;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "carousel", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Directory holding img1.jpg .. img10.jpg (overrides the config file)
    #[arg(short = 'a', long)]
    assets: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    write_default: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_default {
        let path = config::write_default_config(cli.config.as_deref())
            .context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config_path = cli.config.or_else(|| config::get_config_path().ok());
    let mut config = config::load_or_default(config_path.as_deref());
    if let Some(assets) = cli.assets {
        config.assets_dir = assets;
    }

    let (tx, rx) = async_channel::bounded(64);
    let (request_tx, request_rx) = async_channel::unbounded();

    // Start Background Services
    runtime::start_background_services(tx, request_rx, config_path.clone());

    let app = RelmApp::new("org.carousel.ring").with_args(Vec::new());

    app.run::<AppModel>((config, config_path, request_tx, rx));
    Ok(())
}
