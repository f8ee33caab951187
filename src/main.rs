mod app;
mod catalog;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod store;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let loaded = Config::load();
    let cli = Cli::parse().with_config(&loaded.config);

    utils::init_logging(cli.debug);
    loaded.report();

    if let Err(e) = app::run(cli, loaded.config.settings_path.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
