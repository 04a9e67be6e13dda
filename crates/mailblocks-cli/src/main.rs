mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use mailblocks_config::Config;

use cli::MailblocksCli;

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = MailblocksCli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?.unwrap_or_else(|| {
            log::warn!("config file {} not found, using defaults", path.display());
            Config::default()
        }),
        None => {
            log::debug!("config path: {}", Config::config_path().display());
            Config::load_or_default()?
        }
    };

    let output = commands::run(cli.command, &config)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
