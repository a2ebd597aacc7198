use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod args;
mod commands;

use args::{Cli, Command};

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);
    info!(core_version = %tilepath_core::version(), "starting tilepath");

    let output = match &cli.command {
        Command::Route(args) => serde_json::to_string_pretty(&commands::route(args)?)?,
        Command::Step(args) => serde_json::to_string_pretty(&commands::step(args)?)?,
    };
    println!("{output}");
    Ok(())
}
