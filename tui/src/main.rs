use std::process::ExitCode;

use anuncios_tui::Cli;
use anuncios_tui::run_main;
use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    run_main(cli).await
}
