//! Terminal browser for the listings ("anuncios") collection.
//!
//! The screen fetches `GET /anuncios` once when mounted, normalizes the
//! loosely typed payload into [`listing::ListingRecord`]s and draws them as a
//! virtualized, column-aligned table.

use std::process::ExitCode;

use tracing::info;

pub mod app;
pub mod app_event;
pub mod app_event_sender;
pub mod cli;
pub mod config;
pub mod dump;
pub mod fetch;
pub mod key_hint;
pub mod listing;
pub mod logging;
pub mod normalize;
pub mod render;
pub mod screen;
pub mod style;
pub mod tui;
pub mod viewport;

pub use cli::Cli;
pub use config::Config;
pub use fetch::FetchController;
pub use fetch::FetchState;
pub use listing::ListingRecord;
pub use normalize::normalize_listings;
pub use screen::ListingsScreen;

pub async fn run_main(cli: Cli) -> color_eyre::Result<ExitCode> {
    let config = Config::load(cli.overrides())?;

    if cli.dump {
        logging::init_stderr_logging();
        let format = if cli.json {
            dump::DumpFormat::Json
        } else {
            dump::DumpFormat::Text
        };
        let output = dump::run_dump(&config, format, cli.width).await?;
        print!("{}", output.text);
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let _log_guard = logging::init_file_logging(&config.log_dir)?;
    info!(
        base_url = %config.client.base_url,
        platform = %config.platform,
        config = ?config.source_path,
        "starting listings screen"
    );
    app::run_app(&config).await?;
    Ok(ExitCode::SUCCESS)
}
