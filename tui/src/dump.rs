//! Headless mode: fetch once, render one frame off-screen, print it.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use serde::Serialize;
use tokio::sync::mpsc::unbounded_channel;
use tracing::warn;

use crate::app_event::AppEvent;
use crate::app_event_sender::AppEventSender;
use crate::config::Config;
use crate::fetch::FetchState;
use crate::fetch::source_from_settings;
use crate::listing::ListingRecord;
use crate::render::buffer_lines;
use crate::screen::ListingsScreen;
use crate::style::style_for;

const SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DumpOutput {
    pub text: String,
    /// False when the fetch ended in an error.
    pub success: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DumpPayload<'a> {
    schema_version: &'static str,
    endpoint: String,
    state: &'static str,
    error: Option<&'a str>,
    records: Vec<DumpRecord<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DumpRecord<'a> {
    #[serde(flatten)]
    record: &'a ListingRecord,
    id_source: &'static str,
}

impl<'a> From<&'a ListingRecord> for DumpRecord<'a> {
    fn from(record: &'a ListingRecord) -> Self {
        Self {
            record,
            id_source: record.id.source(),
        }
    }
}

/// Mount a screen, wait until the fetch settles, and produce the output.
pub async fn run_dump(
    config: &Config,
    format: DumpFormat,
    width: u16,
) -> color_eyre::Result<DumpOutput> {
    let (tx, mut rx) = unbounded_channel();
    let mut screen = ListingsScreen::new(style_for(config.platform));
    screen.mount(source_from_settings(&config.client), AppEventSender::new(tx));

    while screen.state().is_loading() {
        match rx.recv().await {
            Some(AppEvent::ListingsFetched { attempt, outcome }) => {
                screen.on_listings_fetched(attempt, outcome);
            }
            Some(AppEvent::ExitRequest) => {}
            None => {
                warn!("listings task went away without reporting");
                break;
            }
        }
    }

    let state = screen.state();
    let success = !matches!(state, FetchState::Error(_));
    let text = match format {
        DumpFormat::Json => {
            let payload = DumpPayload {
                schema_version: SCHEMA_VERSION,
                endpoint: endpoint_label(config),
                state: state.label(),
                error: state.error_message(),
                records: state
                    .records()
                    .unwrap_or_default()
                    .iter()
                    .map(DumpRecord::from)
                    .collect(),
            };
            let mut json = serde_json::to_string_pretty(&payload)?;
            json.push('\n');
            json
        }
        DumpFormat::Text => render_text(&mut screen, width),
    };
    screen.unmount();
    Ok(DumpOutput { text, success })
}

/// One frame tall enough for every row, as plain text.
pub fn render_text(screen: &mut ListingsScreen, width: u16) -> String {
    let area = Rect::new(0, 0, width.max(1), screen.full_height());
    let mut buf = Buffer::empty(area);
    screen.render(area, &mut buf);
    let mut text = buffer_lines(&buf).join("\n");
    text.push('\n');
    text
}

fn endpoint_label(config: &Config) -> String {
    anuncios_backend_client::listings_url(&config.client.base_url, &config.client.listings_path)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| config.client.base_url.clone())
}
