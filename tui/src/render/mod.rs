//! Frame composition for the listings screen.
//!
//! ```text
//! Listings
//! Browse every listing registered in the system
//!
//! ┌Listing records──────────────────────────────┐
//! │ ID  Image   Name     Category  Description  │
//! │ ─────────────────────────────────────────── │
//! │ ...                                         │
//! └─────────────────────────────────────────────┘
//! ↑/↓ move   pgup/pgdn page   q quit       1 / 9
//! ```

pub mod status;
pub mod table;

use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::fetch::FetchState;
use crate::style::StyleFragment;
use crate::viewport::ROW_HEIGHT;
use crate::viewport::Viewport;

pub use table::EMPTY_PLACEHOLDER;

pub const TITLE: &str = "Listings";
pub const SUBTITLE: &str = "Browse every listing registered in the system";
pub const PANEL_TITLE: &str = "Listing records";
pub const LOADING_TEXT: &str = "Loading listings...";
pub const ERROR_PLACEHOLDER: &str = "The listings could not be loaded.";

/// Lines outside the panel body: title, subtitle, spacer, the panel's two
/// borders and the footer.
pub const CHROME_HEIGHT: u16 = 6;

/// Everything the frame depends on besides the viewport.
#[derive(Debug, Clone, Copy)]
pub struct ScreenView<'a> {
    pub state: &'a FetchState,
    pub style: &'a StyleFragment,
    pub spinner_frame: usize,
}

pub fn render_screen(area: Rect, buf: &mut Buffer, view: ScreenView<'_>, viewport: &mut Viewport) {
    let [title_area, subtitle_area, _, panel_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    Line::styled(TITLE, view.style.title).render(title_area, buf);
    Line::styled(SUBTITLE, view.style.subtitle).render(subtitle_area, buf);

    let block = Block::bordered()
        .title(PANEL_TITLE)
        .border_style(view.style.muted);
    let body = block.inner(panel_area);
    block.render(panel_area, buf);

    match view.state {
        FetchState::Idle => viewport.set_view_rows(0),
        FetchState::Loading => {
            viewport.set_view_rows(0);
            render_loading(body, buf, view);
        }
        FetchState::Error(message) => {
            viewport.set_view_rows(0);
            render_error(body, buf, message, view.style);
        }
        FetchState::Success(records) => {
            table::render_table(body, buf, records, viewport, view.style);
        }
    }

    status::render_footer(footer_area, buf, view.state, viewport, view.style);
}

/// Height at which every row of `state` fits without scrolling.
pub fn full_height(state: &FetchState) -> u16 {
    let body = match state {
        FetchState::Success(records) if records.is_empty() => usize::from(table::HEADER_HEIGHT) + 1,
        FetchState::Success(records) => {
            usize::from(table::HEADER_HEIGHT) + records.len().saturating_mul(ROW_HEIGHT as usize)
        }
        FetchState::Error(_) => 3,
        FetchState::Idle | FetchState::Loading => 1,
    };
    u16::try_from(body)
        .unwrap_or(u16::MAX)
        .saturating_add(CHROME_HEIGHT)
}

fn render_loading(area: Rect, buf: &mut Buffer, view: ScreenView<'_>) {
    if area.is_empty() {
        return;
    }
    let row = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    Line::from(vec![
        Span::styled(status::spinner_glyph(view.spinner_frame), view.style.accent),
        " ".into(),
        Span::styled(LOADING_TEXT, view.style.muted),
    ])
    .centered()
    .render(row, buf);
}

/// Banner with the user-facing message, then the error placeholder. No
/// table header: there is no data to head.
fn render_error(area: Rect, buf: &mut Buffer, message: &str, style: &StyleFragment) {
    let [banner, _, placeholder] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    if !banner.is_empty() {
        Line::styled(message, style.error)
            .centered()
            .render(banner, buf);
    }
    if !placeholder.is_empty() {
        Line::styled(ERROR_PLACEHOLDER, style.muted)
            .centered()
            .render(placeholder, buf);
    }
}

/// Text content of `buf`, one string per row with trailing blanks removed.
/// Wide glyphs occupy their first cell only.
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let mut line = String::new();
            let mut skip = 0usize;
            for x in area.left()..area.right() {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let symbol = buf[(x, y)].symbol();
                line.push_str(symbol);
                skip = symbol.width().saturating_sub(1);
            }
            line.trim_end().to_string()
        })
        .collect()
}
