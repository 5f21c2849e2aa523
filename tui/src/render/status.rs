use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Widget;

use crate::fetch::FetchState;
use crate::key_hint;
use crate::style::StyleFragment;
use crate::viewport::Viewport;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Right-hand footer text: where the selection is, or what the screen is
/// doing.
pub fn position_label(state: &FetchState, viewport: &Viewport) -> String {
    match state {
        FetchState::Idle => String::new(),
        FetchState::Loading => "loading".to_string(),
        FetchState::Error(_) => "error".to_string(),
        FetchState::Success(records) if records.is_empty() => "0 listings".to_string(),
        FetchState::Success(records) => match viewport.selected() {
            Some(index) => format!("{} / {}", index + 1, records.len()),
            None => format!("{} listings", records.len()),
        },
    }
}

pub fn render_footer(
    area: Rect,
    buf: &mut Buffer,
    state: &FetchState,
    viewport: &Viewport,
    style: &StyleFragment,
) {
    if area.is_empty() {
        return;
    }
    let mut hints: Vec<Span<'static>> = Vec::new();
    if matches!(state, FetchState::Success(records) if !records.is_empty()) {
        hints.extend(key_hint::hint_spans(&[key_hint::UP, key_hint::DOWN], "move"));
        hints.push("   ".into());
        hints.extend(key_hint::hint_spans(
            &[key_hint::PAGE_UP, key_hint::PAGE_DOWN],
            "page",
        ));
        hints.push("   ".into());
    }
    hints.extend(key_hint::hint_spans(&[key_hint::QUIT], "quit"));
    Line::from(hints).render(area, buf);

    let position = position_label(state, viewport);
    if !position.is_empty() {
        Line::from(Span::styled(position, style.accent).dim())
            .right_aligned()
            .render(area, buf);
    }
}
