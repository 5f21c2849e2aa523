//! Key bindings for the listings screen and their footer rendering.

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Span;

const CTRL_PREFIX: &str = "ctrl + ";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyBinding {
    key: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Press or repeat of exactly this key and modifier set.
    pub fn is_press(&self, event: KeyEvent) -> bool {
        self.key == event.code
            && self.modifiers == event.modifiers
            && matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

pub const fn plain(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::NONE)
}

pub const fn ctrl(key: KeyCode) -> KeyBinding {
    KeyBinding::new(key, KeyModifiers::CONTROL)
}

pub const UP: &[KeyBinding] = &[plain(KeyCode::Up), plain(KeyCode::Char('k'))];
pub const DOWN: &[KeyBinding] = &[plain(KeyCode::Down), plain(KeyCode::Char('j'))];
pub const PAGE_UP: &[KeyBinding] = &[plain(KeyCode::PageUp)];
pub const PAGE_DOWN: &[KeyBinding] = &[plain(KeyCode::PageDown)];
pub const FIRST: &[KeyBinding] = &[plain(KeyCode::Home)];
pub const LAST: &[KeyBinding] = &[plain(KeyCode::End)];
pub const QUIT: &[KeyBinding] = &[
    plain(KeyCode::Char('q')),
    plain(KeyCode::Esc),
    ctrl(KeyCode::Char('c')),
];

pub fn any_pressed(bindings: &[KeyBinding], event: KeyEvent) -> bool {
    bindings.iter().any(|binding| binding.is_press(event))
}

impl From<KeyBinding> for Span<'static> {
    fn from(binding: KeyBinding) -> Self {
        (&binding).into()
    }
}

impl From<&KeyBinding> for Span<'static> {
    fn from(binding: &KeyBinding) -> Self {
        let modifiers = if binding.modifiers.contains(KeyModifiers::CONTROL) {
            CTRL_PREFIX
        } else {
            ""
        };
        let key = match binding.key {
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::PageUp => "pgup".to_string(),
            KeyCode::PageDown => "pgdn".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            other => format!("{other}").to_ascii_lowercase(),
        };
        Span::styled(format!("{modifiers}{key}"), key_hint_style())
    }
}

fn key_hint_style() -> Style {
    Style::default().bold()
}

/// `"↑/↓ move"`-style hint: the first binding of each group, then a label.
pub fn hint_spans(groups: &[&[KeyBinding]], label: &'static str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, group) in groups.iter().filter_map(|g| g.first()).enumerate() {
        if i > 0 {
            spans.push("/".dim());
        }
        spans.push(group.into());
    }
    spans.push(" ".into());
    spans.push(label.dim());
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn key_binding_labels() {
        assert_eq!(Span::from(plain(KeyCode::Char('q'))).content.as_ref(), "q");
        assert_eq!(Span::from(ctrl(KeyCode::Char('c'))).content.as_ref(), "ctrl + c");
        assert_eq!(Span::from(plain(KeyCode::Up)).content.as_ref(), "↑");
        assert_eq!(Span::from(plain(KeyCode::PageDown)).content.as_ref(), "pgdn");
    }

    #[test]
    fn is_press_requires_exact_modifiers() {
        let binding = ctrl(KeyCode::Char('c'));
        let press = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Release,
        );
        let bare = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);

        assert!(binding.is_press(press));
        assert!(!binding.is_press(release));
        assert!(!binding.is_press(bare));
    }

    #[test]
    fn vim_keys_are_aliases() {
        let j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(any_pressed(DOWN, j));
        assert!(!any_pressed(UP, j));
    }

    #[test]
    fn hint_joins_primary_bindings() {
        assert_eq!(text(&hint_spans(&[UP, DOWN], "move")), "↑/↓ move");
        assert_eq!(text(&hint_spans(&[QUIT], "quit")), "q quit");
    }
}
