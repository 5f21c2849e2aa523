//! Per-platform presentation tweaks.
//!
//! The table layout is the same everywhere; only a small fragment of style
//! (text wrapping and a few colors) varies with the target platform.

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Terminal,
    Web,
    Ios,
    Android,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Web => "web",
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleFragment {
    /// Allow wrapping to break inside a word. When false, truncation happens
    /// at word boundaries.
    pub soft_wrap: bool,
    pub title: Style,
    pub subtitle: Style,
    pub header: Style,
    pub cell: Style,
    pub price: Style,
    pub muted: Style,
    pub error: Style,
    pub selected: Style,
    pub accent: Style,
}

impl StyleFragment {
    const fn base(soft_wrap: bool, accent: Color) -> Self {
        Self {
            soft_wrap,
            title: Style::new().add_modifier(Modifier::BOLD),
            subtitle: Style::new().add_modifier(Modifier::DIM),
            header: Style::new().fg(accent).add_modifier(Modifier::BOLD),
            cell: Style::new(),
            price: Style::new().fg(Color::Green),
            muted: Style::new().add_modifier(Modifier::DIM),
            error: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            selected: Style::new().add_modifier(Modifier::REVERSED),
            accent: Style::new().fg(accent),
        }
    }
}

const TERMINAL_STYLE: StyleFragment = StyleFragment::base(true, Color::Cyan);
const WEB_STYLE: StyleFragment = StyleFragment::base(true, Color::Blue);
const IOS_STYLE: StyleFragment = StyleFragment::base(false, Color::Blue);
const ANDROID_STYLE: StyleFragment = StyleFragment::base(false, Color::Green);

/// Constant lookup; no other platform detection happens anywhere.
pub fn style_for(platform: Platform) -> StyleFragment {
    match platform {
        Platform::Terminal => TERMINAL_STYLE,
        Platform::Web => WEB_STYLE,
        Platform::Ios => IOS_STYLE,
        Platform::Android => ANDROID_STYLE,
    }
}
