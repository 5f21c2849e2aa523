//! The listings screen: fetch lifecycle, selection and drawing in one place.

use std::sync::Arc;

use anuncios_backend_client::FetchError;
use anuncios_backend_client::ListingSource;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tracing::debug;

use crate::app_event::FetchOutcome;
use crate::app_event_sender::AppEventSender;
use crate::fetch::FetchController;
use crate::fetch::FetchState;
use crate::key_hint;
use crate::render;
use crate::render::ScreenView;
use crate::style::StyleFragment;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    Redraw,
    Quit,
}

#[derive(Debug)]
pub struct ListingsScreen {
    fetch: FetchController,
    viewport: Viewport,
    style: StyleFragment,
    spinner_frame: usize,
}

impl ListingsScreen {
    pub fn new(style: StyleFragment) -> Self {
        Self {
            fetch: FetchController::new(),
            viewport: Viewport::new(),
            style,
            spinner_frame: 0,
        }
    }

    /// Start the one fetch for this screen. A source that could not be built
    /// lands directly in the error state.
    pub fn mount(&mut self, source: Result<Arc<dyn ListingSource>, FetchError>, tx: AppEventSender) {
        let started = match source {
            Ok(source) => self.fetch.mount(source, tx),
            Err(err) => self.fetch.mount_failed(err),
        };
        if started.is_none() {
            debug!("listings screen already mounted");
        }
    }

    pub fn on_listings_fetched(&mut self, attempt: u64, outcome: FetchOutcome) -> bool {
        if !self.fetch.finish(attempt, outcome) {
            return false;
        }
        let keys = self
            .fetch
            .state()
            .records()
            .map(|records| records.iter().map(|r| r.id.key()).collect())
            .unwrap_or_default();
        self.viewport.reconcile(keys);
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if key.kind == KeyEventKind::Release {
            return ScreenAction::None;
        }
        if key_hint::any_pressed(key_hint::QUIT, key) {
            return ScreenAction::Quit;
        }
        let before = self.viewport.selected();
        if key_hint::any_pressed(key_hint::UP, key) {
            self.viewport.move_up();
        } else if key_hint::any_pressed(key_hint::DOWN, key) {
            self.viewport.move_down();
        } else if key_hint::any_pressed(key_hint::PAGE_UP, key) {
            self.viewport.page_up();
        } else if key_hint::any_pressed(key_hint::PAGE_DOWN, key) {
            self.viewport.page_down();
        } else if key_hint::any_pressed(key_hint::FIRST, key) {
            self.viewport.first();
        } else if key_hint::any_pressed(key_hint::LAST, key) {
            self.viewport.last();
        }
        if self.viewport.selected() == before {
            ScreenAction::None
        } else {
            ScreenAction::Redraw
        }
    }

    /// Advance the spinner. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if !self.fetch.state().is_loading() {
            return false;
        }
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        true
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let view = ScreenView {
            state: self.fetch.state(),
            style: &self.style,
            spinner_frame: self.spinner_frame,
        };
        render::render_screen(area, buf, view, &mut self.viewport);
    }

    pub fn state(&self) -> &FetchState {
        self.fetch.state()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Height needed to show every row at once.
    pub fn full_height(&self) -> u16 {
        render::full_height(self.fetch.state())
    }

    pub fn unmount(&self) {
        self.fetch.unmount();
    }
}
