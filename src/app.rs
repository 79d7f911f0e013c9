//! Application Module
//!
//! Interactive menu state: cursor, messages and the simulated network
//! estimate that drives the player's ABR.

use crate::controls::QualitySelection;
use crate::i18n::Catalog;
use crate::player::SimulatedPlayer;
use crate::tracks::ResolutionMenu;
use ratatui::widgets::ListState;
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

pub type Selection = QualitySelection<SimulatedPlayer, Catalog>;

const BANDWIDTH_STEP: u64 = 500_000;

/// Main application state
pub struct App {
    pub selection: Selection,
    pub should_quit: bool,

    // Menu
    pub cursor: usize,
    pub list_state: ListState,
    /// Entry highlighted by the latest derivation, not yet applied to the cursor
    highlight: Rc<Cell<Option<usize>>>,

    // Simulated network
    pub bandwidth_estimate: u64,

    // UI state
    pub message: Option<String>,
}

impl App {
    pub fn new(mut selection: Selection, bandwidth_estimate: u64) -> Self {
        let highlight = Rc::new(Cell::new(None));
        let slot = Rc::clone(&highlight);
        selection.on_change(move |menu| slot.set(Some(highlighted_entry(menu))));
        selection.refresh();

        let mut app = Self {
            selection,
            should_quit: false,
            cursor: 0,
            list_state: ListState::default(),
            highlight,
            bandwidth_estimate,
            message: None,
        };
        app.pump_events();
        app
    }

    /// Options plus the trailing "Auto" entry
    pub fn entry_count(&self) -> usize {
        self.selection.menu().options.len() + 1
    }

    pub fn auto_index(&self) -> usize {
        self.selection.menu().options.len()
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.entry_count() {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Apply the entry under the cursor
    pub fn activate(&mut self) {
        self.clear_message();
        let result = if self.cursor == self.auto_index() {
            self.selection.enable_auto()
        } else {
            self.selection.select_option(self.cursor)
        };
        if let Err(e) = result {
            self.message = Some(e.to_string());
        }
        self.pump_events();
    }

    /// Switch to the next available locale
    pub fn cycle_locale(&mut self) {
        let next = self.selection.localization().next_locale();
        match self.selection.localization_mut().set_locale(&next) {
            Ok(event) => self.selection.handle_locale_event(event),
            Err(e) => self.message = Some(e.to_string()),
        }
        self.apply_highlight();
    }

    /// Raise or lower the simulated bandwidth and let ABR react
    pub fn adjust_bandwidth(&mut self, increase: bool) {
        self.bandwidth_estimate = if increase {
            self.bandwidth_estimate.saturating_add(BANDWIDTH_STEP)
        } else {
            self.bandwidth_estimate.saturating_sub(BANDWIDTH_STEP)
        };
        info!("Bandwidth estimate now {} bps", self.bandwidth_estimate);
        let estimate = self.bandwidth_estimate;
        self.selection.player_mut().adapt(estimate);
        self.pump_events();
    }

    /// Feed pending player notifications to the menu
    pub fn pump_events(&mut self) {
        for event in self.selection.player_mut().take_events() {
            self.selection.handle_player_event(event);
        }
        self.apply_highlight();
    }

    /// Move the cursor to the entry the last derivation highlighted
    fn apply_highlight(&mut self) {
        if let Some(entry) = self.highlight.take() {
            self.cursor = entry.min(self.entry_count() - 1);
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }
}

/// Index of the highlighted entry, counting "Auto" after the options
fn highlighted_entry(menu: &ResolutionMenu) -> usize {
    if menu.auto_selected {
        return menu.options.len();
    }
    menu.options
        .iter()
        .position(|option| option.is_selected)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::tracks::Track;

    fn app() -> App {
        let tracks = vec![
            Track::new(1, Some(1080), 5_000_000),
            Track::new(2, Some(720), 3_000_000),
        ];
        let selection = QualitySelection::new(
            SimulatedPlayer::new(tracks),
            Catalog::new("en").unwrap(),
            UiConfig::default(),
        );
        App::new(selection, 10_000_000)
    }

    #[test]
    fn test_cursor_starts_on_auto() {
        let app = app();
        assert_eq!(app.entry_count(), 3);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_cursor_bounds() {
        let mut app = app();
        app.move_down();
        assert_eq!(app.cursor, 2);
        app.move_up();
        app.move_up();
        app.move_up();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_activate_option_then_auto() {
        let mut app = app();
        app.move_up();
        app.activate();
        assert_eq!(app.message, None);
        let menu = app.selection.menu();
        assert!(!menu.auto_selected);
        assert_eq!(menu.selected_option().map(|o| o.track.id), Some(2));
        assert_eq!(app.cursor, 1);

        app.move_down();
        app.activate();
        assert!(app.selection.menu().auto_selected);
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_bandwidth_drop_switches_under_abr() {
        let mut app = app();
        for _ in 0..13 {
            app.adjust_bandwidth(false);
        }
        assert_eq!(app.bandwidth_estimate, 3_500_000);
        let active = app.selection.player().active_track().map(|t| t.id);
        assert_eq!(active, Some(2));
        assert!(app.selection.menu().auto_selected);
    }

    #[test]
    fn test_refresh_moves_cursor_to_highlight() {
        let mut app = app();
        app.move_up();
        app.move_up();
        assert_eq!(app.cursor, 0);

        app.cycle_locale();
        assert_eq!(app.cursor, 2);

        app.move_up();
        app.move_up();
        for _ in 0..11 {
            app.adjust_bandwidth(false);
        }
        assert_eq!(app.selection.player().active_track().map(|t| t.id), Some(2));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_cycle_locale() {
        let mut app = app();
        app.cycle_locale();
        assert_eq!(app.selection.localization().locale(), "fr");
        assert_eq!(app.selection.menu().auto_label, "Automatique");
    }
}
