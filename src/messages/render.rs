//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{GeneratePhase, HistoryPhase};
use crate::messages::ui_events::{AppTab, InputMode, Panel};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Tab
    pub active_tab: AppTab,

    // Form inputs
    pub url: String,
    pub count: String,
    pub form_error: Option<String>,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Request lifecycles
    pub generate: GeneratePhase,
    pub history: HistoryPhase,
    pub history_selected: usize,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_NUM_QUESTIONS;
        RenderState {
            active_tab: AppTab::Generate,
            url: String::new(),
            count: DEFAULT_NUM_QUESTIONS.to_string(),
            form_error: None,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            generate: GeneratePhase::Idle,
            history: HistoryPhase::Idle,
            history_selected: 0,
            show_help: false,
        }
    }
}
