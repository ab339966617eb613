//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application tabs
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AppTab {
    #[default]
    Generate,
    History,
}

/// How a loaded quiz is displayed
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum DisplayMode {
    /// Every question rendered as an answer-revealing card
    View,
    /// Interactive question-by-question runner
    #[default]
    Take,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),

    // Panel navigation
    NextPanel,
    PrevPanel,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Generate actions
    Generate,
    SetMode(DisplayMode),
    ScrollUp,
    ScrollDown,

    // Take mode
    PrevOption,
    NextOption,
    AnswerCurrent,
    PrevQuestion,
    NextQuestion,
    RestartTake,

    // History
    RefreshHistory,
    PrevEntry,
    NextEntry,
    OpenEntry,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel on the generate tab (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Url,
    Count,
    Quiz,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Count,
            Panel::Count => Panel::Quiz,
            Panel::Quiz => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::Quiz,
            Panel::Count => Panel::Url,
            Panel::Quiz => Panel::Count,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_tab: AppTab,
    active_panel: Panel,
    input_mode: InputMode,
    display_mode: Option<DisplayMode>,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let KeyCode::Char('c') = key.code {
            return Some(UiEvent::Quit);
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    // Tab switching: 1 and 2 keys (only in normal mode, not editing)
    if input_mode == InputMode::Normal {
        match key.code {
            KeyCode::Char('1') => return Some(UiEvent::SwitchTab(AppTab::Generate)),
            KeyCode::Char('2') => return Some(UiEvent::SwitchTab(AppTab::History)),
            _ => {}
        }
    }

    match active_tab {
        AppTab::Generate => handle_generate_tab_keys(key, active_panel, input_mode, display_mode),
        AppTab::History => handle_history_tab_keys(key),
    }
}

/// Handle keys for the generate tab
fn handle_generate_tab_keys(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    display_mode: Option<DisplayMode>,
) -> Option<UiEvent> {
    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('g') => Some(UiEvent::Generate),
            KeyCode::Char('v') if display_mode.is_some() => {
                Some(UiEvent::SetMode(DisplayMode::View))
            }
            KeyCode::Char('t') if display_mode.is_some() => {
                Some(UiEvent::SetMode(DisplayMode::Take))
            }
            KeyCode::Char('r') if display_mode == Some(DisplayMode::Take) => {
                Some(UiEvent::RestartTake)
            }
            KeyCode::Char('e') => match active_panel {
                Panel::Url | Panel::Count => Some(UiEvent::StartEditing),
                Panel::Quiz => None,
            },
            KeyCode::Enter => match active_panel {
                Panel::Url | Panel::Count => Some(UiEvent::StartEditing),
                Panel::Quiz if display_mode == Some(DisplayMode::Take) => {
                    Some(UiEvent::AnswerCurrent)
                }
                Panel::Quiz => None,
            },
            KeyCode::Up => match (active_panel, display_mode) {
                (Panel::Quiz, Some(DisplayMode::Take)) => Some(UiEvent::PrevOption),
                (Panel::Quiz, Some(DisplayMode::View)) => Some(UiEvent::ScrollUp),
                _ => None,
            },
            KeyCode::Down => match (active_panel, display_mode) {
                (Panel::Quiz, Some(DisplayMode::Take)) => Some(UiEvent::NextOption),
                (Panel::Quiz, Some(DisplayMode::View)) => Some(UiEvent::ScrollDown),
                _ => None,
            },
            KeyCode::Left if active_panel == Panel::Quiz => match display_mode {
                Some(DisplayMode::Take) => Some(UiEvent::PrevQuestion),
                _ => None,
            },
            KeyCode::Right if active_panel == Panel::Quiz => match display_mode {
                Some(DisplayMode::Take) => Some(UiEvent::NextQuestion),
                _ => None,
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Enter => {
                if active_panel == Panel::Url {
                    Some(UiEvent::Generate)
                } else {
                    Some(UiEvent::StopEditing)
                }
            }
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

/// Handle keys for the history tab
fn handle_history_tab_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => Some(UiEvent::RefreshHistory),
        KeyCode::Up => Some(UiEvent::PrevEntry),
        KeyCode::Down => Some(UiEvent::NextEntry),
        KeyCode::Enter => Some(UiEvent::OpenEntry),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_generate_key_in_normal_mode() {
        let event = key_to_ui_event(
            press(KeyCode::Char('g')),
            AppTab::Generate,
            Panel::Url,
            InputMode::Normal,
            None,
            false,
        );
        assert_eq!(event, Some(UiEvent::Generate));
    }

    #[test]
    fn test_enter_while_editing_url_triggers_generate() {
        let event = key_to_ui_event(
            press(KeyCode::Enter),
            AppTab::Generate,
            Panel::Url,
            InputMode::Editing,
            None,
            false,
        );
        assert_eq!(event, Some(UiEvent::Generate));
    }

    #[test]
    fn test_mode_keys_require_a_loaded_quiz() {
        let without_quiz = key_to_ui_event(
            press(KeyCode::Char('v')),
            AppTab::Generate,
            Panel::Quiz,
            InputMode::Normal,
            None,
            false,
        );
        assert_eq!(without_quiz, None);

        let with_quiz = key_to_ui_event(
            press(KeyCode::Char('v')),
            AppTab::Generate,
            Panel::Quiz,
            InputMode::Normal,
            Some(DisplayMode::Take),
            false,
        );
        assert_eq!(with_quiz, Some(UiEvent::SetMode(DisplayMode::View)));
    }

    #[test]
    fn test_arrow_keys_follow_display_mode() {
        let take = key_to_ui_event(
            press(KeyCode::Down),
            AppTab::Generate,
            Panel::Quiz,
            InputMode::Normal,
            Some(DisplayMode::Take),
            false,
        );
        assert_eq!(take, Some(UiEvent::NextOption));

        let view = key_to_ui_event(
            press(KeyCode::Down),
            AppTab::Generate,
            Panel::Quiz,
            InputMode::Normal,
            Some(DisplayMode::View),
            false,
        );
        assert_eq!(view, Some(UiEvent::ScrollDown));
    }

    #[test]
    fn test_history_tab_keys() {
        let open = key_to_ui_event(
            press(KeyCode::Enter),
            AppTab::History,
            Panel::Url,
            InputMode::Normal,
            None,
            false,
        );
        assert_eq!(open, Some(UiEvent::OpenEntry));

        let refresh = key_to_ui_event(
            press(KeyCode::Char('r')),
            AppTab::History,
            Panel::Url,
            InputMode::Normal,
            None,
            false,
        );
        assert_eq!(refresh, Some(UiEvent::RefreshHistory));
    }

    #[test]
    fn test_any_key_closes_help() {
        let event = key_to_ui_event(
            press(KeyCode::Char('x')),
            AppTab::Generate,
            Panel::Url,
            InputMode::Normal,
            None,
            true,
        );
        assert_eq!(event, Some(UiEvent::CloseHelp));
    }
}
