//! Command handlers - business logic for processing UI events

use crate::app::state::{AppState, GeneratePhase, HistoryPhase, QuizOrigin, TakeState};
use crate::constants::{ERR_EMPTY_URL, ERR_GENERATE, ERR_HISTORY, ERR_LOAD_QUIZ};
use crate::messages::ui_events::{AppTab, DisplayMode, InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn switch_tab(&mut self, tab: AppTab) -> Option<NetworkCommand> {
        self.active_tab = tab;
        self.input_mode = InputMode::Normal;
        match tab {
            // Entering the history tab refreshes the listing
            AppTab::History => self.refresh_history(),
            AppTab::Generate => None,
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.active_panel == Panel::Quiz {
            return;
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        // The count field accepts digits only
        if self.active_panel == Panel::Count && !c.is_ascii_digit() {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            if let Some(input) = self.current_input_mut() {
                let prev_pos = input[..cursor_pos]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                input.remove(prev_pos);
                self.cursor_position = prev_pos;
            }
        }
    }

    // ========================
    // Generate
    // ========================

    /// Validate the form and move into `Loading`, clearing any displayed
    /// quiz and its take progress before the request resolves
    pub fn prepare_generate(&mut self) -> Option<NetworkCommand> {
        if self.generate.is_loading() {
            return None;
        }
        if self.form.url.is_empty() {
            self.form_error = Some(ERR_EMPTY_URL.to_string());
            return None;
        }

        self.form_error = None;
        let id = self.next_id();
        self.generate = GeneratePhase::Loading {
            request_id: id,
            origin: QuizOrigin::Generate,
        };

        Some(NetworkCommand::GenerateQuiz {
            id,
            url: self.form.url.clone(),
            num_questions: self.form.num_questions(),
        })
    }

    // ========================
    // Display mode
    // ========================

    pub fn set_mode(&mut self, new_mode: DisplayMode) {
        if let GeneratePhase::Loaded { mode, .. } = &mut self.generate {
            *mode = new_mode;
        }
    }

    pub fn scroll_up(&mut self) {
        if let GeneratePhase::Loaded { scroll, .. } = &mut self.generate {
            *scroll = scroll.saturating_sub(1);
        }
    }

    pub fn scroll_down(&mut self) {
        if let GeneratePhase::Loaded { scroll, .. } = &mut self.generate {
            *scroll = scroll.saturating_add(1);
        }
    }

    // ========================
    // Take mode
    // ========================

    pub fn prev_option(&mut self) {
        if let GeneratePhase::Loaded {
            mode: DisplayMode::Take,
            take,
            ..
        } = &mut self.generate
        {
            if !take.finished {
                take.highlighted = take.highlighted.saturating_sub(1);
            }
        }
    }

    pub fn next_option(&mut self) {
        if let GeneratePhase::Loaded {
            quiz,
            mode: DisplayMode::Take,
            take,
            ..
        } = &mut self.generate
        {
            if take.finished {
                return;
            }
            let last = quiz
                .questions
                .get(take.current)
                .map(|q| q.options.len().saturating_sub(1))
                .unwrap_or(0);
            if take.highlighted < last {
                take.highlighted += 1;
            }
        }
    }

    /// Record the highlighted option for the current question and advance
    pub fn answer_current(&mut self) {
        if let GeneratePhase::Loaded {
            quiz,
            mode: DisplayMode::Take,
            take,
            ..
        } = &mut self.generate
        {
            if take.finished || quiz.questions.is_empty() {
                return;
            }
            take.answers[take.current] = Some(take.highlighted);
            if take.current + 1 < quiz.questions.len() {
                take.current += 1;
                take.highlighted = take.answers[take.current].unwrap_or(0);
            } else {
                take.finished = true;
            }
        }
    }

    pub fn prev_question(&mut self) {
        if let GeneratePhase::Loaded {
            mode: DisplayMode::Take,
            take,
            ..
        } = &mut self.generate
        {
            if !take.finished && take.current > 0 {
                take.current -= 1;
                take.highlighted = take.answers[take.current].unwrap_or(0);
            }
        }
    }

    pub fn next_question(&mut self) {
        if let GeneratePhase::Loaded {
            quiz,
            mode: DisplayMode::Take,
            take,
            ..
        } = &mut self.generate
        {
            if !take.finished && take.current + 1 < quiz.questions.len() {
                take.current += 1;
                take.highlighted = take.answers[take.current].unwrap_or(0);
            }
        }
    }

    /// Explicitly discard take progress for the loaded quiz
    pub fn restart_take(&mut self) {
        if let GeneratePhase::Loaded {
            mode: DisplayMode::Take,
            take,
            ..
        } = &mut self.generate
        {
            take.reset();
        }
    }

    // ========================
    // History
    // ========================

    pub fn refresh_history(&mut self) -> Option<NetworkCommand> {
        if matches!(self.history, HistoryPhase::Loading { .. }) {
            return None;
        }
        let id = self.next_id();
        self.history = HistoryPhase::Loading { request_id: id };
        Some(NetworkCommand::FetchHistory { id })
    }

    pub fn history_prev(&mut self) {
        if self.history_selected > 0 {
            self.history_selected -= 1;
        }
    }

    pub fn history_next(&mut self) {
        if let HistoryPhase::Loaded(entries) = &self.history {
            if self.history_selected + 1 < entries.len() {
                self.history_selected += 1;
            }
        }
    }

    /// Fetch the selected history entry and show it on the generate tab
    pub fn open_selected(&mut self) -> Option<NetworkCommand> {
        if self.generate.is_loading() {
            return None;
        }
        let quiz_id = match &self.history {
            HistoryPhase::Loaded(entries) => entries.get(self.history_selected)?.quiz_id,
            _ => return None,
        };

        let id = self.next_id();
        self.form_error = None;
        self.generate = GeneratePhase::Loading {
            request_id: id,
            origin: QuizOrigin::History,
        };
        self.active_tab = AppTab::Generate;
        self.active_panel = Panel::Quiz;

        Some(NetworkCommand::FetchQuiz { id, quiz_id })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::QuizGenerated { id, quiz } => {
                if self.matches_generate(id) {
                    let take = TakeState::new(quiz.questions.len());
                    self.generate = GeneratePhase::Loaded {
                        quiz,
                        mode: DisplayMode::Take,
                        take,
                        scroll: 0,
                    };
                    self.active_panel = Panel::Quiz;
                } else {
                    tracing::debug!(id, "dropping stale generate response");
                }
            }
            NetworkResponse::QuizLoaded { id, quiz } => {
                if self.matches_generate(id) {
                    let take = TakeState::new(quiz.questions.len());
                    self.generate = GeneratePhase::Loaded {
                        quiz,
                        mode: DisplayMode::View,
                        take,
                        scroll: 0,
                    };
                    self.active_tab = AppTab::Generate;
                    self.active_panel = Panel::Quiz;
                } else {
                    tracing::debug!(id, "dropping stale quiz response");
                }
            }
            NetworkResponse::HistoryLoaded { id, entries } => {
                if self.matches_history(id) {
                    self.history_selected = self
                        .history_selected
                        .min(entries.len().saturating_sub(1));
                    self.history = HistoryPhase::Loaded(entries);
                } else {
                    tracing::debug!(id, "dropping stale history response");
                }
            }
            NetworkResponse::Error { id, message } => self.handle_error(id, message),
        }
    }

    fn handle_error(&mut self, id: u64, message: String) {
        if let GeneratePhase::Loading { request_id, origin } = &self.generate {
            if *request_id == id {
                let user_message = match origin {
                    QuizOrigin::Generate => ERR_GENERATE,
                    QuizOrigin::History => ERR_LOAD_QUIZ,
                };
                tracing::warn!(id, error = %message, "quiz request failed");
                self.generate = GeneratePhase::Failed {
                    message: user_message.to_string(),
                };
                return;
            }
        }
        if let HistoryPhase::Loading { request_id } = &self.history {
            if *request_id == id {
                tracing::warn!(id, error = %message, "history request failed");
                self.history = HistoryPhase::Failed(ERR_HISTORY.to_string());
                return;
            }
        }
        tracing::debug!(id, "dropping stale error response");
    }

    fn matches_generate(&self, id: u64) -> bool {
        matches!(&self.generate, GeneratePhase::Loading { request_id, .. } if *request_id == id)
    }

    fn matches_history(&self, id: u64) -> bool {
        matches!(&self.history, HistoryPhase::Loading { request_id } if *request_id == id)
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, Quiz, QuizSummary};

    fn sample_quiz() -> Quiz {
        let question = |id: u64| Question {
            id,
            question: format!("question {}", id),
            options: vec![
                "Option A".to_string(),
                "Option B".to_string(),
                "Option C".to_string(),
                "Option D".to_string(),
            ],
            correct_answer: "Option B".to_string(),
            difficulty: "medium".to_string(),
            explanation: "because".to_string(),
            related_topics: Vec::new(),
        };
        Quiz {
            quiz_id: 42,
            quiz_title: "Octopus".to_string(),
            questions: vec![question(1), question(2), question(3)],
        }
    }

    fn state_with_url(url: &str) -> AppState {
        let mut state = AppState::new();
        state.form.url = url.to_string();
        state
    }

    fn loaded_state() -> AppState {
        let mut state = state_with_url("https://en.wikipedia.org/wiki/Octopus");
        let cmd = state.prepare_generate().unwrap();
        let id = match cmd {
            NetworkCommand::GenerateQuiz { id, .. } => id,
            _ => panic!("expected a generate command"),
        };
        state.handle_response(NetworkResponse::QuizGenerated {
            id,
            quiz: sample_quiz(),
        });
        state
    }

    #[test]
    fn test_empty_url_sets_error_and_issues_nothing() {
        let mut state = AppState::new();
        assert!(state.prepare_generate().is_none());
        assert_eq!(state.form_error.as_deref(), Some(ERR_EMPTY_URL));
        assert_eq!(state.generate, GeneratePhase::Idle);
    }

    #[test]
    fn test_empty_url_leaves_loaded_quiz_untouched() {
        let mut state = loaded_state();
        state.form.url.clear();
        let before = state.generate.clone();

        assert!(state.prepare_generate().is_none());
        assert_eq!(state.generate, before);
        assert_eq!(state.form_error.as_deref(), Some(ERR_EMPTY_URL));
    }

    #[test]
    fn test_generate_moves_to_loading_and_clears_previous_quiz() {
        let mut state = loaded_state();
        state.form_error = Some("old".to_string());

        let cmd = state.prepare_generate().unwrap();
        match cmd {
            NetworkCommand::GenerateQuiz {
                url, num_questions, ..
            } => {
                assert_eq!(url, "https://en.wikipedia.org/wiki/Octopus");
                assert_eq!(num_questions, 5);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        // Previous quiz, mode and take progress are gone before resolution
        assert!(state.generate.is_loading());
        assert!(state.generate.quiz().is_none());
        assert!(state.form_error.is_none());
    }

    #[test]
    fn test_generate_is_noop_while_loading() {
        let mut state = state_with_url("https://en.wikipedia.org/wiki/Octopus");
        assert!(state.prepare_generate().is_some());
        assert!(state.prepare_generate().is_none());
    }

    #[test]
    fn test_count_buffer_is_clamped_into_the_command() {
        let mut state = state_with_url("https://en.wikipedia.org/wiki/Octopus");
        state.form.count = "0".to_string();
        match state.prepare_generate().unwrap() {
            NetworkCommand::GenerateQuiz { num_questions, .. } => assert_eq!(num_questions, 1),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_matching_success_loads_quiz_in_take_mode() {
        let state = loaded_state();
        match &state.generate {
            GeneratePhase::Loaded {
                quiz, mode, take, ..
            } => {
                assert_eq!(*quiz, sample_quiz());
                assert_eq!(*mode, DisplayMode::Take);
                assert_eq!(*take, TakeState::new(3));
            }
            other => panic!("unexpected phase: {:?}", other),
        }
        assert!(state.form_error.is_none());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = state_with_url("https://en.wikipedia.org/wiki/Octopus");
        state.prepare_generate().unwrap();

        state.handle_response(NetworkResponse::QuizGenerated {
            id: 999,
            quiz: sample_quiz(),
        });
        assert!(state.generate.is_loading());

        state.handle_response(NetworkResponse::Error {
            id: 999,
            message: "connection refused".to_string(),
        });
        assert!(state.generate.is_loading());
    }

    #[test]
    fn test_matching_error_sets_fixed_message() {
        let mut state = state_with_url("https://en.wikipedia.org/wiki/Octopus");
        let id = match state.prepare_generate().unwrap() {
            NetworkCommand::GenerateQuiz { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };

        state.handle_response(NetworkResponse::Error {
            id,
            message: "500 Internal Server Error".to_string(),
        });
        assert_eq!(
            state.generate,
            GeneratePhase::Failed {
                message: ERR_GENERATE.to_string()
            }
        );
    }

    #[test]
    fn test_mode_toggle_preserves_take_progress() {
        let mut state = loaded_state();
        state.answer_current();
        state.set_mode(DisplayMode::View);
        state.set_mode(DisplayMode::Take);
        match &state.generate {
            GeneratePhase::Loaded { take, .. } => {
                assert_eq!(take.answers[0], Some(0));
                assert_eq!(take.current, 1);
            }
            other => panic!("unexpected phase: {:?}", other),
        }
    }

    #[test]
    fn test_take_flow_records_answers_and_scores() {
        let mut state = loaded_state();

        // Question 1: pick "Option B" (correct)
        state.next_option();
        state.answer_current();
        // Question 2: leave "Option A" (wrong)
        state.answer_current();
        // Question 3: pick "Option B" (correct)
        state.next_option();
        state.answer_current();

        match &state.generate {
            GeneratePhase::Loaded { quiz, take, .. } => {
                assert!(take.finished);
                assert_eq!(take.answers, vec![Some(1), Some(0), Some(1)]);
                assert_eq!(take.score(quiz), 2);
            }
            other => panic!("unexpected phase: {:?}", other),
        }
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut state = loaded_state();
        state.answer_current();
        state.answer_current();
        state.restart_take();
        match &state.generate {
            GeneratePhase::Loaded { take, .. } => assert_eq!(*take, TakeState::new(3)),
            other => panic!("unexpected phase: {:?}", other),
        }
    }

    #[test]
    fn test_switching_to_history_requests_listing() {
        let mut state = AppState::new();
        match state.switch_tab(AppTab::History) {
            Some(NetworkCommand::FetchHistory { .. }) => {}
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(matches!(state.history, HistoryPhase::Loading { .. }));
        // A second refresh while one is in flight is a no-op
        assert!(state.refresh_history().is_none());
    }

    #[test]
    fn test_open_history_entry_requests_quiz_and_switches_tab() {
        let mut state = AppState::new();
        let id = match state.switch_tab(AppTab::History) {
            Some(NetworkCommand::FetchHistory { id }) => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::HistoryLoaded {
            id,
            entries: vec![
                QuizSummary {
                    quiz_id: 10,
                    quiz_title: "Octopus".to_string(),
                    created_at: None,
                },
                QuizSummary {
                    quiz_id: 11,
                    quiz_title: "Mars".to_string(),
                    created_at: None,
                },
            ],
        });

        state.history_next();
        let fetch_id = match state.open_selected() {
            Some(NetworkCommand::FetchQuiz { id, quiz_id }) => {
                assert_eq!(quiz_id, 11);
                id
            }
            other => panic!("unexpected command: {:?}", other),
        };
        assert_eq!(state.active_tab, AppTab::Generate);

        state.handle_response(NetworkResponse::QuizLoaded {
            id: fetch_id,
            quiz: sample_quiz(),
        });
        assert_eq!(state.generate.display_mode(), Some(DisplayMode::View));
    }

    #[test]
    fn test_history_error_sets_fixed_message() {
        let mut state = AppState::new();
        let id = match state.switch_tab(AppTab::History) {
            Some(NetworkCommand::FetchHistory { id }) => id,
            other => panic!("unexpected command: {:?}", other),
        };
        state.handle_response(NetworkResponse::Error {
            id,
            message: "timeout".to_string(),
        });
        assert_eq!(state.history, HistoryPhase::Failed(ERR_HISTORY.to_string()));
    }

    #[test]
    fn test_count_field_accepts_digits_only() {
        let mut state = AppState::new();
        state.active_panel = Panel::Count;
        state.form.count.clear();
        state.start_editing();
        state.enter_char('1');
        state.enter_char('a');
        state.enter_char('2');
        assert_eq!(state.form.count, "12");
    }
}
