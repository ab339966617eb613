//! App state - pure data structure with no I/O logic

use crate::constants::DEFAULT_NUM_QUESTIONS;
use crate::messages::ui_events::{AppTab, DisplayMode, InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{Quiz, QuizSummary};

/// What triggered the quiz currently being fetched
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuizOrigin {
    Generate,
    History,
}

/// Lifecycle of the generate view's quiz request
///
/// A quiz only exists in `Loaded`, so a loading flag can never coexist with a
/// displayed quiz, and take progress can never outlive the quiz it belongs to.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum GeneratePhase {
    #[default]
    Idle,
    Loading {
        request_id: u64,
        origin: QuizOrigin,
    },
    Loaded {
        quiz: Quiz,
        mode: DisplayMode,
        take: TakeState,
        scroll: u16,
    },
    Failed {
        message: String,
    },
}

impl GeneratePhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, GeneratePhase::Loading { .. })
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        match self {
            GeneratePhase::Loaded { quiz, .. } => Some(quiz),
            _ => None,
        }
    }

    pub fn display_mode(&self) -> Option<DisplayMode> {
        match self {
            GeneratePhase::Loaded { mode, .. } => Some(*mode),
            _ => None,
        }
    }
}

/// Progress through a quiz in take mode
#[derive(Clone, Debug, PartialEq)]
pub struct TakeState {
    /// Question currently shown
    pub current: usize,
    /// Option highlighted for the current question
    pub highlighted: usize,
    /// Recorded option index per question, in server question order
    pub answers: Vec<Option<usize>>,
    pub finished: bool,
}

impl TakeState {
    pub fn new(question_count: usize) -> Self {
        TakeState {
            current: 0,
            highlighted: 0,
            answers: vec![None; question_count],
            finished: false,
        }
    }

    /// Discard all progress for the same quiz
    pub fn reset(&mut self) {
        *self = TakeState::new(self.answers.len());
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Count answers whose option text matches the question's correct answer
    pub fn score(&self, quiz: &Quiz) -> usize {
        self.answers
            .iter()
            .zip(&quiz.questions)
            .filter(|(answer, question)| {
                answer
                    .and_then(|i| question.options.get(i))
                    .map(|option| option == &question.correct_answer)
                    .unwrap_or(false)
            })
            .count()
    }
}

/// Lifecycle of the history listing request
#[derive(Clone, Debug, PartialEq, Default)]
pub enum HistoryPhase {
    #[default]
    Idle,
    Loading {
        request_id: u64,
    },
    Loaded(Vec<QuizSummary>),
    Failed(String),
}

/// Form inputs for the generate call
#[derive(Clone, Debug)]
pub struct GenerateForm {
    pub url: String,
    /// Digits-only text buffer for the question count
    pub count: String,
}

impl GenerateForm {
    /// Parse the count buffer, falling back to the default and clamping to 1
    pub fn num_questions(&self) -> u32 {
        self.count
            .trim()
            .parse::<u32>()
            .unwrap_or(DEFAULT_NUM_QUESTIONS)
            .max(1)
    }
}

impl Default for GenerateForm {
    fn default() -> Self {
        GenerateForm {
            url: String::new(),
            count: DEFAULT_NUM_QUESTIONS.to_string(),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Tab navigation
    pub active_tab: AppTab,

    // Generate tab
    pub form: GenerateForm,
    pub form_error: Option<String>,
    pub generate: GeneratePhase,

    // History tab
    pub history: HistoryPhase,
    pub history_selected: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Request id allocation
    pub next_request_id: u64,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            active_tab: AppTab::Generate,
            form: GenerateForm::default(),
            form_error: None,
            generate: GeneratePhase::Idle,
            history: HistoryPhase::Idle,
            history_selected: 0,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            next_request_id: 1,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Url => &self.form.url,
            Panel::Count => &self.form.count,
            Panel::Quiz => "",
        }
    }

    /// Get mutable reference to current input field, if the panel is editable
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Url => Some(&mut self.form.url),
            Panel::Count => Some(&mut self.form.count),
            Panel::Quiz => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            url: self.form.url.clone(),
            count: self.form.count.clone(),
            form_error: self.form_error.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            generate: self.generate.clone(),
            history: self.history.clone(),
            history_selected: self.history_selected,
            show_help: self.show_help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn quiz_with_answers() -> Quiz {
        let question = |id: u64, correct: &str| Question {
            id,
            question: format!("question {}", id),
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: correct.to_string(),
            difficulty: "easy".to_string(),
            explanation: String::new(),
            related_topics: Vec::new(),
        };
        Quiz {
            quiz_id: 1,
            quiz_title: "Scoring".to_string(),
            questions: vec![question(1, "A"), question(2, "B"), question(3, "C")],
        }
    }

    #[test]
    fn test_score_matches_by_option_text() {
        let quiz = quiz_with_answers();
        let mut take = TakeState::new(3);
        take.answers = vec![Some(0), Some(0), Some(2)]; // A, A, C
        assert_eq!(take.score(&quiz), 2);
        assert_eq!(take.answered(), 3);
    }

    #[test]
    fn test_unanswered_questions_do_not_score() {
        let quiz = quiz_with_answers();
        let take = TakeState::new(3);
        assert_eq!(take.score(&quiz), 0);
        assert_eq!(take.answered(), 0);
    }

    #[test]
    fn test_reset_discards_progress_but_keeps_length() {
        let mut take = TakeState::new(3);
        take.current = 2;
        take.answers = vec![Some(1), Some(1), None];
        take.finished = true;
        take.reset();
        assert_eq!(take, TakeState::new(3));
    }

    #[test]
    fn test_count_buffer_fallback_and_clamp() {
        let mut form = GenerateForm::default();
        assert_eq!(form.num_questions(), DEFAULT_NUM_QUESTIONS);

        form.count = String::new();
        assert_eq!(form.num_questions(), DEFAULT_NUM_QUESTIONS);

        form.count = "0".to_string();
        assert_eq!(form.num_questions(), 1);

        form.count = "12".to_string();
        assert_eq!(form.num_questions(), 12);
    }

    #[test]
    fn test_display_mode_only_exists_when_loaded() {
        assert_eq!(GeneratePhase::Idle.display_mode(), None);
        let loading = GeneratePhase::Loading {
            request_id: 1,
            origin: QuizOrigin::Generate,
        };
        assert_eq!(loading.display_mode(), None);
        assert!(loading.is_loading());
    }
}
