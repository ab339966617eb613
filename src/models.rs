use serde::{Deserialize, Serialize};

/// A single quiz question as returned by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    /// Matches one entry of `options` verbatim
    pub correct_answer: String,
    pub difficulty: String,
    pub explanation: String,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

impl Question {
    /// Index of the correct option, when the backend answer matches an option
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct_answer)
    }
}

/// A generated quiz, passed through from the backend unchanged
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz_id: u64,
    pub quiz_title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// One entry of the backend's quiz history listing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub quiz_id: u64,
    pub quiz_title: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Body of the generate call
#[derive(Clone, Debug, Serialize)]
pub struct GenerateQuizRequest {
    pub url: String,
    pub num_questions: u32,
}
