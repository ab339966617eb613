//! Network messages - communication between App and Network layers

use crate::models::{Quiz, QuizSummary};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Generate a quiz from a Wikipedia URL
    GenerateQuiz {
        id: u64,
        url: String,
        num_questions: u32,
    },
    /// Fetch the listing of previously generated quizzes
    FetchHistory { id: u64 },
    /// Fetch one quiz by its backend identifier
    FetchQuiz { id: u64, quiz_id: u64 },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Generate call succeeded
    QuizGenerated { id: u64, quiz: Quiz },
    /// History listing arrived
    HistoryLoaded { id: u64, entries: Vec<QuizSummary> },
    /// A single quiz fetched by identifier arrived
    QuizLoaded { id: u64, quiz: Quiz },
    /// Any transport failure or non-success status; `message` is the cause
    /// chain for the log, never shown to the user
    Error { id: u64, message: String },
}

impl NetworkResponse {
    /// Get the request ID the response answers
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::QuizGenerated { id, .. } => *id,
            NetworkResponse::HistoryLoaded { id, .. } => *id,
            NetworkResponse::QuizLoaded { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}
