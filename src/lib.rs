//! # Wikiquiz TUI
//!
//! A terminal client for an AI Wikipedia quiz generator backend.
//!
//! ## Features
//! - Generate a quiz from any Wikipedia URL
//! - Take the quiz interactively or reveal all answers
//! - Browse previously generated quizzes and reopen them
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::ApiConfig;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{GenerateQuizRequest, Question, Quiz, QuizSummary};
pub use network::{NetworkActor, QuizClient};
