//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Environment variable naming the backend base address
pub const API_URL_ENV: &str = "WIKIQUIZ_API_URL";

/// Backend base address used when the environment variable is unset
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Question count used when the form buffer is empty or unparsable
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

/// Validation message shown when generate is triggered with an empty URL
pub const ERR_EMPTY_URL: &str = "Please enter a Wikipedia URL";

/// Generic failure message for the generate call
pub const ERR_GENERATE: &str = "Failed to generate quiz. Check backend.";

/// Generic failure message when reopening a quiz from history
pub const ERR_LOAD_QUIZ: &str = "Failed to load quiz. Check backend.";

/// Generic failure message for the history listing
pub const ERR_HISTORY: &str = "Failed to load history. Check backend.";

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Wikiquiz TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
