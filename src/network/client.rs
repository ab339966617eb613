//! HTTP client for the quiz backend - three endpoints, bodies passed through verbatim

use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::ApiConfig;
use crate::models::{GenerateQuizRequest, Quiz, QuizSummary};

/// Client for the quiz-generation backend
///
/// No retries, no caching; any transport failure or non-success status
/// propagates to the caller.
#[derive(Clone)]
pub struct QuizClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuizClient {
    /// Build a client against the configured base address
    pub fn new(config: ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        QuizClient {
            http,
            base_url: config.base_url().to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `POST /generate-quiz` with the article URL and question count
    pub async fn generate_quiz(&self, url: &str, num_questions: u32) -> Result<Quiz> {
        let body = GenerateQuizRequest {
            url: url.to_string(),
            num_questions,
        };
        let quiz = self
            .http
            .post(self.endpoint("generate-quiz"))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<Quiz>()
            .await
            .context("decoding generate-quiz response")?;
        Ok(quiz)
    }

    /// `GET /history` - listing of previously generated quizzes
    pub async fn fetch_history(&self) -> Result<Vec<QuizSummary>> {
        let entries = self
            .http
            .get(self.endpoint("history"))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<QuizSummary>>()
            .await
            .context("decoding history response")?;
        Ok(entries)
    }

    /// `GET /quiz/{id}` - one quiz by its backend identifier
    pub async fn fetch_quiz_by_id(&self, quiz_id: u64) -> Result<Quiz> {
        let quiz = self
            .http
            .get(self.endpoint(&format!("quiz/{}", quiz_id)))
            .send()
            .await?
            .error_for_status()?
            .json::<Quiz>()
            .await
            .context("decoding quiz response")?;
        Ok(quiz)
    }
}
