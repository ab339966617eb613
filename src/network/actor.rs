//! Network actor - runs quiz backend calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::QuizClient;

/// Network actor that executes quiz backend commands
pub struct NetworkActor {
    client: QuizClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    in_flight: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: QuizClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            in_flight: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::GenerateQuiz { id, url, num_questions }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(id, url = %url, num_questions, "generating quiz");
                                let response = match client.generate_quiz(&url, num_questions).await {
                                    Ok(quiz) => {
                                        tracing::info!(id, quiz_id = quiz.quiz_id, "quiz generated");
                                        NetworkResponse::QuizGenerated { id, quiz }
                                    }
                                    Err(e) => {
                                        tracing::warn!(id, error = %format!("{:#}", e), "generate-quiz failed");
                                        NetworkResponse::Error { id, message: format!("{:#}", e) }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::FetchHistory { id }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(id, "fetching history");
                                let response = match client.fetch_history().await {
                                    Ok(entries) => NetworkResponse::HistoryLoaded { id, entries },
                                    Err(e) => {
                                        tracing::warn!(id, error = %format!("{:#}", e), "history fetch failed");
                                        NetworkResponse::Error { id, message: format!("{:#}", e) }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::FetchQuiz { id, quiz_id }) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(id, quiz_id, "fetching quiz");
                                let response = match client.fetch_quiz_by_id(quiz_id).await {
                                    Ok(quiz) => NetworkResponse::QuizLoaded { id, quiz },
                                    Err(e) => {
                                        tracing::warn!(id, quiz_id, error = %format!("{:#}", e), "quiz fetch failed");
                                        NetworkResponse::Error { id, message: format!("{:#}", e) }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.in_flight.join_next() => {
                    // Task completed - nothing to track per request
                }
            }
        }
    }
}
