//! Network layer - quiz backend HTTP execution
//!
//! The Network actor receives quiz commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::QuizClient;
