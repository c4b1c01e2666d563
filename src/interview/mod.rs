// src/interview/mod.rs
// Turn-control core: classifier, selector, session state machine, orchestration.

pub mod classifier;
pub mod selector;
pub mod session;
pub mod turn;

pub use selector::TurnDecision;
pub use session::{InterviewSession, SessionStatus};
pub use turn::{InterviewService, TurnError};
