//! Editorial workflow orchestration.
//!
//! [`lifecycle`] owns the article status state machine and is the only
//! writer of `articles.status`. [`review_board`] manages reviewer
//! assignments and the editor-reviewer review-request handshake that gates
//! request-based assignment.

pub mod lifecycle;
pub mod review_board;

pub use lifecycle::{LifecycleEngine, TransitionCommand, TransitionOutcome};
pub use review_board::{ReviewBoard, ReviewDecision, ReviewResponseOutcome};
