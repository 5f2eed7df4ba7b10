//! Wordtale · story-based vocabulary trainer core.
//!
//! The crate owns the two-stage pipeline behind the trainer:
//! 1. Resilient parsing of generative-model output into a story document
//!    (`extract` -> `repair` -> `validate`).
//! 2. Deterministic derivation of graded exercises from validated sentences
//!    (`quiz`, `order`) plus word-order grading (`grade`).
//!
//! Screens, navigation and presentation live outside this crate; they call
//! `service::StoryService` and consume the immutable items it returns.

pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod grade;
pub mod order;
pub mod quiz;
pub mod repair;
pub mod seeds;
pub mod service;
pub mod telemetry;
pub mod util;
pub mod validate;
