// Verification pipeline: request/result types and the orchestrator that
// drives classification, extraction, normalization and inference.

pub mod models;
pub mod verify;

pub use models::{ContentInput, InputType, VerificationResult, UNSAVED};
pub use verify::Verifier;
