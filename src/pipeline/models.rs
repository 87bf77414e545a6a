// Request and result types for one verification.

use serde::{Deserialize, Serialize};

use crate::inference::PredictionOutput;

/// History id used when the result was not persisted.
pub const UNSAVED: &str = "unsaved";

/// Free text or a URL to verify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentInput {
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Url,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub original_input: String,
    pub input_type: InputType,
    /// Text that was extracted from the input, before normalization.
    /// Empty when nothing could be extracted.
    pub processed_text: String,
    pub prediction: PredictionOutput,
    pub processing_message: String,
    pub history_id: String,
}

impl VerificationResult {
    pub fn is_saved(&self) -> bool {
        self.history_id != UNSAVED
    }
}
