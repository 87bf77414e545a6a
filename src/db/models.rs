// History rows. Kept free of any database crate so the web layer and CLI
// can use them without pulling in a backend.

use serde::{Deserialize, Serialize};

use crate::pipeline::models::VerificationResult;

/// One saved verification, as listed back to its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub history_id: String,
    pub original_input: String,
    pub input_type: String,
    pub processed_text: String,
    pub predicted_label: String,
    pub prob_hoax: f64,
    pub prob_fakta: f64,
    pub final_label_threshold: String,
    pub inference_time_ms: f64,
    pub user_id: Option<String>,
    pub created_at: String,
}

/// Column values for inserting a result. Borrowed from the result so saving
/// doesn't copy the (possibly long) extracted text.
#[derive(Debug, Clone, Copy)]
pub struct NewHistoryRow<'a> {
    pub history_id: &'a str,
    pub original_input: &'a str,
    pub input_type: &'static str,
    pub processed_text: &'a str,
    pub predicted_label: &'a str,
    pub prob_hoax: f64,
    pub prob_fakta: f64,
    pub final_label_threshold: &'static str,
    pub inference_time_ms: f64,
    pub user_id: Option<&'a str>,
}

impl<'a> NewHistoryRow<'a> {
    pub fn from_result(
        history_id: &'a str,
        result: &'a VerificationResult,
        user_id: Option<&'a str>,
    ) -> Self {
        let prediction = &result.prediction;
        Self {
            history_id,
            original_input: &result.original_input,
            input_type: result.input_type.as_str(),
            processed_text: &result.processed_text,
            predicted_label: &prediction.predicted_label_model,
            prob_hoax: prediction.probabilities.hoax,
            prob_fakta: prediction.probabilities.fakta,
            final_label_threshold: prediction.final_label_thresholded.as_str(),
            inference_time_ms: prediction.inference_time_ms,
            user_id,
        }
    }
}
