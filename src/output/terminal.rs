// Colored terminal output for verification results and history.
//
// main.rs delegates all human-readable display here; --json output bypasses
// this module entirely.

use colored::{ColoredString, Colorize};

use crate::db::HistoryRecord;
use crate::inference::FinalLabel;
use crate::pipeline::VerificationResult;

/// Display one verification result.
pub fn display_result(result: &VerificationResult) {
    let prediction = &result.prediction;

    println!("\n{}", "=== Hasil Verifikasi ===".bold());
    println!(
        "  Input ({}): {}",
        result.input_type.as_str(),
        super::truncate_chars(&result.original_input, 100)
    );
    println!("  Verdict: {}", colorize_label(prediction.final_label_thresholded));

    if prediction.is_success() {
        println!(
            "  HOAX {:.2}  |  FAKTA {:.2}  |  model label: {} ({:.2})",
            prediction.probabilities.hoax,
            prediction.probabilities.fakta,
            prediction.predicted_label_model,
            prediction.highest_confidence,
        );
        println!("  Inference: {:.1} ms", prediction.inference_time_ms);
    } else {
        println!("  Model: {}", prediction.message.yellow());
    }

    println!("  {}", result.processing_message.dimmed());

    if !result.processed_text.is_empty() {
        println!(
            "\n  Extracted text: {}",
            super::truncate_chars(&result.processed_text, 200).dimmed()
        );
    }

    if result.is_saved() {
        println!("\n  Saved as {}", result.history_id);
    } else {
        println!("\n  {}", "Not saved to history".dimmed());
    }
}

/// Display saved verifications, newest first.
pub fn display_history(records: &[HistoryRecord]) {
    if records.is_empty() {
        println!("No verifications saved yet. Run `cekviral verify <content>` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Riwayat ({} entries) ===", records.len()).bold()
    );
    println!();
    println!(
        "  {:<19}  {:<5}  {:<20}  {:>5}  {}",
        "Time".dimmed(),
        "Type".dimmed(),
        "Verdict".dimmed(),
        "Fakta".dimmed(),
        "Input".dimmed(),
    );
    println!("  {}", "-".repeat(90).dimmed());

    for record in records {
        println!(
            "  {:<19}  {:<5}  {:<20}  {:>5.2}  {}",
            record.created_at,
            record.input_type,
            colorize_label_str(&record.final_label_threshold),
            record.prob_fakta,
            super::truncate_chars(&record.original_input, 60),
        );
    }
}

fn colorize_label(label: FinalLabel) -> ColoredString {
    match label {
        FinalLabel::Hoax => label.as_str().red().bold(),
        FinalLabel::Fakta => label.as_str().green().bold(),
        FinalLabel::Unverified => label.as_str().yellow(),
    }
}

fn colorize_label_str(label: &str) -> ColoredString {
    match label {
        "HOAX" => colorize_label(FinalLabel::Hoax),
        "FAKTA" => colorize_label(FinalLabel::Fakta),
        other => other.yellow(),
    }
}
