// ONNX Runtime backend for the fine-tuned IndoBERT hoax classifier.
//
// The model is exported with three int64 inputs (input_ids, attention_mask,
// token_type_ids) of shape [1, 128] and one float output of logits [1, 2].

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::traits::{EncodedInput, SequenceClassifier};

pub const MODEL_FILE: &str = "model.onnx";
pub const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct OnnxClassifier {
    // Session::run takes &mut self.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    max_length: usize,
    pad_id: u32,
}

impl OnnxClassifier {
    /// Load `model.onnx` and `tokenizer.json` from `model_dir`.
    pub fn load(model_dir: &Path, max_length: usize) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}\nRun `cekviral download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Tokenizer file not found: {}\nRun `cekviral download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let pad_id = tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0);

        // Padding is applied by hand to exactly max_length.
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        debug!(dir = %model_dir.display(), pad_id, "Loaded ONNX classifier");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            max_length,
            pad_id,
        })
    }
}

/// Right-pad an encoding to `max_length`.
pub fn pad_to(
    ids: &[u32],
    mask: &[u32],
    type_ids: &[u32],
    max_length: usize,
    pad_id: u32,
) -> EncodedInput {
    let take = ids.len().min(max_length);
    let mut input = EncodedInput {
        input_ids: ids[..take].to_vec(),
        attention_mask: mask[..take.min(mask.len())].to_vec(),
        type_ids: type_ids[..take.min(type_ids.len())].to_vec(),
    };
    input.input_ids.resize(max_length, pad_id);
    input.attention_mask.resize(max_length, 0);
    input.type_ids.resize(max_length, 0);
    input
}

impl SequenceClassifier for OnnxClassifier {
    fn vocab_size(&self) -> usize {
        self.tokenizer.get_vocab_size(true)
    }

    fn encode(&self, text: &str) -> Result<EncodedInput> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        Ok(pad_to(
            encoding.get_ids(),
            encoding.get_attention_mask(),
            encoding.get_type_ids(),
            self.max_length,
            self.pad_id,
        ))
    }

    fn forward(&self, input: &EncodedInput) -> Result<[f32; 2]> {
        let shape = [1_i64, self.max_length as i64];
        let widen = |v: &[u32]| v.iter().map(|&x| x as i64).collect::<Vec<i64>>();

        let input_ids = Tensor::from_array((shape, widen(&input.input_ids)))
            .context("Failed to create input_ids tensor")?;
        let attention_mask = Tensor::from_array((shape, widen(&input.attention_mask)))
            .context("Failed to create attention_mask tensor")?;
        let token_type_ids = Tensor::from_array((shape, widen(&input.type_ids)))
            .context("Failed to create token_type_ids tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids,
                "attention_mask" => attention_mask,
                "token_type_ids" => token_type_ids
            })
            .context("ONNX inference failed")?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract logits tensor")?;

        match data {
            [hoax, fakta, ..] => Ok([*hoax, *fakta]),
            _ => anyhow::bail!("Expected 2 logits, model returned {}", data.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_fills_to_length() {
        let input = pad_to(&[2, 10, 3], &[1, 1, 1], &[0, 0, 0], 6, 0);
        assert_eq!(input.input_ids, vec![2, 10, 3, 0, 0, 0]);
        assert_eq!(input.attention_mask, vec![1, 1, 1, 0, 0, 0]);
        assert_eq!(input.type_ids, vec![0; 6]);
    }

    #[test]
    fn test_pad_to_truncates_long_input() {
        let ids: Vec<u32> = (0..200).collect();
        let ones = vec![1; 200];
        let input = pad_to(&ids, &ones, &ones, 128, 0);
        assert_eq!(input.input_ids.len(), 128);
        assert_eq!(input.attention_mask.len(), 128);
        assert_eq!(input.input_ids[127], 127);
    }

    #[test]
    fn test_load_missing_files_errors() {
        let dir = std::env::temp_dir().join("cekviral-test-no-model");
        let err = OnnxClassifier::load(&dir, 128).err().unwrap();
        assert!(err.to_string().contains("Model file not found"));
    }
}
