// Sequence classifier trait: the seam between the engine and the runtime
// that actually executes the model.

use anyhow::Result;

/// Token ids for one sequence, padded to the model's fixed length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedInput {
    pub input_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub type_ids: Vec<u32>,
}

/// A binary text classifier. Calls are blocking and CPU-bound; callers run
/// them on the blocking pool.
pub trait SequenceClassifier: Send + Sync {
    fn vocab_size(&self) -> usize;

    /// Tokenize with truncation and padding.
    fn encode(&self, text: &str) -> Result<EncodedInput>;

    /// Raw logits, HOAX first.
    fn forward(&self, input: &EncodedInput) -> Result<[f32; 2]>;
}
