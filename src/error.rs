//! Error kinds for the story pipeline.
//!
//! Fatal kinds abort the whole generation/load attempt; there is no partial
//! N-of-M sentence success. Non-fatal conditions (no JSON span found, target
//! word missing from its sentence) are modeled as ordinary outcomes in their
//! modules and never reach the caller as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryError {
  /// The response was not valid JSON and no repair cut produced one.
  #[error("unrepairable model response{}: {source}", if *.truncated { " (response may have been cut off)" } else { "" })]
  MalformedResponse {
    #[source]
    source: serde_json::Error,
    /// True when the scan ended inside a string or with open containers,
    /// i.e. the response looks truncated rather than merely malformed.
    truncated: bool,
  },

  /// Structurally valid JSON missing a required field or carrying an empty
  /// one. `sentence` is None for story-level problems (title, sentences).
  #[error("story schema violation: {}field '{field}' is missing or empty",
          .sentence.map(|i| format!("sentence {i}: ")).unwrap_or_default())]
  SchemaViolation {
    sentence: Option<usize>,
    field: &'static str,
  },

  /// The generative service failed or timed out before producing text.
  #[error("story generation failed: {0}")]
  Generation(String),
}

impl StoryError {
  pub fn schema(sentence: Option<usize>, field: &'static str) -> Self {
    StoryError::SchemaViolation { sentence, field }
  }
}
