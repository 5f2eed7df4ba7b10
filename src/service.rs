//! Story service: owns the generative client, runs the parsing pipeline,
//! and derives exercise batches.
//!
//! The pipeline per generation attempt is extract -> repair -> validate;
//! fatal errors abort the whole attempt and the caller is expected to offer
//! a retry, discarding all intermediate state. A response arriving after the
//! timeout is dropped with the raced future and never applied.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{load_agent_config_from_env, Prompts};
use crate::domain::{ExerciseItem, ExerciseMode, StoryDocument, StorySource};
use crate::error::StoryError;
use crate::extract::{extract_story_json, Extraction};
use crate::gemini::Gemini;
use crate::quiz::derive_quiz_item;
use crate::order::derive_word_order_item;
use crate::repair::parse_or_repair;
use crate::seeds::seed_stories;
use crate::util::trunc_for_log;
use crate::validate::validate_story;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct StoryService {
  pub gemini: Option<Gemini>,
  pub prompts: Prompts,
  pub timeout: Duration,
}

impl StoryService {
  /// Build the service from env: config, optional Gemini client, timeout.
  #[instrument(level = "info", skip_all)]
  pub fn from_env() -> Self {
    let prompts = load_agent_config_from_env()
      .map(|c| c.prompts)
      .unwrap_or_default();

    let gemini = Gemini::from_env();
    if let Some(g) = &gemini {
      info!(target: "wordtale", base_url = %g.base_url, model = %g.model, "Gemini enabled.");
    } else {
      info!(target: "wordtale", "Gemini disabled (no GEMINI_API_KEY). Serving preset stories.");
    }

    let timeout = std::env::var("GEN_TIMEOUT_SECS")
      .ok()
      .and_then(|s| s.parse::<u64>().ok())
      .map(Duration::from_secs)
      .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

    Self { gemini, prompts, timeout }
  }

  /// Run raw model text through extract -> repair -> validate.
  pub fn parse_story_response(raw: &str) -> Result<StoryDocument, StoryError> {
    let extraction = extract_story_json(raw);
    match &extraction {
      Extraction::Parsed(_) => {}
      Extraction::Candidate(s) => {
        warn!(target: "story", candidate_len = s.len(), "extracted span needs repair")
      }
      Extraction::Exhausted(s) => {
        warn!(target: "story", preview = %trunc_for_log(s, 120), "no JSON span found; attempting repair on raw text")
      }
    }
    let raw_story = parse_or_repair(extraction.text())?;
    validate_story(raw_story)
  }

  /// Generate a story about `topic`, racing the model call against the
  /// configured timeout. Without a client, a preset story is served.
  #[instrument(level = "info", skip(self, rng), fields(%topic))]
  pub async fn generate_story<R: Rng>(
    &self,
    topic: &str,
    rng: &mut R,
  ) -> Result<(StoryDocument, StorySource), StoryError> {
    let Some(gemini) = &self.gemini else {
      let story = self.preset_story(rng);
      info!(target: "story", title = %story.title, "serving preset story");
      return Ok((story, StorySource::Preset));
    };

    let attempt = Uuid::new_v4();
    let raw = match tokio::time::timeout(
      self.timeout,
      gemini.generate_story_text(&self.prompts, topic),
    )
    .await
    {
      Ok(Ok(text)) => text,
      Ok(Err(e)) => {
        error!(target: "story", %attempt, error = %e, "generation call failed");
        return Err(StoryError::Generation(e));
      }
      Err(_) => {
        error!(target: "story", %attempt, timeout = ?self.timeout, "generation timed out; late responses are discarded");
        return Err(StoryError::Generation(format!(
          "no response within {:?}",
          self.timeout
        )));
      }
    };

    debug!(target: "story", %attempt, raw = %trunc_for_log(&raw, 200), "raw model response");
    let story = Self::parse_story_response(&raw)?;
    info!(
      target: "story",
      %attempt,
      title = %story.title,
      sentences = story.sentences.len(),
      "story generated"
    );
    Ok((story, StorySource::Generated))
  }

  fn preset_story<R: Rng>(&self, rng: &mut R) -> StoryDocument {
    let stories = seed_stories();
    stories
      .choose(rng)
      .cloned()
      .unwrap_or_else(|| StoryDocument {
        title: "Empty".into(),
        sentences: vec![],
      })
  }

  /// Derive one exercise per sentence. Each derivation creates fresh,
  /// independent objects; nothing is shared or mutated across sentences.
  pub fn derive_exercises<R: Rng>(
    story: &StoryDocument,
    mode: ExerciseMode,
    rng: &mut R,
  ) -> Vec<ExerciseItem> {
    story
      .sentences
      .iter()
      .map(|s| match mode {
        ExerciseMode::FillBlank => ExerciseItem::FillBlank(derive_quiz_item(s, rng)),
        ExerciseMode::WordOrder => ExerciseItem::WordOrder(derive_word_order_item(s, rng)),
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn full_pipeline_parses_a_prose_wrapped_response() {
    let raw = r#"Sure! Here is your story:
```json
{"title":"The Fox","sentences":[
  {"english":"A fox ran fast.","korean":"여우가 빨리 달렸다.","targetWordEnglish":"fox","targetWordKorean":"여우"},
  {"english":"The fox found a friend.","korean":"여우는 친구를 찾았다.","targetWordEnglish":"friend","targetWordKorean":"친구"}
]}
```
Hope you enjoy it!"#;
    let story = StoryService::parse_story_response(raw).expect("pipeline");
    assert_eq!(story.title, "The Fox");
    assert_eq!(story.sentences.len(), 2);
  }

  #[test]
  fn full_pipeline_recovers_a_truncated_response() {
    let raw = r#"{"title":"The Fox","sentences":[
  {"english":"A fox ran fast.","korean":"여우가 빨리 달렸다.","targetWordEnglish":"fox","targetWordKorean":"여우"},
  {"english":"The fox found"#;
    let story = StoryService::parse_story_response(raw).expect("pipeline");
    assert_eq!(story.sentences.len(), 1);
    assert_eq!(story.sentences[0].english, "A fox ran fast.");
  }

  #[test]
  fn fatal_schema_violation_aborts_the_whole_attempt() {
    let raw = r#"{"title":"The Fox","sentences":[
  {"english":"A fox ran fast.","korean":"여우가 빨리 달렸다.","targetWordEnglish":"fox","targetWordKorean":"여우"},
  {"english":"Missing korean.","korean":"","targetWordEnglish":"missing","targetWordKorean":"없음"}
]}"#;
    let err = StoryService::parse_story_response(raw).unwrap_err();
    match err {
      StoryError::SchemaViolation { sentence, field } => {
        assert_eq!(sentence, Some(1));
        assert_eq!(field, "korean");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn derive_exercises_yields_one_item_per_sentence() {
    let story = crate::seeds::seed_stories().remove(0);
    let mut rng = StdRng::seed_from_u64(3);
    let quiz = StoryService::derive_exercises(&story, ExerciseMode::FillBlank, &mut rng);
    assert_eq!(quiz.len(), story.sentences.len());
    let order = StoryService::derive_exercises(&story, ExerciseMode::WordOrder, &mut rng);
    assert_eq!(order.len(), story.sentences.len());
  }
}
