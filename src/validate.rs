//! Minimal required shape of a parsed story.
//!
//! Unlike extraction and repair, this stage is strict: the first violation
//! aborts the whole story with a precise location. There is no partial
//! acceptance of N-of-M sentences.

use crate::domain::{PartOfSpeech, Sentence, StoryDocument};
use crate::error::StoryError;
use crate::repair::RawStory;

/// Convert a leniently-parsed story into a validated `StoryDocument`.
///
/// Field names in errors use the wire spelling so they can be matched
/// against the raw response.
pub fn validate_story(raw: RawStory) -> Result<StoryDocument, StoryError> {
  if raw.title.trim().is_empty() {
    return Err(StoryError::schema(None, "title"));
  }
  if raw.sentences.is_empty() {
    return Err(StoryError::schema(None, "sentences"));
  }

  let mut sentences = Vec::with_capacity(raw.sentences.len());
  for (i, s) in raw.sentences.into_iter().enumerate() {
    if s.english.trim().is_empty() {
      return Err(StoryError::schema(Some(i), "english"));
    }
    if s.korean.trim().is_empty() {
      return Err(StoryError::schema(Some(i), "korean"));
    }
    if s.target_word_english.trim().is_empty() {
      return Err(StoryError::schema(Some(i), "targetWordEnglish"));
    }
    if s.target_word_korean.trim().is_empty() {
      return Err(StoryError::schema(Some(i), "targetWordKorean"));
    }

    // Optional fields are normalized rather than rejected: an unknown part
    // of speech or a wrong-answer list that is not exactly 3 entries simply
    // becomes absent, and derivation falls back to its pools.
    let part_of_speech = s.part_of_speech.as_deref().and_then(PartOfSpeech::parse);
    let wrong_answers = s.wrong_answers.filter(|w| w.len() == 3);

    sentences.push(Sentence {
      english: s.english,
      korean: s.korean,
      target_word_english: s.target_word_english,
      target_word_korean: s.target_word_korean,
      part_of_speech,
      wrong_answers,
    });
  }

  Ok(StoryDocument { title: raw.title, sentences })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::repair::RawSentence;
  use pretty_assertions::assert_eq;

  fn raw_sentence() -> RawSentence {
    RawSentence {
      english: "The cat sat.".into(),
      korean: "고양이가 앉았다.".into(),
      target_word_english: "cat".into(),
      target_word_korean: "고양이".into(),
      part_of_speech: None,
      wrong_answers: None,
    }
  }

  fn raw_story(sentences: Vec<RawSentence>) -> RawStory {
    RawStory { title: "A Story".into(), sentences }
  }

  #[test]
  fn accepts_a_minimal_story() {
    let story = validate_story(raw_story(vec![raw_sentence()])).expect("valid");
    assert_eq!(story.title, "A Story");
    assert_eq!(story.sentences.len(), 1);
  }

  #[test]
  fn missing_korean_names_the_sentence_and_field() {
    let ok = raw_sentence();
    let mut bad = raw_sentence();
    bad.korean = String::new();
    let err = validate_story(raw_story(vec![ok, bad])).unwrap_err();
    match err {
      StoryError::SchemaViolation { sentence, field } => {
        assert_eq!(sentence, Some(1));
        assert_eq!(field, "korean");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn blank_title_is_rejected_at_story_level() {
    let mut raw = raw_story(vec![raw_sentence()]);
    raw.title = "   ".into();
    let err = validate_story(raw).unwrap_err();
    match err {
      StoryError::SchemaViolation { sentence, field } => {
        assert_eq!(sentence, None);
        assert_eq!(field, "title");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn empty_sentence_list_is_rejected() {
    let err = validate_story(raw_story(vec![])).unwrap_err();
    match err {
      StoryError::SchemaViolation { sentence, field } => {
        assert_eq!(sentence, None);
        assert_eq!(field, "sentences");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn malformed_optional_fields_are_normalized_away() {
    let mut s = raw_sentence();
    s.part_of_speech = Some("interjection".into());
    s.wrong_answers = Some(vec!["only".into(), "two".into()]);
    let story = validate_story(raw_story(vec![s])).expect("valid");
    assert_eq!(story.sentences[0].part_of_speech, None);
    assert_eq!(story.sentences[0].wrong_answers, None);
  }

  #[test]
  fn known_part_of_speech_survives() {
    let mut s = raw_sentence();
    s.part_of_speech = Some("Noun".into());
    s.wrong_answers = Some(vec!["dog".into(), "bird".into(), "fish".into()]);
    let story = validate_story(raw_story(vec![s])).expect("valid");
    assert_eq!(story.sentences[0].part_of_speech, Some(PartOfSpeech::Noun));
    assert_eq!(
      story.sentences[0].wrong_answers.as_deref(),
      Some(&["dog".to_string(), "bird".into(), "fish".into()][..])
    );
  }
}
