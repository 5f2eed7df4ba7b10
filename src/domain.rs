//! Domain models: story documents, sentences, and the derived exercise items.
//!
//! Everything here is an immutable value object. Derivation produces fresh
//! instances; regeneration never mutates an existing story or item in place.

use serde::{Deserialize, Serialize};

/// Grammatical category of a sentence's target word. Drives which distractor
/// pool is used when the sentence does not supply its own wrong answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
  Noun,
  Verb,
  Adjective,
  Adverb,
  /// No single category; the generic pool applies.
  All,
}

impl PartOfSpeech {
  /// Lenient parse for model-supplied values; anything unrecognized is None.
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "noun" => Some(PartOfSpeech::Noun),
      "verb" => Some(PartOfSpeech::Verb),
      "adjective" => Some(PartOfSpeech::Adjective),
      "adverb" => Some(PartOfSpeech::Adverb),
      "all" => Some(PartOfSpeech::All),
      _ => None,
    }
  }
}

/// One story sentence with its vocabulary target.
///
/// Invariant (enforced by `validate`): the four base string fields are
/// non-empty; `wrong_answers`, when present, has exactly 3 entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
  pub english: String,
  pub korean: String,
  pub target_word_english: String,
  pub target_word_korean: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub part_of_speech: Option<PartOfSpeech>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wrong_answers: Option<Vec<String>>,
}

/// A validated story: non-empty title, non-empty sentence list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
  pub title: String,
  pub sentences: Vec<Sentence>,
}

/// Where a served story came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorySource {
  Generated, // produced by the generative service for a topic
  Preset,    // built-in seed story
}

/// Which exercise to derive from each sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseMode {
  FillBlank,
  WordOrder,
}

/// Fill-in-the-blank multiple choice item.
///
/// Invariant: exactly one entry of `choices` equals `hidden_word`
/// case-insensitively, and `correct_index` names it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
  pub sentence: Sentence,
  pub hidden_word: String,
  /// `[prefix, hidden, suffix]`; prefix holds the whole sentence and the
  /// other two are empty when the target word was not found literally.
  pub parts: [String; 3],
  pub choices: [String; 4],
  pub correct_index: usize,
}

/// One derived exercise, tagged for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseItem {
  FillBlank(QuizItem),
  WordOrder(WordOrderItem),
}

/// Word-order reconstruction item.
///
/// `words` is a permutation of the tokenized sentence. `correct_order[j]` is
/// the index into `words` whose entry belongs at output slot `j`; selecting
/// `words[correct_order[j]]` for ascending `j` rebuilds the sentence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOrderItem {
  pub sentence: Sentence,
  pub words: Vec<String>,
  pub correct_order: Vec<usize>,
}
