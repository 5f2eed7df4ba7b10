//! Fill-in-the-blank derivation: split a sentence around its target word and
//! synthesize a 4-way multiple choice.
//!
//! The randomness source is injected so choice order is reproducible in
//! tests; only the shuffle consumes it.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::domain::{PartOfSpeech, QuizItem, Sentence};

const NOUN_POOL: &[&str] = &["thing", "place", "person", "object", "item", "stuff", "matter", "subject"];
const VERB_POOL: &[&str] = &["do", "make", "get", "take", "go", "come", "see", "know"];
const ADJECTIVE_POOL: &[&str] = &["good", "bad", "big", "small", "new", "old", "nice", "fine"];
const ADVERB_POOL: &[&str] = &["well", "badly", "quickly", "slowly", "carefully", "easily", "hardly", "really"];
const GENERIC_POOL: &[&str] = &["thing", "do", "good", "well"];
const PLACEHOLDERS: [&str; 3] = ["option1", "option2", "option3"];

fn pool_for(pos: Option<PartOfSpeech>) -> &'static [&'static str] {
  match pos {
    Some(PartOfSpeech::Noun) => NOUN_POOL,
    Some(PartOfSpeech::Verb) => VERB_POOL,
    Some(PartOfSpeech::Adjective) => ADJECTIVE_POOL,
    Some(PartOfSpeech::Adverb) => ADVERB_POOL,
    Some(PartOfSpeech::All) | None => GENERIC_POOL,
  }
}

/// Derive a quiz item from a validated sentence.
pub fn derive_quiz_item<R: Rng + ?Sized>(sentence: &Sentence, rng: &mut R) -> QuizItem {
  let english = &sentence.english;
  let target = &sentence.target_word_english;

  let (parts, hidden_word) = match find_target(english, target) {
    Some((start, end)) => {
      // Preserve the sentence's own casing for the hidden word.
      let hidden = english[start..end].to_string();
      (
        [english[..start].to_string(), hidden.clone(), english[end..].to_string()],
        hidden,
      )
    }
    None => {
      // Target word not literally present. The exercise still renders, just
      // without a visible blank; never surfaced as an error.
      warn!(
        target: "story",
        word = %target,
        sentence = %english,
        "target word not found in sentence; degrading to blank-less item"
      );
      ([english.clone(), String::new(), String::new()], target.clone())
    }
  };

  let distractors = synth_distractors(
    &hidden_word,
    sentence.wrong_answers.as_deref(),
    sentence.part_of_speech,
  );

  let mut choices = [hidden_word.clone(), String::new(), String::new(), String::new()];
  for (slot, w) in choices[1..].iter_mut().zip(distractors) {
    *slot = w;
  }
  choices.shuffle(rng);

  let correct_index = choices
    .iter()
    .position(|c| c.eq_ignore_ascii_case(&hidden_word))
    .unwrap_or(0);

  QuizItem {
    sentence: sentence.clone(),
    hidden_word,
    parts,
    choices,
    correct_index,
  }
}

/// First case-insensitive literal occurrence of `target` inside `english`,
/// as a byte range. No word-boundary requirement.
fn find_target(english: &str, target: &str) -> Option<(usize, usize)> {
  let hay = english.as_bytes();
  let needle = target.as_bytes();
  if needle.is_empty() || needle.len() > hay.len() {
    return None;
  }
  for start in 0..=hay.len() - needle.len() {
    let end = start + needle.len();
    if english.is_char_boundary(start)
      && english.is_char_boundary(end)
      && hay[start..end].eq_ignore_ascii_case(needle)
    {
      return Some((start, end));
    }
  }
  None
}

/// Exactly 3 distractors: the sentence's own wrong answers when exactly 3
/// were supplied, topped up from the part-of-speech pool, padded with
/// literal placeholders as a last resort. Anything equal to the correct
/// word case-insensitively is excluded.
fn synth_distractors(
  correct: &str,
  own: Option<&[String]>,
  pos: Option<PartOfSpeech>,
) -> Vec<String> {
  let mut out: Vec<String> = Vec::with_capacity(3);

  if let Some(own) = own {
    if own.len() == 3 {
      for w in own {
        if !w.eq_ignore_ascii_case(correct) && !out.contains(w) {
          out.push(w.clone());
        }
      }
    }
  }

  for w in pool_for(pos) {
    if out.len() >= 3 {
      break;
    }
    if !w.eq_ignore_ascii_case(correct) && !out.iter().any(|x| x.eq_ignore_ascii_case(w)) {
      out.push((*w).to_string());
    }
  }

  for p in PLACEHOLDERS {
    if out.len() >= 3 {
      break;
    }
    out.push(p.to_string());
  }

  out.truncate(3);
  out
}
