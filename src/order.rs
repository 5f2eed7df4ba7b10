//! Word-order puzzle derivation: shuffle a sentence's tokens and compute a
//! duplicate-safe mapping back to canonical order.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Sentence, WordOrderItem};

/// Tokenize a sentence: strip `. , ! ? ; :`, split on whitespace runs.
pub fn tokenize(english: &str) -> Vec<String> {
  english
    .chars()
    .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
    .collect::<String>()
    .split_whitespace()
    .map(str::to_string)
    .collect()
}

/// Derive a word-order item from a validated sentence.
///
/// Duplicate tokens are reconciled greedily in shuffle-scan order: each
/// shuffled token claims the first not-yet-claimed canonical slot holding an
/// equal token. `correct_order` is the inverse of that claim, so
/// `words[correct_order[j]]` is the token for output slot `j`.
pub fn derive_word_order_item<R: Rng + ?Sized>(sentence: &Sentence, rng: &mut R) -> WordOrderItem {
  let canonical = tokenize(&sentence.english);
  let n = canonical.len();

  let mut words = canonical.clone();
  words.shuffle(rng);

  let mut claimed = vec![false; n];
  let mut claim = vec![0usize; n];
  for (i, w) in words.iter().enumerate() {
    // words is a permutation of canonical, so an unclaimed slot exists
    if let Some(j) = (0..n).find(|&j| !claimed[j] && canonical[j] == *w) {
      claimed[j] = true;
      claim[i] = j;
    }
  }

  let mut correct_order = vec![0usize; n];
  for (i, &j) in claim.iter().enumerate() {
    correct_order[j] = i;
  }

  WordOrderItem {
    sentence: sentence.clone(),
    words,
    correct_order,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn sentence(english: &str) -> Sentence {
    Sentence {
      english: english.into(),
      korean: "번역".into(),
      target_word_english: "word".into(),
      target_word_korean: "단어".into(),
      part_of_speech: None,
      wrong_answers: None,
    }
  }

  fn reconstruct(item: &WordOrderItem) -> Vec<String> {
    item.correct_order.iter().map(|&i| item.words[i].clone()).collect()
  }

  #[test]
  fn tokenize_strips_punctuation_and_empty_tokens() {
    assert_eq!(tokenize("The dog ran fast."), ["The", "dog", "ran", "fast"]);
    assert_eq!(tokenize("Wait... what?!"), ["Wait", "what"]);
    assert_eq!(tokenize("a  b\tc"), ["a", "b", "c"]);
  }

  #[test]
  fn words_are_a_permutation_and_reconstruct_the_sentence() {
    let s = sentence("The dog ran fast.");
    for seed in 0..50 {
      let mut rng = StdRng::seed_from_u64(seed);
      let item = derive_word_order_item(&s, &mut rng);

      let mut sorted = item.words.clone();
      sorted.sort_unstable();
      let mut expected = tokenize(&s.english);
      expected.sort_unstable();
      assert_eq!(sorted, expected, "seed {seed}");

      assert_eq!(reconstruct(&item), tokenize(&s.english), "seed {seed}");
    }
  }

  #[test]
  fn correct_order_is_a_permutation_of_indices() {
    let s = sentence("One two three four five.");
    let mut rng = StdRng::seed_from_u64(13);
    let item = derive_word_order_item(&s, &mut rng);
    let mut seen = item.correct_order.clone();
    seen.sort_unstable();
    assert_eq!(seen, (0..item.words.len()).collect::<Vec<_>>());
  }

  #[test]
  fn duplicate_tokens_still_reconstruct_a_token_equal_reading() {
    // claims happen in shuffle-scan order; the reconstruction must be
    // token-equal to the canonical sequence even with repeats
    let s = sentence("the cat and the dog and the bird.");
    for seed in 0..100 {
      let mut rng = StdRng::seed_from_u64(seed);
      let item = derive_word_order_item(&s, &mut rng);
      assert_eq!(reconstruct(&item), tokenize(&s.english), "seed {seed}");
    }
  }

  #[test]
  fn single_word_sentence_is_trivial() {
    let s = sentence("Hello!");
    let mut rng = StdRng::seed_from_u64(0);
    let item = derive_word_order_item(&s, &mut rng);
    assert_eq!(item.words, ["Hello"]);
    assert_eq!(item.correct_order, [0]);
  }
}
