//! Grading word-order submissions under article-equivalence rules.
//!
//! A submission is an ordered list of shuffled-array indices. Non-article
//! tokens must land exactly where the canonical reading puts them; the
//! articles `a`, `an`, `the` may swap positions among themselves as long as
//! the overall article counts match.

use std::collections::HashMap;

use crate::domain::WordOrderItem;

const ARTICLES: [&str; 3] = ["a", "an", "the"];

/// Case-insensitive membership in `{a, an, the}`.
pub fn is_article(word: &str) -> bool {
  ARTICLES.iter().any(|a| word.eq_ignore_ascii_case(a))
}

/// Grade a submitted ordering against the item's canonical order.
///
/// Malformed submissions (wrong length, out-of-range index, index used more
/// than once) grade incorrect rather than erroring; the presentation layer
/// prevents them, this is the data-level backstop.
pub fn grade_word_order(item: &WordOrderItem, submission: &[usize]) -> bool {
  let n = item.words.len();
  if submission.len() != n {
    return false;
  }
  let mut used = vec![false; n];
  for &i in submission {
    if i >= n || used[i] {
      return false;
    }
    used[i] = true;
  }

  let mut canonical_articles: HashMap<String, usize> = HashMap::new();
  let mut submitted_articles: HashMap<String, usize> = HashMap::new();

  for pos in 0..n {
    let canonical = &item.words[item.correct_order[pos]];
    let submitted = &item.words[submission[pos]];
    if is_article(canonical) {
      if !is_article(submitted) {
        return false;
      }
      *canonical_articles.entry(canonical.to_lowercase()).or_default() += 1;
      *submitted_articles.entry(submitted.to_lowercase()).or_default() += 1;
    } else if submitted != canonical {
      return false;
    }
  }

  // Same count of each article kind across all article-tagged positions.
  canonical_articles == submitted_articles
}
