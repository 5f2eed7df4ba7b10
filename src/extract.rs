//! Finding the most likely story JSON inside raw model output.
//!
//! Generators wrap their answer in prose, echo schema examples before the
//! real document, or fence it in markdown. The extractor walks the text once
//! per pass with a brace/bracket/string-state scanner and hands the best
//! candidate substring to the repair stage.

use tracing::{debug, warn};

/// Outcome of extraction. Every variant carries text for the repair stage;
/// the variant records how confident the scan was.
#[derive(Clone, Debug, PartialEq)]
pub enum Extraction {
  /// A balanced span that already parsed and has `title` + `sentences`.
  Parsed(String),
  /// A balanced span containing both expected keys that did not parse on
  /// its own; repair may still recover it.
  Candidate(String),
  /// No qualifying object-like span found; the trimmed original text.
  Exhausted(String),
}

impl Extraction {
  pub fn text(&self) -> &str {
    match self {
      Extraction::Parsed(s) | Extraction::Candidate(s) | Extraction::Exhausted(s) => s,
    }
  }
}

/// Extract the best story-document candidate from arbitrary generated text.
pub fn extract_story_json(raw: &str) -> Extraction {
  let text = strip_code_fences(raw);

  // Pass 1 (anchored): objects whose opening region starts with "title".
  // Right-most first; the generator sometimes echoes a schema example
  // before the real answer.
  let mut anchored: Vec<usize> = anchored_starts(text);
  anchored.sort_unstable();
  for &start in anchored.iter().rev() {
    if let Some(end) = balanced_object_end(text.as_bytes(), start) {
      let span = &text[start..end];
      if parses_as_story(span) {
        debug!(target: "story", start, len = span.len(), "anchored extraction hit");
        return Extraction::Parsed(span.to_string());
      }
    }
  }

  // Pass 2 (unanchored): every top-level balanced object span that mentions
  // both keys anywhere in its raw text.
  let spans = top_level_spans(text);
  let keyed: Vec<&(usize, usize)> = spans
    .iter()
    .filter(|(s, e)| {
      let raw = &text[*s..*e];
      raw.contains("\"title\"") && raw.contains("\"sentences\"")
    })
    .collect();
  for (start, end) in keyed.iter().rev() {
    let span = &text[*start..*end];
    if parses_as_story(span) {
      debug!(target: "story", start, len = span.len(), "unanchored extraction hit");
      return Extraction::Parsed(span.to_string());
    }
  }
  if let Some((start, end)) = keyed.last() {
    warn!(target: "story", start, "no span parsed; forwarding latest candidate for repair");
    return Extraction::Candidate(text[*start..*end].to_string());
  }

  warn!(target: "story", text_len = text.len(), "no object-like span found; forwarding raw text");
  Extraction::Exhausted(text.to_string())
}

/// Trim whitespace and strip leading/trailing markdown code fences.
fn strip_code_fences(text: &str) -> &str {
  let mut s = text.trim();
  if let Some(rest) = s.strip_prefix("```") {
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    s = rest.trim_start();
  }
  if let Some(rest) = s.strip_suffix("```") {
    s = rest.trim_end();
  }
  s
}

fn parses_as_story(span: &str) -> bool {
  match serde_json::from_str::<serde_json::Value>(span) {
    Ok(v) => {
      v.get("title").is_some() && v.get("sentences").map_or(false, |s| s.is_array())
    }
    Err(_) => false,
  }
}

/// Positions of `{` followed by optional whitespace and `"title"`.
fn anchored_starts(text: &str) -> Vec<usize> {
  let bytes = text.as_bytes();
  let mut out = Vec::new();
  for (i, &b) in bytes.iter().enumerate() {
    if b != b'{' {
      continue;
    }
    let rest = text[i + 1..].trim_start();
    if rest.starts_with("\"title\"") {
      out.push(i);
    }
  }
  out
}

/// Walk forward from an opening `{`, tracking brace depth, bracket depth and
/// in-string/escape state, until brace depth returns to zero. Returns the
/// exclusive end of the span.
fn balanced_object_end(bytes: &[u8], start: usize) -> Option<usize> {
  let mut brace = 0i32;
  let mut bracket = 0i32;
  let mut in_string = false;
  let mut escape = false;
  for (i, &b) in bytes.iter().enumerate().skip(start) {
    if escape {
      escape = false;
      continue;
    }
    if b == b'\\' {
      escape = true;
      continue;
    }
    if b == b'"' {
      in_string = !in_string;
      continue;
    }
    if in_string {
      continue;
    }
    match b {
      b'{' => brace += 1,
      b'}' => {
        brace -= 1;
        if brace == 0 && bracket == 0 {
          return Some(i + 1);
        }
      }
      b'[' => bracket += 1,
      b']' => bracket -= 1,
      _ => {}
    }
  }
  None
}

/// All complete top-level `{...}` spans in the text, in order.
fn top_level_spans(text: &str) -> Vec<(usize, usize)> {
  let bytes = text.as_bytes();
  let mut out = Vec::new();
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i] == b'{' {
      match balanced_object_end(bytes, i) {
        Some(end) => {
          out.push((i, end));
          i = end;
        }
        None => break, // unterminated span reaches end of text
      }
    } else {
      i += 1;
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  const STORY: &str = r#"{"title":"The Fox","sentences":[{"english":"A fox ran.","korean":"여우가 달렸다.","targetWordEnglish":"fox","targetWordKorean":"여우"}]}"#;

  #[test]
  fn valid_json_is_returned_unchanged_modulo_trim() {
    let input = format!("  \n{STORY}\n ");
    assert_eq!(extract_story_json(&input), Extraction::Parsed(STORY.to_string()));
  }

  #[test]
  fn fenced_json_between_prose_is_extracted_exactly() {
    let input = format!("Here is your story!\n```json\n{STORY}\n```\nEnjoy studying.");
    assert_eq!(extract_story_json(&input), Extraction::Parsed(STORY.to_string()));
  }

  #[test]
  fn fence_without_language_tag_is_stripped() {
    let input = format!("```\n{STORY}\n```");
    assert_eq!(extract_story_json(&input), Extraction::Parsed(STORY.to_string()));
  }

  #[test]
  fn rightmost_candidate_wins_over_echoed_schema_example() {
    let example = r#"{"title":"string","sentences":[]}"#;
    let input = format!("The schema looks like {example} and the answer is {STORY}");
    // the echoed example has an empty sentences array but still parses; the
    // later real document must be preferred
    assert_eq!(extract_story_json(&input), Extraction::Parsed(STORY.to_string()));
  }

  #[test]
  fn keys_inside_strings_do_not_confuse_the_scanner() {
    let tricky = r#"{"title":"Braces } and { quotes \"","sentences":[{"english":"ok","korean":"네","targetWordEnglish":"ok","targetWordKorean":"네"}]}"#;
    let input = format!("prose {tricky} prose");
    assert_eq!(extract_story_json(&input), Extraction::Parsed(tricky.to_string()));
  }

  #[test]
  fn unparseable_keyed_span_is_forwarded_as_candidate() {
    let broken = r#"{"title":"T","sentences":[{"english":"a",}]}"#;
    let input = format!("answer: {broken} thanks");
    assert_eq!(extract_story_json(&input), Extraction::Candidate(broken.to_string()));
  }

  #[test]
  fn no_object_span_degrades_to_trimmed_raw_text() {
    let input = "  Sorry, I could not generate a story today.  ";
    assert_eq!(
      extract_story_json(input),
      Extraction::Exhausted("Sorry, I could not generate a story today.".to_string())
    );
  }

  #[test]
  fn truncated_document_falls_through_for_repair() {
    // no balanced span exists, so the whole trimmed text goes to repair
    let truncated = r#"{"title":"T","sentences":[{"english":"A fox"#;
    assert_eq!(
      extract_story_json(truncated),
      Extraction::Exhausted(truncated.to_string())
    );
  }
}
