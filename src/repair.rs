//! Recovering a parseable story document from malformed or truncated JSON.
//!
//! Repair never invents field values. It only cuts: either at a point where
//! the top-level object already closed (trailing garbage) or at the latest
//! complete element before a truncation point, closing the containers that
//! were still open. If no cut parses, the attempt is fatal.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::StoryError;

/// Leniently-typed story as it appears on the wire. Every field is optional
/// at this stage; the validator decides what is actually required.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStory {
  pub title: String,
  pub sentences: Vec<RawSentence>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSentence {
  pub english: String,
  pub korean: String,
  pub target_word_english: String,
  pub target_word_korean: String,
  pub part_of_speech: Option<String>,
  pub wrong_answers: Option<Vec<String>>,
}

/// Parse the candidate text, repairing by shortening when the direct parse
/// fails. Fatal `MalformedResponse` when nothing recoverable remains.
pub fn parse_or_repair(text: &str) -> Result<RawStory, StoryError> {
  let first_err = match serde_json::from_str::<RawStory>(text) {
    Ok(story) => return Ok(story),
    Err(e) => e,
  };

  let scan = scan_cuts(text);

  // Earliest complete top-level object wins: the most conservative cut,
  // which drops trailing garbage without touching the document itself.
  for &cut in &scan.depth_zero_cuts {
    if let Ok(story) = serde_json::from_str::<RawStory>(&text[..cut]) {
      debug!(target: "story", cut, total = text.len(), "repaired by cutting trailing garbage");
      return Ok(story);
    }
  }

  // Truncation recovery: cut at the latest container close and append the
  // closers for whatever is still open, walking backwards until a prefix
  // parses. Structural closers only; no field values are fabricated.
  for (pos, closers) in scan.close_cuts.iter().rev() {
    if closers.is_empty() {
      continue; // already tried as a depth-zero cut
    }
    let candidate = format!("{}{}", &text[..*pos], closers);
    if let Ok(story) = serde_json::from_str::<RawStory>(&candidate) {
      warn!(target: "story", cut = pos, total = text.len(), "recovered truncated response by closing open containers");
      return Ok(story);
    }
  }

  Err(StoryError::MalformedResponse {
    source: first_err,
    truncated: scan.ended_open,
  })
}

struct CutScan {
  /// Exclusive prefix ends where the top-level object closed.
  depth_zero_cuts: Vec<usize>,
  /// Exclusive prefix ends just after any `}` or `]`, paired with the
  /// closing delimiters still required at that point.
  close_cuts: Vec<(usize, String)>,
  /// Scan finished inside a string or with open containers, i.e. the text
  /// looks cut off rather than merely malformed.
  ended_open: bool,
}

fn scan_cuts(text: &str) -> CutScan {
  let bytes = text.as_bytes();
  let mut stack: Vec<u8> = Vec::new();
  let mut in_string = false;
  let mut escape = false;
  let mut depth_zero_cuts = Vec::new();
  let mut close_cuts = Vec::new();

  for (i, &b) in bytes.iter().enumerate() {
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
      b'{' | b'[' => stack.push(b),
      b'}' | b']' => {
        let expected = if b == b'}' { b'{' } else { b'[' };
        if stack.pop() != Some(expected) {
          // mismatched close; everything past here is garbage
          break;
        }
        close_cuts.push((i + 1, closers_for(&stack)));
        if stack.is_empty() {
          depth_zero_cuts.push(i + 1);
        }
      }
      _ => {}
    }
  }

  CutScan {
    depth_zero_cuts,
    close_cuts,
    ended_open: in_string || !stack.is_empty(),
  }
}

fn closers_for(stack: &[u8]) -> String {
  stack
    .iter()
    .rev()
    .map(|&b| if b == b'{' { '}' } else { ']' })
    .collect()
}
