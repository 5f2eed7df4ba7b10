//! Built-in preset stories.
//!
//! These guarantee the trainer is useful without an API key. They are
//! compiled in; loading story catalogs from files is a presentation-layer
//! concern and stays out of this crate.

use crate::domain::{PartOfSpeech, Sentence, StoryDocument};

fn sentence(
  english: &str,
  korean: &str,
  target_en: &str,
  target_ko: &str,
  pos: PartOfSpeech,
) -> Sentence {
  Sentence {
    english: english.into(),
    korean: korean.into(),
    target_word_english: target_en.into(),
    target_word_korean: target_ko.into(),
    part_of_speech: Some(pos),
    wrong_answers: None,
  }
}

/// Minimal set of preset stories served when generation is unavailable.
pub fn seed_stories() -> Vec<StoryDocument> {
  vec![
    StoryDocument {
      title: "The Green Frog".into(),
      sentences: vec![
        sentence(
          "The little frog never listened to his mother.",
          "아기 개구리는 엄마의 말을 전혀 듣지 않았어요.",
          "listened",
          "듣지",
          PartOfSpeech::Verb,
        ),
        sentence(
          "His mother asked him to live by the quiet river.",
          "엄마는 그에게 조용한 강가에서 살라고 부탁했어요.",
          "river",
          "강가",
          PartOfSpeech::Noun,
        ),
        sentence(
          "The rain fell hard on the sad frog.",
          "비가 슬픈 개구리 위로 세차게 내렸어요.",
          "rain",
          "비",
          PartOfSpeech::Noun,
        ),
        sentence(
          "He finally understood her love.",
          "그는 마침내 엄마의 사랑을 이해했어요.",
          "understood",
          "이해했어요",
          PartOfSpeech::Verb,
        ),
      ],
    },
    StoryDocument {
      title: "The Sun and the Moon".into(),
      sentences: vec![
        sentence(
          "A tiger chased the brother and sister up a tall tree.",
          "호랑이가 오빠와 여동생을 큰 나무 위로 쫓아갔어요.",
          "tiger",
          "호랑이",
          PartOfSpeech::Noun,
        ),
        sentence(
          "They prayed for a strong rope from the sky.",
          "그들은 하늘에서 튼튼한 밧줄을 내려 달라고 기도했어요.",
          "rope",
          "밧줄",
          PartOfSpeech::Noun,
        ),
        sentence(
          "The brother became the bright moon.",
          "오빠는 밝은 달이 되었어요.",
          "bright",
          "밝은",
          PartOfSpeech::Adjective,
        ),
        sentence(
          "The sister slowly turned into the warm sun.",
          "여동생은 천천히 따뜻한 해가 되었어요.",
          "slowly",
          "천천히",
          PartOfSpeech::Adverb,
        ),
      ],
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::order::tokenize;

  #[test]
  fn seed_stories_satisfy_the_document_invariants() {
    for story in seed_stories() {
      assert!(!story.title.trim().is_empty());
      assert!(!story.sentences.is_empty());
      for s in &story.sentences {
        assert!(!s.english.trim().is_empty());
        assert!(!s.korean.trim().is_empty());
        assert!(!s.target_word_english.trim().is_empty());
        assert!(!s.target_word_korean.trim().is_empty());
      }
    }
  }

  #[test]
  fn seed_target_words_appear_in_their_sentences() {
    for story in seed_stories() {
      for s in &story.sentences {
        let en = s.english.to_lowercase();
        assert!(
          en.contains(&s.target_word_english.to_lowercase()),
          "'{}' missing from '{}'",
          s.target_word_english,
          s.english
        );
        assert!(
          s.korean.contains(&s.target_word_korean),
          "'{}' missing from '{}'",
          s.target_word_korean,
          s.korean
        );
      }
    }
  }

  #[test]
  fn seed_sentences_tokenize_non_empty() {
    for story in seed_stories() {
      for s in &story.sentences {
        assert!(tokenize(&s.english).len() >= 2);
      }
    }
  }
}
