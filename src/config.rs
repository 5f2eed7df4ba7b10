//! Loading prompt configuration from TOML.
//!
//! See `AgentConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AgentConfig {
  #[serde(default)]
  pub prompts: Prompts,
}

/// Prompts used by the generative client. Defaults mirror the production
/// story prompt; override them in TOML to tune tone or level.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub story_system: String,
  pub story_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      story_system: "You are a story generator for English learners. Respond ONLY with a strict JSON object, no prose and no markdown fences.".into(),
      story_user_template: concat!(
        "Generate a short story (5-7 sentences) about \"{topic}\". ",
        "The story should be simple, suitable for an English learner (CEFR B1 level). ",
        "For each sentence, identify ONE key vocabulary word to test.\n\n",
        "Return a JSON object with:\n",
        "- title: Story title\n",
        "- sentences: Array of objects, each containing:\n",
        "  - english: Full English sentence.\n",
        "  - korean: Full Korean translation.\n",
        "  - targetWordEnglish: The key word from the English sentence (exactly as written in the english sentence).\n",
        "  - targetWordKorean: The corresponding Korean translation of that specific key word (exactly as written in the korean sentence).\n",
      )
      .into(),
    }
  }
}

/// Attempt to load `AgentConfig` from AGENT_CONFIG_PATH. On any parsing/IO
/// error, returns None and the defaults apply.
pub fn load_agent_config_from_env() -> Option<AgentConfig> {
  let path = std::env::var("AGENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AgentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "wordtale", %path, "Loaded agent config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "wordtale", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "wordtale", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prompts_override_from_toml() {
    let cfg: AgentConfig = toml::from_str(
      r#"
        [prompts]
        story_system = "sys"
        story_user_template = "story about {topic}"
      "#,
    )
    .expect("toml");
    assert_eq!(cfg.prompts.story_system, "sys");
    assert_eq!(cfg.prompts.story_user_template, "story about {topic}");
  }

  #[test]
  fn default_template_mentions_required_fields() {
    let p = Prompts::default();
    for key in ["title", "english", "korean", "targetWordEnglish", "targetWordKorean"] {
      assert!(p.story_user_template.contains(key), "missing {key}");
    }
  }
}
