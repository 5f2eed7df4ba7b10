//! Wordtale CLI.
//!
//! - Generates (or serves a preset) short story for a topic
//! - Derives per-sentence exercises: fill-in-the-blank or word-order
//! - Prints the story and items as JSON for the presentation layer
//!
//! Usage: wordtale [topic] [quiz|order]
//!
//! Important env variables:
//!   GEMINI_API_KEY    : enables generation if present (else presets)
//!   GEMINI_BASE_URL   : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL      : default "gemini-2.0-flash"
//!   AGENT_CONFIG_PATH : path to TOML config (prompt overrides)
//!   GEN_TIMEOUT_SECS  : wall-clock timeout for generation (default 30)
//!   STORY_SEED        : u64 seed for reproducible shuffles
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use wordtale::domain::ExerciseMode;
use wordtale::service::StoryService;
use wordtale::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let mut args = std::env::args().skip(1);
  let topic = args.next().unwrap_or_else(|| "The Little Prince".into());
  let mode = match args.next().as_deref() {
    Some("order") => ExerciseMode::WordOrder,
    _ => ExerciseMode::FillBlank,
  };

  // Seedable so shuffle-dependent output is reproducible on demand.
  let mut rng = match std::env::var("STORY_SEED")
    .ok()
    .and_then(|s| s.parse::<u64>().ok())
  {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let service = StoryService::from_env();
  let (story, source) = service.generate_story(&topic, &mut rng).await?;
  let items = StoryService::derive_exercises(&story, mode, &mut rng);
  info!(target: "wordtale", title = %story.title, items = items.len(), "exercises derived");

  let out = serde_json::json!({
    "source": source,
    "story": story,
    "items": items,
  });
  println!("{}", serde_json::to_string_pretty(&out)?);
  Ok(())
}
