//! Skill extraction — asks the LLM for the 3-4 skills most relevant to both
//! the résumé and the job description.
//!
//! This step never fails: without a credential it short-circuits to a fixed
//! mock list, and any API failure degrades to a fixed fallback list. The
//! caller can tell which path was taken via [`ContentSource`].

use tracing::{error, info};

use crate::letter::prompts::SKILL_EXTRACTION_PROMPT_TEMPLATE;
use crate::letter::ContentSource;
use crate::llm_client::LlmClient;

/// Upper bound on skills parsed out of a model response.
pub const MAX_SKILLS: usize = 4;

/// Deterministic skill list used when no API key is configured.
/// Intentionally 5 entries: the cap applies to parsed model output only,
/// and the renderer's pairing policy drops the excess.
pub const MOCK_SKILLS: [&str; 5] = [
    "Python",
    "Kubernetes",
    "Microservices",
    "PostgreSQL",
    "Cloud Platforms",
];

/// Generic skills substituted when the API call fails.
pub const FALLBACK_SKILLS: [&str; 3] = ["Python", "Problem Solving", "Communication"];

/// Result of skill extraction, tagged with where the content came from.
#[derive(Debug, Clone)]
pub struct SkillExtraction {
    pub skills: Vec<String>,
    pub source: ContentSource,
}

/// Extracts skills relevant to both texts. Infallible by contract:
/// API failures are logged and absorbed into fallback content.
pub async fn extract_skills(
    llm: &LlmClient,
    resume_content: &str,
    job_description: &str,
) -> SkillExtraction {
    if !llm.has_credential() {
        info!("No API key configured — using mock skill extraction");
        return SkillExtraction {
            skills: MOCK_SKILLS.iter().map(|s| s.to_string()).collect(),
            source: ContentSource::Mock,
        };
    }

    let prompt = SKILL_EXTRACTION_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_content}", resume_content);

    match llm.complete(&prompt).await {
        Ok(text) => SkillExtraction {
            skills: parse_skill_lines(&text),
            source: ContentSource::Model,
        },
        Err(e) => {
            error!("Error extracting skills: {e}");
            SkillExtraction {
                skills: FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect(),
                source: ContentSource::Fallback,
            }
        }
    }
}

/// Splits a model response into skill phrases: one per line, trimmed,
/// empties dropped, capped at [`MAX_SKILLS`].
fn parse_skill_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_SKILLS)
        .map(str::to_string)
        .collect()
}
