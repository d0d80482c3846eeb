//! Bullet generation — one grounded, first-person bullet per extracted skill.
//!
//! Same degradation contract as skill extraction: mock content without a
//! credential, fallback content on any API failure, never an error.

use tracing::{error, info};

use crate::letter::prompts::BULLET_GENERATION_PROMPT_TEMPLATE;
use crate::letter::ContentSource;
use crate::llm_client::LlmClient;

/// Upper bound on bullets parsed out of a model response.
pub const MAX_BULLETS: usize = 4;

/// Only this many leading characters of the job description are sent as
/// context, to bound prompt size.
const JD_CONTEXT_CHARS: usize = 500;

/// Deterministic bullets used when no API key is configured.
pub const MOCK_BULLETS: [&str; 4] = [
    "I developed and maintained Python applications serving 10,000+ users daily, demonstrating strong Python programming skills",
    "I led a team of 4 developers in implementing microservices architecture using Docker and Kubernetes, directly matching your requirements",
    "I improved system performance by 40% through database optimization including PostgreSQL, aligning with your database needs",
    "I built REST APIs using FastAPI handling 1M+ requests per day, showcasing experience with large-scale distributed systems",
];

/// Generic bullets substituted when the API call fails.
pub const FALLBACK_BULLETS: [&str; 3] = [
    "I bring strong technical expertise relevant to this position",
    "My experience aligns well with your team's requirements",
    "I have successfully delivered projects using similar technologies",
];

/// Result of bullet generation, tagged with where the content came from.
#[derive(Debug, Clone)]
pub struct BulletGeneration {
    pub bullets: Vec<String>,
    pub source: ContentSource,
}

/// Generates one cover-letter bullet per skill. Infallible by contract.
pub async fn generate_bullets(
    llm: &LlmClient,
    resume_content: &str,
    skills: &[String],
    job_description: &str,
) -> BulletGeneration {
    if !llm.has_credential() {
        info!("No API key configured — using mock bullet generation");
        return BulletGeneration {
            bullets: MOCK_BULLETS.iter().map(|s| s.to_string()).collect(),
            source: ContentSource::Mock,
        };
    }

    let jd_context: String = job_description.chars().take(JD_CONTEXT_CHARS).collect();
    let prompt = BULLET_GENERATION_PROMPT_TEMPLATE
        .replace("{resume_content}", resume_content)
        .replace("{skills}", &skills.join(", "))
        .replace("{job_description_context}", &jd_context);

    match llm.complete(&prompt).await {
        Ok(text) => BulletGeneration {
            bullets: parse_bullet_lines(&text),
            source: ContentSource::Model,
        },
        Err(e) => {
            error!("Error generating bullet points: {e}");
            BulletGeneration {
                bullets: FALLBACK_BULLETS.iter().map(|s| s.to_string()).collect(),
                source: ContentSource::Fallback,
            }
        }
    }
}

/// Splits a model response into bullets: one per line, trimmed, empties and
/// `#` heading lines dropped, capped at [`MAX_BULLETS`].
fn parse_bullet_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(MAX_BULLETS)
        .map(str::to_string)
        .collect()
}
