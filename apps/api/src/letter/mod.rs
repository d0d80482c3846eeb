// Cover letter pipeline: section extraction, skill/bullet generation,
// LaTeX rendering, pdflatex compilation.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod bullets;
pub mod compiler;
pub mod handlers;
pub mod prompts;
pub mod sections;
pub mod skills;
pub mod template;

/// Where the content of an LLM-backed step came from.
///
/// `Mock` means no credential was configured and the call was skipped;
/// `Fallback` means the call was attempted and failed. Both carry fixed
/// deterministic content and neither is an error from the caller's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Model,
    Mock,
    Fallback,
}
