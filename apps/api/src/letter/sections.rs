//! Section extraction — pulls the useful résumé content out of the uploaded
//! LaTeX source before it goes anywhere near a prompt.
//!
//! Only a fixed set of `rSection` blocks is recognized; everything else
//! (preamble, header, education) stays out of the token budget.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Fixed sentinel returned when no recognized section is present.
/// Absence is a valid state — downstream steps still run against it.
pub const NO_SECTIONS_FOUND: &str = "No EMPLOYMENT HISTORY or PROJECTS found in resume.";

/// Recognized résumé section blocks, matched case-insensitively across lines.
static SECTION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\\begin\{rSection\}\{EMPLOYMENT HISTORY\}(.*?)\\end\{rSection\}",
        r"\\begin\{rSection\}\{PROJECTS\}(.*?)\\end\{rSection\}",
        r"\\begin\{rSection\}\{Athletics\}(.*?)\\end\{rSection\}",
    ]
    .iter()
    .map(|pattern| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .expect("section pattern must compile")
    })
    .collect()
});

/// `\cmd{...}` — a formatting command with an argument.
static COMMAND_WITH_ARG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\{.*?\}").expect("command pattern must compile"));

/// `\cmd` — a bare formatting command.
static BARE_COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+").expect("command pattern must compile"));

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

/// Extracts the recognized sections from raw résumé LaTeX, strips formatting
/// commands, and collapses whitespace. Never fails: if nothing matches, the
/// fixed [`NO_SECTIONS_FOUND`] sentinel is returned.
pub fn extract_sections(resume_source: &str) -> String {
    let mut extracted = Vec::new();

    for pattern in SECTION_RES.iter() {
        if let Some(captures) = pattern.captures(resume_source) {
            let body = captures.get(1).map(|m| m.as_str()).unwrap_or("").trim();
            // A matched-but-empty section still counts as found; the
            // sentinel means no pattern matched at all.
            extracted.push(clean_latex(body));
        }
    }

    if extracted.is_empty() {
        return NO_SECTIONS_FOUND.to_string();
    }

    extracted.join("\n\n")
}

/// Removes LaTeX formatting commands and normalizes whitespace.
fn clean_latex(text: &str) -> String {
    let text = COMMAND_WITH_ARG_RE.replace_all(text, "");
    let text = BARE_COMMAND_RE.replace_all(&text, "");
    WHITESPACE_RUN_RE.replace_all(&text, " ").trim().to_string()
}
