//! Cover letter rendering — pure string assembly, no I/O.
//!
//! Skills and bullets are paired by index; the pairing stops at the shorter
//! list, silently dropping the excess. Caller-supplied free text (company,
//! role, source, contact fields) is interpolated without LaTeX escaping —
//! a known gap kept to match the existing behavior.

use std::sync::LazyLock;

use regex::Regex;

/// Fixed sender identity embedded in the letter header and signature.
const SENDER_NAME: &str = "Mike Rabayda";

/// Stopwords that stay lowercase inside a skill phrase (unless first).
const STOPWORDS: [&str; 11] = [
    "and", "or", "of", "in", "on", "for", "with", "to", "a", "an", "the",
];

static NON_ALNUM_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("sanitizer pattern must compile"));

/// Placeholders substituted in one pass over the template, so substituted
/// values are never themselves scanned for placeholders.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\{(sender_name|your_email|your_phone|company|role|source|skills_prose|bullet_items)\}",
    )
    .expect("placeholder pattern must compile")
});

/// Free-text form fields interpolated into the letter.
#[derive(Debug, Clone)]
pub struct LetterFields {
    pub your_email: String,
    pub your_phone: String,
    pub company: String,
    pub role: String,
    pub source: String,
}

/// Fixed LaTeX skeleton. Placeholders are substituted literally; the static
/// body paragraphs are part of the template, not caller input.
const COVER_LETTER_TEMPLATE: &str = r#"\documentclass[11pt,letterpaper]{article}
\usepackage[margin=1in]{geometry}
\usepackage{enumitem}
\usepackage{parskip}

\begin{document}
\pagestyle{empty}
\noindent
{\LARGE \textbf{{sender_name}}} \\
{your_email} \\
{your_phone} \\
\today

\vspace{2em}

\noindent
To the {company} Hiring Committee,

My name is {sender_name}, and I am currently a M.S. Data Science student at Fordham University in New York, NY.  I recently came across your position for {company}'s {role} position from {source}, and I would like to state my candidacy for the position.

Your position calls for {skills_prose}.  I can offer the following qualifications to you:

\begin{itemize}[leftmargin=*]
{bullet_items}
\end{itemize}

In addition to providing you with the skills that you require, it has also been commonplace for me to work with many different personalities, and sometimes under difficult circumstances. Each has taught me the importance of being a team player, and drove me into positions of leadership. Furthermore, I am comfortable working independently and as part of a team. In addition to bringing you a strong skillset, I also bring interpersonal skills that would fit well with your team and clients.

Thank you for your time and consideration, I will contact you within two weeks' time to follow up on my candidacy. Should you need to reach me before then, please do not hesitate. I look forward to hearing back from you.

\vspace{1em}

\noindent
Sincerely, \\
{sender_name} \\

Enclosed: Resume

\end{document}
"#;

/// Capitalizes a skill phrase for display in the bullet list.
///
/// Tokens that are fully uppercase, or carry an uppercase letter past the
/// first character, are treated as acronyms or stylized terms and preserved
/// verbatim. Stopwords stay lowercase unless they open the phrase.
pub fn smart_capitalize(skill: &str) -> String {
    skill
        .split(' ')
        .filter(|w| !w.is_empty())
        .enumerate()
        .map(|(i, word)| {
            let is_acronym = word.chars().any(char::is_uppercase)
                && !word.chars().any(char::is_lowercase);
            let is_stylized = is_acronym || word.chars().skip(1).any(char::is_uppercase);
            if is_stylized {
                word.to_string()
            } else if i != 0 && STOPWORDS.contains(&word.to_lowercase().as_str()) {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First char uppercased, rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Joins skills into prose with Oxford-comma conjunction rules.
pub fn join_skills(skills: &[String]) -> String {
    match skills {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Renders the complete LaTeX source for a cover letter.
pub fn render_cover_letter(fields: &LetterFields, skills: &[String], bullets: &[String]) -> String {
    let bullet_items = skills
        .iter()
        .zip(bullets.iter())
        .map(|(skill, bullet)| format!("\\item \\textbf{{{}}} {bullet}", smart_capitalize(skill)))
        .collect::<Vec<_>>()
        .join("\n");

    let skills_prose = join_skills(skills);

    PLACEHOLDER_RE
        .replace_all(COVER_LETTER_TEMPLATE, |caps: &regex::Captures| {
            match &caps[1] {
                "sender_name" => SENDER_NAME,
                "your_email" => &fields.your_email,
                "your_phone" => &fields.your_phone,
                "company" => &fields.company,
                "role" => &fields.role,
                "source" => &fields.source,
                "skills_prose" => &skills_prose,
                "bullet_items" => &bullet_items,
                _ => unreachable!("pattern only matches known placeholders"),
            }
            .to_string()
        })
        .into_owned()
}

/// Replaces every run of non-alphanumeric characters with a single
/// underscore. Used for the human-readable download filename.
pub fn sanitize_filename_part(part: &str) -> String {
    NON_ALNUM_RUN_RE.replace_all(part, "_").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> LetterFields {
        LetterFields {
            your_email: "a@b.com".to_string(),
            your_phone: "555-0100".to_string(),
            company: "Acme".to_string(),
            role: "Data Engineer".to_string(),
            source: "LinkedIn".to_string(),
        }
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_smart_capitalize_plain_words() {
        assert_eq!(smart_capitalize("cloud platforms"), "Cloud Platforms");
    }

    #[test]
    fn test_smart_capitalize_preserves_stylized_terms() {
        assert_eq!(smart_capitalize("CI/CD"), "CI/CD");
        assert_eq!(smart_capitalize("PostgreSQL experience"), "PostgreSQL Experience");
        assert_eq!(smart_capitalize("SQL"), "SQL");
    }

    #[test]
    fn test_smart_capitalize_lowercases_inner_stopwords() {
        assert_eq!(smart_capitalize("use of Docker"), "Use of Docker");
    }

    #[test]
    fn test_smart_capitalize_stopword_first_is_capitalized() {
        assert_eq!(smart_capitalize("the cloud"), "The Cloud");
    }

    #[test]
    fn test_join_skills_one() {
        assert_eq!(join_skills(&owned(&["A"])), "A");
    }

    #[test]
    fn test_join_skills_two_without_comma() {
        assert_eq!(join_skills(&owned(&["A", "B"])), "A and B");
    }

    #[test]
    fn test_join_skills_oxford_comma() {
        assert_eq!(join_skills(&owned(&["A", "B", "C"])), "A, B, and C");
        assert_eq!(join_skills(&owned(&["A", "B", "C", "D"])), "A, B, C, and D");
    }

    #[test]
    fn test_pairing_stops_at_shorter_list() {
        let skills = owned(&["s1", "s2", "s3", "s4", "s5"]);
        let bullets = owned(&["b1", "b2", "b3"]);
        let latex = render_cover_letter(&fields(), &skills, &bullets);
        assert_eq!(latex.matches("\\item").count(), 3);
        assert!(!latex.contains("b4"));
        assert!(!latex.contains("S4"));
    }

    #[test]
    fn test_render_embeds_fields_and_skill_prose() {
        let latex = render_cover_letter(
            &fields(),
            &owned(&["python", "communication"]),
            &owned(&["I shipped things", "I wrote docs"]),
        );
        assert!(latex.contains("To the Acme Hiring Committee,"));
        assert!(latex.contains("Acme's Data Engineer position from LinkedIn"));
        assert!(latex.contains("a@b.com"));
        assert!(latex.contains("555-0100"));
        assert!(latex.contains("python and communication"));
        assert!(latex.contains("\\item \\textbf{Python} I shipped things"));
    }

    #[test]
    fn test_render_leaves_no_placeholders() {
        let latex = render_cover_letter(&fields(), &owned(&["a"]), &owned(&["b"]));
        for placeholder in [
            "{sender_name}",
            "{your_email}",
            "{your_phone}",
            "{company}",
            "{role}",
            "{source}",
            "{skills_prose}",
            "{bullet_items}",
        ] {
            assert!(!latex.contains(placeholder), "unsubstituted {placeholder}");
        }
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        // A field that happens to contain placeholder syntax must come
        // through verbatim, not get a second round of substitution.
        let mut f = fields();
        f.your_email = "see {company} and {role}".to_string();
        let latex = render_cover_letter(&f, &owned(&["a"]), &owned(&["b"]));
        assert!(latex.contains("see {company} and {role}"));
    }

    #[test]
    fn test_render_does_not_escape_caller_text() {
        // Known gap, deliberately preserved: special characters pass through.
        let mut f = fields();
        f.company = "AT&T".to_string();
        let latex = render_cover_letter(&f, &owned(&["a"]), &owned(&["b"]));
        assert!(latex.contains("AT&T"));
    }

    #[test]
    fn test_sanitize_filename_part_collapses_runs() {
        assert_eq!(sanitize_filename_part("Data Engineer / ML"), "Data_Engineer_ML");
        assert_eq!(sanitize_filename_part("Acme, Inc."), "Acme_Inc_");
    }
}
