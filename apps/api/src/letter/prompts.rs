// All LLM prompt constants for the cover letter pipeline.
// Templates use `{placeholder}` substitution; replace every placeholder
// before sending.

/// Skill extraction prompt.
/// Replace: {job_description}, {resume_content}
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract the 3-4 most important technical skills or qualifications required that have strong relation to the resume provided:

Job Description:
{job_description}

Resume information:
{resume_content}

Return only a list of skills, one per line, without bullet points or numbers. Do not exceed 4 words per skill, this is a hard limit.
Focus on specific technical skills, tools, or qualifications mentioned in the job description; verbatim qualifications from the JD are better.
Examples might look like: strong Python programming experience, exceptional communication skills, excellent data communication."#;

/// Bullet generation prompt.
/// Replace: {resume_content}, {skills}, {job_description_context}
pub const BULLET_GENERATION_PROMPT_TEMPLATE: &str = r#"Based on the resume content below and the required skills, generate a corresponding number of compelling bullet points for a cover letter.
Each bullet point should:
1. Highlight relevant experience from the resume; do not make anything else up.
2. Be associated with each of the skills provided, in the same order. No doubling up on one skill.
3. Be specific and quantifiable when possible.
4. Be written in first person.
5. Start with an action verb, past tense.
6. Contain no long em dashes, and do not precede the skill with a dash.
7. Use backslashes for % signs or other LaTeX-special characters.
8. Never use 'my' or personal pronouns within the response.

Resume Content:
{resume_content}

Required Skills:
{skills}

Job Description Context:
{job_description_context}...

Generate bullet points that demonstrate how the candidate's background aligns with the job requirements:"#;
