// All LLM prompt constants for the Tailoring module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for listing analysis: keyword identification and job summaries.
pub const LISTING_ANALYSIS_SYSTEM: &str = "You are an expert technical recruiter. \
    You read bullet points scraped from job listings and distil what the employer wants. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Keyword identification prompt. Replace `{bullets}` before sending.
pub const KEYWORDS_PROMPT_TEMPLATE: &str = r#"Below are the bullet points extracted from a job listing. Identify the key skills and requirements mentioned in the job description.

Bullet Points:
{bullets}

Return a JSON object with this EXACT schema:
{
  "key_skills": ["skill1", "skill2"],
  "requirements": ["requirement1", "requirement2"]
}"#;

/// Job summary prompt. Replace `{job_url}` and `{bullets}` before sending.
pub const JOB_SUMMARY_PROMPT_TEMPLATE: &str = r#"Below are the bullet points extracted from the job listing at {job_url}.

Bullet Points:
{bullets}

Summarise the listing. Infer the company name and job title from the URL and bullets when they are stated; otherwise leave them empty.

Return a JSON object with this EXACT schema:
{
  "company_name": "string",
  "job_title": "string",
  "summary": "two or three sentences describing the role",
  "key_skills": ["skill1", "skill2"],
  "key_requirements": ["requirement1", "requirement2"]
}"#;

/// System prompt for turning extracted PDF text into a profile.
pub const RESUME_PARSE_SYSTEM: &str = "You extract structured data from résumés. \
    Be very careful to only extract data that is present in the résumé. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Résumé parsing prompt. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the data from the résumé text below.

Résumé Text:
{resume_text}

Return a JSON object with this EXACT schema:
{
  "name": "string",
  "job_role": "current job role or title",
  "address": "string",
  "email_address": "string",
  "phone_number": "string",
  "professional_experience": [
    {
      "company_name": "string",
      "job_title": "string",
      "job_bullets": ["string"],
      "job_location": "string",
      "job_date_range": "e.g. Jan 2021 - Mar 2023"
    }
  ],
  "education": {
    "college_name": "string",
    "degree": "string",
    "date_range": "string",
    "gpa": 3.7
  },
  "extra_curriculars": [
    { "activity_name": "string", "date_range": "string", "description": "string" }
  ],
  "technical_skills": ["string"],
  "tools_and_technologies": ["string"]
}

Use null for an unknown GPA."#;

/// System prompt for résumé rewriting.
pub const REWRITE_SYSTEM: &str = "You are an expert résumé optimiser with deep knowledge of \
    applicant tracking systems and hiring practices. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Résumé rewrite prompt. Placeholders: `{company_name}`, `{job_title}`, `{summary}`,
/// `{key_skills}`, `{key_requirements}`, `{experience}`, `{extra_curriculars}`,
/// `{technical_skills}`, `{tools_and_technologies}`, `{bullet_counts}`.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Analyse the job listing and the candidate's résumé, then produce an optimised version that:
1. Aligns the candidate's experience with the job requirements
2. Incorporates relevant keywords to pass ATS screening
3. Quantifies achievements where the original supports it
4. Highlights transferable skills that match the job

Guidelines:
- Only enhance existing experience, never fabricate
- Use action verbs and keep every bullet concise
- Match keywords from the job description naturally
- Prioritise recent and relevant experience
- Keep the experiences in the same order with the same company, title, location and dates
- The number of bullets per experience MUST be exactly: {bullet_counts}

Job Details:
- company_name: {company_name}
- job_title: {job_title}
- summary: {summary}
- key_skills: {key_skills}
- key_requirements: {key_requirements}

Candidate's Current Résumé:
Professional Experience: {experience}
Extra Curriculars: {extra_curriculars}
Technical Skills: {technical_skills}
Tools and Technologies: {tools_and_technologies}

Return a JSON object with this EXACT schema:
{
  "professional_experience": [
    {
      "company_name": "string",
      "job_title": "string",
      "job_bullets": ["string"],
      "job_location": "string",
      "job_date_range": "string"
    }
  ],
  "extra_curriculars": [
    { "activity_name": "string", "date_range": "string", "description": "string" }
  ],
  "technical_skills": ["string"],
  "tools_and_technologies": ["string"]
}"#;

/// Appended to a retry after the model changed the bullet layout.
pub const BULLET_COUNT_CORRECTION: &str = "\n\nYour previous answer changed the number of bullets. \
    Return exactly {bullet_counts} bullets per experience, in the original order.";
