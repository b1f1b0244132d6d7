// Resume analysis prompt templates.

pub const RESUME_ANALYSIS_PERSONA: &str =
    "You are an expert ATS (Applicant Tracking System) analyzer and career coach.";

pub const RESUME_ANALYSIS_PROMPT: &str = r#"Analyze this resume thoroughly for the role: {target_role}.

Resume Text:
"""
{resume_text}
"""

Return ONLY a JSON object with this exact structure:
{
  "overallScore": 0-100,
  "atsCompatibility": 0-100,
  "sections": {
    "contact": { "score": 0-100, "feedback": "string" },
    "experience": { "score": 0-100, "feedback": "string" },
    "education": { "score": 0-100, "feedback": "string" },
    "skills": { "score": 0-100, "feedback": "string" },
    "projects": { "score": 0-100, "feedback": "string" },
    "formatting": { "score": 0-100, "feedback": "string" }
  },
  "keywords": ["keywords found in the resume"],
  "missingKeywords": ["keywords expected for the role but absent"],
  "strengths": ["string"],
  "improvements": ["string"]
}

RULES:
1. Scores are integers between 0 and 100.
2. Judge keywords against the target role, not against the resume alone.
3. Improvements must be concrete and actionable."#;
