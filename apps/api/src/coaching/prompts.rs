// Coaching prompt templates.

pub const COVER_LETTER_PERSONA: &str = "You are a professional cover letter writer.";

pub const COVER_LETTER_PROMPT: &str = r#"Write a professional cover letter for the {position} position at {company}.

Resume highlights:
"""
{resume_text}
"""

Job Description:
"""
{job_description}
"""

Return ONLY a JSON object with this structure:
{
  "coverLetter": "Dear Hiring Manager,\n\n...full letter...\n\nSincerely,\n[Name]",
  "matchScore": 0-100,
  "highlightedSkills": ["skills from the resume that match the job"],
  "tips": ["how to personalize the letter further"]
}

RULES:
1. Only claim experience that appears in the resume highlights.
2. Keep the letter under 400 words."#;

pub const SKILL_GAP_PERSONA: &str = "You are a career advisor.";

pub const SKILL_GAP_PROMPT: &str = r#"Analyze the skill gap for someone targeting a {target_role} role.

Current Skills: {skills}

Return ONLY a JSON object with this structure:
{
  "matchPercentage": 0-100,
  "strongSkills": ["current skills that matter for the role"],
  "missingCritical": ["skills the role requires that are missing"],
  "missingNiceToHave": ["helpful but optional skills that are missing"],
  "learningPath": [
    {
      "skill": "string",
      "priority": "high" | "medium" | "low",
      "estimatedTime": "e.g. 2 weeks",
      "resources": ["book, course or documentation"]
    }
  ],
  "roadmap": "a short paragraph ordering the learning path"
}"#;
