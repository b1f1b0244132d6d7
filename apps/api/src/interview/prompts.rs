// Interview prompt templates.

pub const QUESTIONS_PERSONA: &str = "You are a senior technical interviewer.";

pub const QUESTIONS_PROMPT: &str = r#"Generate exactly {count} {difficulty}-level {interview_type} interview questions for a {role} position.

Return ONLY a JSON array with this structure:
[
  {
    "question": "the question as you would ask it",
    "idealAnswer": "what a strong candidate would say, in 3-6 sentences",
    "keyPoints": ["point the answer should cover"]
  }
]

RULES:
1. Generate exactly {count} questions, no duplicates.
2. "mixed" means a blend of technical and behavioral questions.
3. "system-design" questions must be open-ended design problems."#;

pub const EVALUATION_PERSONA: &str = "You are a senior interviewer evaluating a candidate.";

pub const EVALUATION_PROMPT: &str = r#"Evaluate this interview answer for a {role} role.

Question: "{question}"
Candidate Answer: "{answer}"

Return ONLY a JSON object with this structure:
{
  "score": 0-100,
  "feedback": "two or three sentences of direct feedback",
  "strengths": ["string"],
  "improvements": ["string"],
  "idealAnswer": "a model answer to the question"
}

RULES:
1. Score 0 only for empty or entirely off-topic answers.
2. Be specific: quote or reference what the candidate actually said."#;
