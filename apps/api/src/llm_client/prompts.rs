// Shared prompt constants and prompt-building utilities.
// Each feature module that needs LLM calls defines its own prompts.rs alongside it.

/// Appended to every system prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Always respond with valid JSON only. \
    Do NOT use markdown code fences. \
    Do NOT include any text outside the JSON value.";

/// Builds a system prompt from a persona line plus the JSON-only rule.
pub fn json_system(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_INSTRUCTION}")
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Fills `{key}` placeholders in one pass over the template. Substituted
/// values are never rescanned, so user text containing `{key}` stays literal.
/// Braces that do not name a known key (JSON examples) are kept as is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let matched = values.iter().find(|(key, _)| {
            tail.strip_prefix(*key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
