//! Recovery of JSON payloads from model output, plus lenient field decoders
//! for the loosely-typed values models tend to emit.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_json::Value;

use super::LlmError;

const PREVIEW_CHARS: usize = 120;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```").expect("fence regex is valid")
    })
}

/// Extracts a JSON value from model output.
///
/// Tried in order: the whole text, the first fenced code block, the span
/// from the first `{` to the last `}`, the span from the first `[` to the
/// last `]`. The first candidate that parses wins.
pub fn extract_json(text: &str) -> Result<Value, LlmError> {
    let text = text.trim();

    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    if let Some(body) = fence_regex().captures(text).and_then(|c| c.get(1)) {
        if let Ok(value) = serde_json::from_str(body.as_str()) {
            return Ok(value);
        }
    }

    for (open, close) in [('{', '}'), ('[', ']')] {
        if let Some(span) = outer_span(text, open, close) {
            if let Ok(value) = serde_json::from_str(span) {
                return Ok(value);
            }
        }
    }

    Err(LlmError::Unparseable(preview(text)))
}

fn outer_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}

/// Rounds and clamps a raw score into 0..=100.
pub fn normalize_score(raw: f64) -> i32 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as i32
}

/// Decodes a 0..=100 score from an integer, float, numeric string
/// (optionally suffixed with `%`) or null. Anything unreadable becomes 0.
pub fn deserialize_score<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScoreVisitor;

    impl<'de> Visitor<'de> for ScoreVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a score between 0 and 100")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            Ok(normalize_score(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            Ok(normalize_score(v as f64))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
            Ok(normalize_score(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
            Ok(v.trim()
                .trim_end_matches('%')
                .trim()
                .parse::<f64>()
                .map(normalize_score)
                .unwrap_or(0))
        }

        fn visit_none<E: de::Error>(self) -> Result<i32, E> {
            Ok(0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<i32, E> {
            Ok(0)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<i32, D2::Error> {
            d.deserialize_any(ScoreVisitor)
        }
    }

    deserializer.deserialize_any(ScoreVisitor)
}

/// Treats an explicit `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
