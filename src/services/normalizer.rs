//! Response normalization: turns raw, untrusted model output into a
//! validated quiz. Recovery tries four strategies in a fixed order and
//! stops at the first success; downstream behavior depends on which
//! strategy fires for ambiguous inputs, so the order must not change.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    constants::prompts::MAX_RAW_SNIPPET_CHARS,
    errors::{AppError, AppResult},
    models::domain::QuizQuestion,
    services::{
        generation_client::{GenerationClient, GenerationRequest},
        prompt,
    },
};

static JSON_FENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)```json\s*(.+?)```").expect("JSON_FENCE_REGEX is a valid regex pattern")
});

/// Quiz shape the generator is asked to produce. Every field defaults so
/// that partially conforming model output still normalizes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedQuiz {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuizQuestion>,
}

/// Lenient JSON recovery. Strategies, in order:
/// 1. parse the text directly;
/// 2. strip a leading/trailing code fence (optional `json`/`html` tag);
/// 3. normalize typographic quotes, drop control characters, parse the
///    substring between the first `{` and the last `}`;
/// 4. parse the contents of a fenced block labeled `json` anywhere.
pub fn recover_json(raw: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(raw.trim()) {
        return Some(value);
    }

    if let Some(inner) = strip_code_fence(raw) {
        if let Ok(value) = serde_json::from_str(inner.trim()) {
            return Some(value);
        }
    }

    let cleaned = sanitize(raw);
    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&cleaned[start..=end]) {
                return Some(value);
            }
        }
    }

    if let Some(captures) = JSON_FENCE_REGEX.captures(raw) {
        if let Ok(value) = serde_json::from_str(captures[1].trim()) {
            return Some(value);
        }
    }

    None
}

/// Normalize raw model text into a quiz, then run the best-effort hint
/// pass. Pure given the input and the injected client.
pub async fn normalize_quiz(
    raw: &str,
    client: &dyn GenerationClient,
    model: &str,
) -> AppResult<GeneratedQuiz> {
    let value = recover_json(raw)
        .filter(Value::is_object)
        .ok_or_else(|| invalid_output(raw))?;

    let mut quiz: GeneratedQuiz = serde_json::from_value(value).map_err(|err| {
        log::warn!("recovered JSON does not fit the quiz schema: {}", err);
        invalid_output(raw)
    })?;

    apply_question_defaults(&mut quiz.questions);
    backfill_hints(&mut quiz.questions, client, model).await;

    Ok(quiz)
}

/// Character-safe truncation to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}

fn invalid_output(raw: &str) -> AppError {
    AppError::InvalidModelOutput {
        raw: truncate_chars(raw, MAX_RAW_SNIPPET_CHARS),
    }
}

fn strip_code_fence(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix("```")?.strip_suffix("```")?;

    let inner = inner.trim_start();
    for tag in ["json", "html"] {
        // get() rather than slicing: the content is untrusted and may
        // start with a multibyte character.
        if let Some(prefix) = inner.get(..tag.len()) {
            if prefix.eq_ignore_ascii_case(tag) {
                return Some(&inner[tag.len()..]);
            }
        }
    }
    Some(inner)
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' => '"',
            other => other,
        })
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}

fn apply_question_defaults(questions: &mut Vec<QuizQuestion>) {
    questions.retain(|question| {
        if question.options.is_empty() {
            log::warn!(
                "dropping generated question with no options: {:?}",
                question.question
            );
            return false;
        }
        true
    });

    for (index, question) in questions.iter_mut().enumerate() {
        if question.id.trim().is_empty() {
            question.id = format!("q{}", index + 1);
        }
        if question.correct_answer >= question.options.len() {
            log::warn!(
                "correctAnswer {} out of range for question '{}', resetting to 0",
                question.correct_answer,
                question.id
            );
            question.correct_answer = 0;
        }
    }
}

/// Per-question hint generation. Failures degrade to an empty hint and
/// never abort normalization.
async fn backfill_hints(questions: &mut [QuizQuestion], client: &dyn GenerationClient, model: &str) {
    for question in questions.iter_mut() {
        if question.question.trim().is_empty() {
            continue;
        }

        let request = GenerationRequest {
            model: model.to_string(),
            messages: prompt::build_hint_messages(question),
            temperature: Some(0.7),
            max_tokens: Some(120),
            force_json: false,
        };

        match client.complete(request).await {
            Ok(hint) => question.hint = hint.trim().to_string(),
            Err(err) => {
                log::warn!(
                    "hint generation failed for question '{}': {}",
                    question.id,
                    err
                );
                question.hint = String::new();
            }
        }
    }
}
