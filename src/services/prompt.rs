use crate::{
    constants::prompts::{HINT_GENERATOR_PROMPT, MAX_SOURCE_TEXT_CHARS, QUIZ_GENERATOR_PROMPT},
    models::domain::QuizQuestion,
    services::{generation_client::ChatMessage, normalizer::truncate_chars},
};

/// Compose the quiz-generation request from extracted source text and
/// optional teacher instructions. The source is truncated to the hard
/// input ceiling here, before the prompt is built.
pub fn build_quiz_messages(source_text: &str, teacher_prompt: Option<&str>) -> Vec<ChatMessage> {
    let source = truncate_chars(source_text, MAX_SOURCE_TEXT_CHARS);

    let mut user = String::new();
    if let Some(instructions) = teacher_prompt.map(str::trim).filter(|p| !p.is_empty()) {
        user.push_str("Teacher instructions:\n");
        user.push_str(instructions);
        user.push_str("\n\n");
    }
    user.push_str("Source material:\n");
    user.push_str(&source);

    vec![
        ChatMessage::system(QUIZ_GENERATOR_PROMPT),
        ChatMessage::user(user),
    ]
}

pub fn build_hint_messages(question: &QuizQuestion) -> Vec<ChatMessage> {
    let mut user = format!("Question: {}\n", question.question);
    if !question.options.is_empty() {
        user.push_str("Options:\n");
        for (index, option) in question.options.iter().enumerate() {
            user.push_str(&format!("{}. {}\n", index + 1, option));
        }
    }

    vec![
        ChatMessage::system(HINT_GENERATOR_PROMPT),
        ChatMessage::user(user),
    ]
}
