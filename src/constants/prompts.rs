/// Hard ceiling on extracted source text, applied before prompt
/// construction. A cost/latency bound, not a correctness one.
pub const MAX_SOURCE_TEXT_CHARS: usize = 6000;

/// Cap on the raw model text carried inside an invalid-model-output error.
pub const MAX_RAW_SNIPPET_CHARS: usize = 4000;

pub const QUIZ_GENERATOR_PROMPT: &str = r#"You are a quiz generation agent. You receive source material extracted from a teacher's uploaded document and must produce a multiple-choice quiz covering it.

## OUTPUT FORMAT

Return ONLY a single valid JSON object. No prose, no markdown, no code fences, no commentary.

The object must conform to this schema:

{
  "title": string,
  "description": string,
  "questions": [
    {
      "id": string,
      "question": string,
      "options": [string, ...],
      "correctAnswer": integer,
      "explanation": string
    }
  ]
}

## RULES

1. Every question must be directly supported by the source material. Do not infer, extrapolate, or add outside facts.
2. Each question has between 3 and 6 options.
3. correctAnswer is the ZERO-BASED index of the correct option. Vary it across questions; do not always use 0.
4. explanation states why the correct option is correct, citing the source material where possible.
5. Distribute questions across all major topics in the source; avoid clustering.
6. If the teacher supplied instructions, follow them as long as they do not conflict with these rules.
7. question ids are "q1", "q2", ... in order.

The response must be immediately parseable as JSON with no preprocessing."#;

pub const HINT_GENERATOR_PROMPT: &str = "You are a tutoring assistant. Given one quiz question and its options, write a single short hint that nudges a student toward the correct answer without revealing it. Return plain text only: no JSON, no markdown, no quotation marks around the hint, at most two sentences.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_constants_are_non_empty() {
        assert!(!QUIZ_GENERATOR_PROMPT.is_empty());
        assert!(!HINT_GENERATOR_PROMPT.is_empty());
    }

    #[test]
    fn source_ceiling_exceeds_raw_snippet_cap() {
        assert!(MAX_SOURCE_TEXT_CHARS > MAX_RAW_SNIPPET_CHARS);
    }
}
