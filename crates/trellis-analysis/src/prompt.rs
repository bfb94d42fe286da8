//! Prompt construction for the three analysis calls

/// Truncate text to a character budget without splitting a code point.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Build the content-analysis prompt.
pub(crate) fn analysis_prompt(text: &str, url: &str, max_chars: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str(ANALYSIS_INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Source URL: {}\n\n", url));
    prompt.push_str("Text to analyze:\n---\n");
    prompt.push_str(truncate_chars(text, max_chars));
    prompt.push_str("\n---\n\n");
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}

/// Build the concept-relationship scoring prompt.
pub(crate) fn relation_prompt(concept: &str, existing: &[String]) -> String {
    let mut prompt = String::new();
    prompt.push_str(RELATION_INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("New concept: {}\n\n", concept));
    prompt.push_str("Existing concepts:\n");
    for c in existing {
        prompt.push_str(&format!("- {}\n", c));
    }
    prompt.push('\n');
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}

/// Build the search-query expansion prompt.
pub(crate) fn expansion_prompt(query: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(EXPANSION_INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(&format!("Query: {}\n\n", query));
    prompt.push_str(JSON_ONLY_REMINDER);
    prompt
}

const ANALYSIS_INSTRUCTIONS: &str = r#"Analyze the following web page text and return a JSON object with exactly this shape:

{
  "concepts": ["up to 10 key concepts mentioned in the text"],
  "summary": "two or three sentence summary",
  "contentType": "one of: research, documentation, news, blog, technical, article",
  "author": "author name, or null if not identifiable",
  "mainTopic": "the single main topic",
  "relatedTopics": ["up to 5 related topics"],
  "confidence": 0.0
}

Rules:
- Concepts are short noun phrases, not sentences
- Prefer specific concepts ("transformer architecture") over generic ones ("technology")
- confidence is your confidence in this analysis, between 0 and 1"#;

const RELATION_INSTRUCTIONS: &str = r#"Score how strongly a new concept relates to each of a list of existing concepts.

Return a JSON array with one entry per existing concept that is meaningfully related:

[
  {"concept": "existing concept name", "similarity": 0.0}
]

Rules:
- similarity is between 0 and 1
- Omit concepts with no meaningful relationship
- Copy concept names exactly as given"#;

const EXPANSION_INSTRUCTIONS: &str = r#"Expand a search query for a personal knowledge base of captured web pages.

Return a JSON object with exactly this shape:

{
  "variations": ["up to 3 alternative phrasings"],
  "relatedConcepts": ["up to 5 related concepts worth searching"],
  "intent": "one of: informational, navigational, exploratory"
}"#;

const JSON_ONLY_REMINDER: &str =
    "Return ONLY valid JSON, no markdown code blocks, no explanations.";
