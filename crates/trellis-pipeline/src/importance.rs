//! Page importance scoring

use trellis_domain::node::MAX_IMPORTANCE;

const WORDS_PER_POINT: f64 = 500.0;
const MAX_WORD_POINTS: f64 = 3.0;
const MAX_CONCEPT_POINTS: f64 = 2.0;
const CONCEPT_STEP: f64 = 0.3;

/// Compute the importance of a page node.
///
/// A weighted combination of capped word count, a content-type bonus
/// (research above documentation above the rest), and a capped concept-count
/// bonus, clamped to `[0, MAX_IMPORTANCE]`.
pub fn page_importance(word_count: usize, content_type: &str, concept_count: usize) -> f64 {
    let word_points = (word_count as f64 / WORDS_PER_POINT).min(MAX_WORD_POINTS);
    let type_bonus = match content_type {
        "research" => 2.0,
        "documentation" => 1.5,
        _ => 0.5,
    };
    let concept_points = (concept_count as f64 * CONCEPT_STEP).min(MAX_CONCEPT_POINTS);

    (1.0 + word_points + type_bonus + concept_points).clamp(0.0, MAX_IMPORTANCE)
}
