//! Heuristic content-type classification

/// Content type assigned when no category matches.
pub const DEFAULT_CONTENT_TYPE: &str = "article";

// How many characters from the front of the body participate in scoring.
const BODY_SAMPLE_CHARS: usize = 2000;

// Categories in priority order; the first match wins.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "research",
        &[
            "abstract", "arxiv", "doi.org", "hypothesis", "methodology", "et al",
            "peer-reviewed", "findings", "dataset",
        ],
    ),
    (
        "documentation",
        &[
            "documentation", "api reference", "getting started", "installation",
            "parameters", "configuration", "changelog", "usage",
        ],
    ),
    (
        "news",
        &[
            "breaking", "reported", "according to", "press release", "correspondent",
            "reuters", "associated press", "newsroom",
        ],
    ),
    (
        "blog",
        &[
            "blog", "posted by", "min read", "subscribe", "my thoughts", "i think",
            "follow me",
        ],
    ),
    (
        "technical",
        &[
            "github", "stack overflow", "compiler", "debugging", "implementation",
            "algorithm", "benchmark", "refactor",
        ],
    ),
];

/// Classify a page into one of five content types, or `article` by default.
///
/// Scoring is deliberately cheap: keyword hits over the title, the domain,
/// and the front of the body. A single hit in the title or domain is strong
/// evidence; body hits need corroboration.
pub fn classify(title: &str, body: &str, domain: &str) -> &'static str {
    let title = title.to_lowercase();
    let domain = domain.to_lowercase();
    let body_head: String = body.chars().take(BODY_SAMPLE_CHARS).collect::<String>().to_lowercase();

    for (name, keywords) in CATEGORIES {
        let strong_hit = keywords
            .iter()
            .any(|k| title.contains(*k) || domain.contains(*k));
        if strong_hit {
            return name;
        }
        let body_hits = keywords.iter().filter(|k| body_head.contains(**k)).count();
        if body_hits >= 2 {
            return name;
        }
    }

    DEFAULT_CONTENT_TYPE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_from_body_signals() {
        let body = "Abstract. We propose a new methodology for measuring drift.";
        assert_eq!(classify("A study of drift", body, "example.org"), "research");
    }

    #[test]
    fn test_documentation_from_title() {
        assert_eq!(
            classify("API Reference", "endpoints and fields", "example.com"),
            "documentation"
        );
    }

    #[test]
    fn test_blog_from_domain() {
        assert_eq!(
            classify("Why I switched editors", "it went fine", "blog.example.com"),
            "blog"
        );
    }

    #[test]
    fn test_technical_from_domain() {
        assert_eq!(
            classify("fixing the build", "make it compile", "github.com"),
            "technical"
        );
    }

    #[test]
    fn test_priority_order_research_beats_technical() {
        // Signals for both: research wins because it is checked first.
        let body = "Abstract: we benchmark the algorithm against a public dataset using a clear methodology.";
        assert_eq!(classify("Paper notes", body, "example.com"), "research");
    }

    #[test]
    fn test_default_when_nothing_matches() {
        assert_eq!(
            classify("A walk in the park", "it was sunny and pleasant", "example.com"),
            DEFAULT_CONTENT_TYPE
        );
    }

    #[test]
    fn test_single_body_hit_is_not_enough() {
        // One weak hit ("usage") must not classify as documentation.
        assert_eq!(
            classify("Household tips", "typical usage of vinegar when cleaning", "example.com"),
            DEFAULT_CONTENT_TYPE
        );
    }
}
