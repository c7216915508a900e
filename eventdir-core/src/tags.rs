//! Curated tag vocabulary and tag collection helpers.

use crate::event::Event;

/// Tags offered by the submission form. Records may carry other tags (the
/// vocabulary grows by review), so this list is a suggestion, not a schema.
pub const EVENT_TAGS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "vue",
    "angular",
    "node",
    "python",
    "django",
    "flask",
    "fastapi",
    "java",
    "spring",
    "go",
    "rust",
    "php",
    "laravel",
    "ruby",
    "rails",
    "aws",
    "azure",
    "gcp",
    "devops",
    "docker",
    "kubernetes",
    "mobile",
    "flutter",
    "react-native",
    "ios",
    "android",
    "data",
    "machine-learning",
    "ai",
    "blockchain",
    "ux",
    "ui",
    "design",
    "product",
    "agile",
    "scrum",
    "management",
    "career",
    "cybersecurity",
    "networking",
];

/// All distinct tags carried by the given events, sorted.
pub fn collect_tags(events: &[Event]) -> Vec<String> {
    let mut tags: Vec<String> = events
        .iter()
        .flat_map(|e| e.tags.iter().cloned())
        .collect();

    tags.sort();
    tags.dedup();
    tags
}
