//! Small shared helpers.

/// Convert a string to a filename-safe slug
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_punctuation_and_caps_length() {
        assert_eq!(slugify("Rust Conf: São Paulo!"), "rust-conf-são-paulo");
        assert_eq!(slugify("---"), "");
        assert!(slugify(&"x".repeat(200)).len() <= 50);
    }
}
