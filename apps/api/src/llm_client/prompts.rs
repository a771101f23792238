// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every prompt that reads or rewrites a candidate's history.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
    CRITICAL: Only use information present in the supplied material. \
    Never invent employers, dates, titles, metrics, or credentials. \
    If a field is not present, return an empty string or an empty array for it.";

/// Renders a list of lines as a bulleted block for prompt interpolation.
pub fn bullet_block(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_block_prefixes_each_line() {
        let items = vec!["Rust".to_string(), "PostgreSQL".to_string()];
        assert_eq!(bullet_block(&items), "- Rust\n- PostgreSQL");
    }

    #[test]
    fn test_bullet_block_empty() {
        assert_eq!(bullet_block(&[]), "");
    }
}
