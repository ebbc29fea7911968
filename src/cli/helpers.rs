//! Shared helper functions for CLI commands

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Comma-joined selection, or "all" when nothing is selected
pub fn describe_selection<T: std::fmt::Display>(values: &[T]) -> String {
    if values.is_empty() {
        "all".to_string()
    } else {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Überall Märkte", 6), "Übe...");
    }

    #[test]
    fn test_describe_selection() {
        let none: [&str; 0] = [];
        assert_eq!(describe_selection(&none), "all");
        assert_eq!(describe_selection(&[2024, 2025]), "2024, 2025");
    }
}
