//! Shared utility functions for the crop statistics service

use regex::Regex;
use std::sync::OnceLock;

use crate::dataset::UNKNOWN_STATE_CODE;

fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*\S)\s*\(([A-Za-z]{2})\)$").expect("valid regex"))
}

/// Split a census municipality label into name and state code
///
/// Census tables label municipalities as `Name (UF)`. Labels without the
/// suffix keep the whole text as the name and the unknown state code.
///
/// # Examples
///
/// ```
/// use crop_stats_service::utils::split_municipality_label;
///
/// assert_eq!(
///     split_municipality_label("Sorriso (MT)"),
///     ("Sorriso".to_string(), "MT".to_string())
/// );
/// assert_eq!(
///     split_municipality_label("Alta Floresta D'Oeste (RO)"),
///     ("Alta Floresta D'Oeste".to_string(), "RO".to_string())
/// );
/// assert_eq!(
///     split_municipality_label("Brasília"),
///     ("Brasília".to_string(), "XX".to_string())
/// );
/// ```
pub fn split_municipality_label(label: &str) -> (String, String) {
    let label = label.trim();
    match label_regex().captures(label) {
        Some(caps) => (caps[1].to_string(), caps[2].to_ascii_uppercase()),
        None => (label.to_string(), UNKNOWN_STATE_CODE.to_string()),
    }
}

/// Normalise a municipality code cell to its digits
///
/// Census codes are 7 digits (IBGE); spreadsheets sometimes store them as
/// floats. Returns `None` for anything that is not all digits.
pub fn normalize_municipality_code(value: &str) -> Option<String> {
    let value = value.trim();
    let value = value.strip_suffix(".0").unwrap_or(value);
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        Some(value.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_label_clean() {
        assert_eq!(
            split_municipality_label("Campo Novo do Parecis (MT)"),
            ("Campo Novo do Parecis".to_string(), "MT".to_string())
        );
    }

    #[test]
    fn test_split_label_lowercase_state() {
        assert_eq!(
            split_municipality_label("Cristalina (go)"),
            ("Cristalina".to_string(), "GO".to_string())
        );
    }

    #[test]
    fn test_split_label_without_space() {
        assert_eq!(
            split_municipality_label("Rio Verde(GO)"),
            ("Rio Verde".to_string(), "GO".to_string())
        );
    }

    #[test]
    fn test_split_label_nested_parentheses() {
        assert_eq!(
            split_municipality_label("São Luiz (do Norte) (GO)"),
            ("São Luiz (do Norte)".to_string(), "GO".to_string())
        );
    }

    #[test]
    fn test_split_label_no_state() {
        assert_eq!(
            split_municipality_label("  Brasília "),
            ("Brasília".to_string(), "XX".to_string())
        );
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_municipality_code("5107925").unwrap(), "5107925");
        assert_eq!(normalize_municipality_code("5107925.0").unwrap(), "5107925");
        assert_eq!(normalize_municipality_code(" 1100015 ").unwrap(), "1100015");
    }

    #[test]
    fn test_normalize_code_rejects_text() {
        assert!(normalize_municipality_code("Fonte: IBGE").is_none());
        assert!(normalize_municipality_code("").is_none());
        assert!(normalize_municipality_code("12a4").is_none());
    }
}
