//! Rule-based classifiers applied to each article row.
//!
//! All three functions are total: malformed input degrades to a default label
//! or `None`, never an error.

pub mod activity;
pub mod branch;
pub mod date;

pub use activity::classify_activity;
pub use branch::assign_branch;
pub use date::{extract_date, parse_timestamp};

/// Placeholder used when a text field is missing.
///
/// Keeps the joined text shape stable (`"<title> None"`) so keyword matching
/// behaves the same whether a cell was empty or absent.
const MISSING_TEXT: &str = "None";

/// Join the fields with single spaces and lowercase the result.
fn combined_text(fields: &[Option<&str>]) -> String {
    fields
        .iter()
        .map(|f| f.unwrap_or(MISSING_TEXT))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_text_uses_placeholder_for_missing() {
        assert_eq!(combined_text(&[Some("EMBA 年会"), None]), "emba 年会 none");
    }
}
