//! Bulk product import from uploaded text.
//!
//! The upload format is one product name per line. Only the name is read;
//! every imported product gets the default category.

/// Split uploaded text into product names: one per non-blank line, trimmed.
pub fn parse_import_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
