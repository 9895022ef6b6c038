//! Single-line CSV tokenizer.
//!
//! Splits on commas that sit outside a pair of double quotes. A quote only
//! toggles the quoted state and is not copied into the field. A doubled
//! quote (`""`) is not an escape, it simply toggles the state twice.
//! Callers still run [`clean_field`] to trim and drop stray quotes.

/// Splits one line into fields. Never fails: unbalanced quotes only move
/// the field boundaries.
///
/// # Examples
///
/// ```
/// use pga_parser::tokenizer::split_line;
///
/// assert_eq!(split_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
/// ```
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

/// Removes every double quote and surrounding whitespace from a field.
pub fn clean_field(field: &str) -> String {
    field.replace('"', "").trim().to_string()
}

/// Splits a line and cleans every field.
pub fn split_clean(line: &str) -> Vec<String> {
    split_line(line).iter().map(|f| clean_field(f)).collect()
}
