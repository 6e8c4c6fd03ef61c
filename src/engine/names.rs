/// Derives `(first_name, last_name)` from the name columns.
///
/// With a blank surname the full name is split on whitespace: the first token
/// is the first name and the rest, joined by single spaces, the last name.
/// With a surname present both values are taken as they are.
pub fn split_name(full_name: Option<&str>, surname: Option<&str>) -> (String, String) {
    match surname {
        Some(surname) if !surname.trim().is_empty() => {
            (full_name.unwrap_or_default().to_string(), surname.to_string())
        }
        _ => {
            let mut tokens = full_name.unwrap_or_default().split_whitespace();
            let first = tokens.next().unwrap_or_default().to_string();
            let last = tokens.collect::<Vec<_>>().join(" ");
            (first, last)
        }
    }
}
