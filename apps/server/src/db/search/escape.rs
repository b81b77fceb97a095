//! LIKE pattern escaping for keyword searches.

/// Escape SQL LIKE meta-characters so user input is matched literally.
///
/// Pair with `ESCAPE E'\\'` in the generated clause.
pub(crate) fn escape_like_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// `%keyword%` with the keyword escaped.
pub(crate) fn contains_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like_pattern(keyword))
}
