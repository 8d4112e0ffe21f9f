//! Input normalization for administrator-submitted values.

/// Convert text into a URL-safe slug.
///
/// Lowercases, collapses runs of non-alphanumeric characters to single
/// hyphens, and trims leading/trailing hyphens.
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_hyphen = true; // start true to skip leading hyphens
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }
    while result.ends_with('-') {
        result.pop();
    }
    result
}

/// Normalize an already-slugged identifier arriving in a query string.
///
/// Lowercases and drops everything outside `[a-z0-9_-]`.
pub fn sanitize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Reduce user-entered label text to plain text.
///
/// Drops HTML tags and control characters, collapses whitespace runs to
/// single spaces, and trims.
pub fn sanitize_text_field(text: &str) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if in_tag || c.is_control() => {}
            c => stripped.push(c),
        }
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
