pub mod contact;
pub mod newsletter;

/// Collapse whitespace runs into single spaces and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Trim every line and drop control characters, keeping line breaks.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    input
        .trim()
        .lines()
        .map(|line| {
            line.trim_end()
                .chars()
                .filter(|ch| !ch.is_control() || *ch == '\t')
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
