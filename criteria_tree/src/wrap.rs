/// The line separator understood by the chart renderer.
pub const LINE_BREAK: &str = "<br>";

/// Splits a text into lines of at most `max_width` characters.
///
/// Greedy: words are added to the current line as long as they fit, with one
/// space between them. A word longer than `max_width` is never split and ends
/// up alone on its line. Widths are counted in characters, not bytes.
pub fn wrap_lines(text: &str, max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len: usize = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wraps a label for the treemap, see [`wrap_lines`].
pub fn wrap(text: &str, max_width: usize) -> String {
    wrap_lines(text, max_width).join(LINE_BREAK)
}
