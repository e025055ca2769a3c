/// truncate a string to a maximum byte length with ellipsis
pub fn truncate_with_ellipsis(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        text.to_string()
    } else {
        // back off to a char boundary so multi-byte text never panics
        let mut end_pos = max_length.saturating_sub(3);
        while end_pos > 0 && !text.is_char_boundary(end_pos) {
            end_pos -= 1;
        }

        format!("{}...", &text[..end_pos])
    }
}
