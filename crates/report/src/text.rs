/// Greedy word wrap. Words longer than `width` are split across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;
    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        loop {
            let needed = if line_len == 0 {
                chars.len()
            } else {
                line_len + 1 + chars.len()
            };
            if needed <= width {
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                line.extend(chars.iter());
                line_len += chars.len();
                break;
            }
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
                continue;
            }
            let rest = chars.split_off(width);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Wraps to at most `max_lines`; when text is cut, the last kept line is
/// shortened and ends in `...`.
pub fn wrap_clipped(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if max_lines == 0 {
        return Vec::new();
    }
    let mut lines = wrap(text, width);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        let keep = width.saturating_sub(3);
        if let Some(last) = lines.last_mut() {
            let clipped: String = last.chars().take(keep).collect();
            *last = format!("{clipped}...");
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap("The Quick Brown Fox Jumps", 10),
            vec!["The Quick", "Brown Fox", "Jumps"]
        );
    }

    #[test]
    fn splits_long_words() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("   ", 8).is_empty());
    }

    #[test]
    fn clipping_marks_the_cut() {
        assert_eq!(
            wrap_clipped("alpha beta gamma delta", 11, 1),
            vec!["alpha be..."]
        );
        assert_eq!(wrap_clipped("short", 11, 1), vec!["short"]);
    }
}
