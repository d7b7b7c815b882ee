/// Default length of the per-seat answer summary, in characters
pub const DEFAULT_SUMMARY_CHARS: usize = 30;

const ELLIPSIS: char = '…';

/// Cut free text down to at most `max_chars` characters
///
/// Counts characters rather than bytes so multi-byte text is never split.
/// When the text is cut, the last kept character is replaced with `…`.
pub fn truncate_summary(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut out: String = trimmed.chars().take(max_chars - 1).collect();
    out.truncate(out.trim_end().len());
    out.push(ELLIPSIS);
    out
}
