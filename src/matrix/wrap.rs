//! Axis label wrapping
//!
//! Greedy fill over chunks. A chunk is a word, a single space between words, or
//! the part of a hyphenated word up to and including a hyphen that sits between
//! letters ("multi-" in "multi-year"). Whitespace runs collapse to one space.
//! A chunk wider than the line is split, after a hyphen if one fits, and its
//! head fills the rest of the current line.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A label split into display lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WrappedLabel {
    pub lines: Vec<String>,
}

impl WrappedLabel {
    /// Lines joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Widest line in terminal columns
    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.width()).max().unwrap_or(0)
    }
}

/// Wrap `label` to lines of at most `width` columns
pub fn wrap_label(label: &str, width: usize) -> WrappedLabel {
    let width = width.max(1);
    let mut chunks = split_chunks(label);
    // Next chunk at the end
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        // A line never starts with the space between two words
        if !lines.is_empty() && chunks.last().is_some_and(|c| c == " ") {
            chunks.pop();
        }

        let mut line = String::new();
        let mut line_width = 0;
        while let Some(chunk) = chunks.last() {
            let chunk_width = chunk.width();
            if line_width + chunk_width > width {
                break;
            }
            line.push_str(chunk);
            line_width += chunk_width;
            chunks.pop();
        }

        if let Some(chunk) = chunks.last_mut() {
            if chunk.width() > width {
                let head = split_long_chunk(chunk, width - line_width, line.is_empty());
                line.push_str(&head);
            }
        }

        if line.ends_with(' ') {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    WrappedLabel { lines }
}

fn split_chunks(label: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    for (n, word) in label.split_whitespace().enumerate() {
        if n > 0 {
            chunks.push(" ".to_string());
        }
        let chars: Vec<char> = word.chars().collect();
        let mut start = 0;
        for i in 0..chars.len() {
            if chars[i] == '-' && i > start && hyphen_breaks(&chars, i) {
                chunks.push(chars[start..=i].iter().collect());
                start = i + 1;
            }
        }
        if start < chars.len() {
            chunks.push(chars[start..].iter().collect());
        }
    }
    chunks
}

fn is_letter(c: Option<&char>) -> bool {
    matches!(c, Some(c) if c.is_alphabetic() || *c == '_')
}

/// Whether the hyphen at `i` may end a line: two letters (or letter, hyphen,
/// letter) before it and two letters, optionally hyphen-separated, after it
fn hyphen_breaks(chars: &[char], i: usize) -> bool {
    let at = |j: usize| chars.get(j);
    let behind = (i >= 2 && is_letter(at(i - 2)) && is_letter(at(i - 1)))
        || (i >= 3 && is_letter(at(i - 3)) && at(i - 2) == Some(&'-') && is_letter(at(i - 1)));
    let ahead = is_letter(at(i + 1))
        && (is_letter(at(i + 2)) || (at(i + 2) == Some(&'-') && is_letter(at(i + 3))));
    behind && ahead
}

/// Cut the head of `chunk` that fits in `space_left` columns and return it.
/// With `force`, at least one character is taken so an empty line always
/// makes progress.
fn split_long_chunk(chunk: &mut String, space_left: usize, force: bool) -> String {
    let mut end = 0;
    let mut used = 0;
    for (i, ch) in chunk.char_indices() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > space_left && !(force && i == 0) {
            break;
        }
        used += ch_width;
        end = i + ch.len_utf8();
    }

    if let Some(hyphen) = chunk[..end].rfind('-') {
        if hyphen > 0 && chunk[..hyphen].chars().any(|c| c != '-') {
            end = hyphen + 1;
        }
    }

    let rest = chunk.split_off(end);
    std::mem::replace(chunk, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_matches_fill_behavior() {
        let wrapped = wrap_label("6-Critical (multiple times a year)", 15);
        assert_eq!(
            wrapped.lines,
            vec!["6-Critical", "(multiple times", "a year)"]
        );
        assert_eq!(wrapped.text(), "6-Critical\n(multiple times\na year)");
    }

    #[test]
    fn test_short_label_single_line() {
        let wrapped = wrap_label("1-Low (<$1M)", 15);
        assert_eq!(wrapped.lines, vec!["1-Low (<$1M)"]);
        assert_eq!(wrapped.width(), 12);
    }

    #[test]
    fn test_long_word_is_broken() {
        let wrapped = wrap_label("abcdefghij", 4);
        assert_eq!(wrapped.lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_default_labels_keep_money_ranges_whole() {
        // Hyphens next to digits or symbols are not break points
        assert_eq!(
            wrap_label("2-Minor ($1M-$10M)", 15).lines,
            vec!["2-Minor", "($1M-$10M)"]
        );
        assert_eq!(
            wrap_label("4-Significant ($50M-$500M)", 15).lines,
            vec!["4-Significant", "($50M-$500M)"]
        );
        assert_eq!(
            wrap_label("2-Minor (once in 10 years)", 15).lines,
            vec!["2-Minor (once", "in 10 years)"]
        );
    }

    #[test]
    fn test_breaks_after_hyphen_between_letters() {
        assert_eq!(
            wrap_label("long-running multi-year", 8).lines,
            vec!["long-", "running", "multi-", "year"]
        );
        assert_eq!(wrap_label("ab-c-de", 3).lines, vec!["ab-", "c-", "de"]);
        assert_eq!(wrap_label("ab-c-de", 5).lines, vec!["ab-c-", "de"]);
        assert_eq!(
            wrap_label("risk-based supply-chain review", 12).lines,
            vec!["risk-based", "supply-chain", "review"]
        );
    }

    #[test]
    fn test_long_word_fills_current_line() {
        assert_eq!(wrap_label("ab abcdefgh", 5).lines, vec!["ab ab", "cdefg", "h"]);
        assert_eq!(
            wrap_label("a supercalifragilistic", 10).lines,
            vec!["a supercal", "ifragilist", "ic"]
        );
        // Long word split prefers a hyphen inside the fitting prefix
        assert_eq!(wrap_label("x-ray scan", 4).lines, vec!["x-", "ray", "scan"]);
        assert_eq!(wrap_label("ab x-ray-scan", 6).lines, vec!["ab", "x-ray-", "scan"]);
    }

    #[test]
    fn test_whitespace_collapses() {
        let wrapped = wrap_label("  a \t b\n c  ", 15);
        assert_eq!(wrapped.lines, vec!["a b c"]);
    }

    #[test]
    fn test_empty_label() {
        let wrapped = wrap_label("", 15);
        assert!(wrapped.lines.is_empty());
        assert_eq!(wrapped.text(), "");
    }

    proptest! {
        #[test]
        fn prop_wrap_is_idempotent(label in "[a-zA-Z0-9$<>() -]{0,60}", width in 1usize..30) {
            prop_assert_eq!(wrap_label(&label, width), wrap_label(&label, width));
        }

        #[test]
        fn prop_lines_fit_width(label in "[a-z -]{0,60}", width in 1usize..30) {
            for line in wrap_label(&label, width).lines {
                prop_assert!(line.width() <= width);
            }
        }

        #[test]
        fn prop_words_preserved(label in "[a-z]{1,8}( [a-z]{1,8}){0,6}") {
            let wrapped = wrap_label(&label, 15);
            let original: Vec<&str> = label.split_whitespace().collect();
            let joined = wrapped.lines.join(" ");
            let rejoined: Vec<&str> = joined.split_whitespace().collect();
            prop_assert_eq!(original, rejoined);
        }
    }
}
