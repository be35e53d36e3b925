//! Counting and simple text analysis.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ASCII_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word regex"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word regex"));

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));

/// A word and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    fn new(word: &str, count: usize) -> Self {
        Self {
            word: word.to_string(),
            count,
        }
    }
}

/// Count how often each alphabetic word appears.
///
/// Without `top_n` the result keeps first-appearance order. With `top_n`
/// the most frequent words come first; ties keep first-appearance order.
#[must_use]
pub fn word_frequency(text: &str, top_n: Option<usize>, ignore_case: bool) -> Vec<WordCount> {
    let folded;
    let text = if ignore_case {
        folded = text.to_lowercase();
        folded.as_str()
    } else {
        text
    };

    let mut order: Vec<WordCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for word in ASCII_WORD.find_iter(text).map(|m| m.as_str()) {
        match index.get(word) {
            Some(&pos) => order[pos].count += 1,
            None => {
                index.insert(word, order.len());
                order.push(WordCount::new(word, 1));
            }
        }
    }

    if let Some(limit) = top_n {
        order.sort_by(|a, b| b.count.cmp(&a.count));
        order.truncate(limit);
    }
    order
}

/// Number of word-character runs in the text.
#[must_use]
pub fn count_words(text: &str) -> usize {
    WORD.find_iter(text).count()
}

/// Number of non-blank pieces between `.`, `!` and `?` runs.
#[must_use]
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_END
        .split(text)
        .filter(|piece| !piece.trim().is_empty())
        .count()
}

/// Whether the text reads the same backwards, considering ASCII
/// alphanumerics only.
#[must_use]
pub fn is_palindrome(text: &str, ignore_case: bool, ignore_spaces: bool) -> bool {
    let chars: Vec<char> = text
        .chars()
        .map(|c| if ignore_case { c.to_ascii_lowercase() } else { c })
        .filter(|c| !(ignore_spaces && *c == ' '))
        .filter(char::is_ascii_alphanumeric)
        .collect();
    chars.iter().eq(chars.iter().rev())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(counts: &[WordCount]) -> Vec<(&str, usize)> {
        counts.iter().map(|c| (c.word.as_str(), c.count)).collect()
    }

    #[test]
    fn test_word_frequency() {
        let freq = word_frequency("python python java python java ruby", None, true);
        assert_eq!(pairs(&freq), vec![("python", 3), ("java", 2), ("ruby", 1)]);
    }

    #[test]
    fn test_word_frequency_top_n() {
        let freq = word_frequency("a b b c c c", Some(2), true);
        assert_eq!(pairs(&freq), vec![("c", 3), ("b", 2)]);
    }

    #[test]
    fn test_word_frequency_ties_keep_first_appearance() {
        let freq = word_frequency("zeta alpha zeta alpha beta", Some(3), true);
        assert_eq!(pairs(&freq), vec![("zeta", 2), ("alpha", 2), ("beta", 1)]);
    }

    #[test]
    fn test_word_frequency_case_sensitive() {
        let freq = word_frequency("Hello hello HELLO", None, false);
        assert_eq!(freq.len(), 3);
        let folded = word_frequency("Hello hello HELLO", None, true);
        assert_eq!(pairs(&folded), vec![("hello", 3)]);
    }

    #[test]
    fn test_word_frequency_skips_digits() {
        let freq = word_frequency("abc 123 abc4", None, true);
        assert_eq!(pairs(&freq), vec![("abc", 1)]);
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("The quick brown fox."), 4);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("it's 42"), 3);
    }

    #[test]
    fn test_count_sentences() {
        assert_eq!(count_sentences("One. Two! Three?"), 3);
        assert_eq!(count_sentences("Wait... what?!"), 2);
        assert_eq!(count_sentences("   "), 0);
    }

    #[test]
    fn test_is_palindrome() {
        assert!(is_palindrome("racecar", true, true));
        assert!(is_palindrome("A man a plan a canal Panama", true, true));
        assert!(!is_palindrome("hello", true, true));
    }

    #[test]
    fn test_is_palindrome_case_sensitive() {
        assert!(!is_palindrome("Racecar", false, true));
        assert!(is_palindrome("", true, true));
    }
}
