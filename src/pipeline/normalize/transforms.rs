//! The individual text clean-up passes. Every function is pure and only looks at
//! its input, so each one can be exercised on its own.

use icu::normalizer::ComposingNormalizer;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::text::{char_len, is_kept_char, BULLET_MARKS, SUBSTITUTIONS};

/// Shortest run of single-character lines treated as an extraction artifact.
pub const MIN_ONE_CHAR_RUN: usize = 3;

static HYPHENATED_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{L})-[ \t]*\n[ \t]*(\p{Ll})").unwrap());

static DOT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(?:[ \t]*\.)+").unwrap());

static LIST_MARKER: Lazy<Regex> = Lazy::new(|| {
    let bullets: String = BULLET_MARKS.iter().map(|c| regex::escape(&c.to_string())).collect();
    Regex::new(&format!(
        r"(?m)^[ \t]*(?:[{}\-]|(?:\d{{1,3}}|[a-z]|{})[.)])[ \t]+",
        bullets, ROMAN_ENUM
    ))
    .unwrap()
});

/// Lowercase roman numerals up to twelve. Longer runs of these letters are words
/// ("did", "mix", "civil"), not list labels.
const ROMAN_ENUM: &str = r"(?:xi{1,2}|ix|x|vi{0,3}|iv|i{1,3})";

static STRAY_MARKER: Lazy<Regex> = Lazy::new(|| {
    let bullets: String = BULLET_MARKS.iter().map(|c| regex::escape(&c.to_string())).collect();
    Regex::new(&format!(r"[{})]", bullets)).unwrap()
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Replaces ligatures, mojibake, typographic punctuation and invisible characters,
/// then re-joins words hyphenated across a line break.
pub fn substitutions(text: &str) -> String {
    let replaced = SUBSTITUTIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to));
    HYPHENATED_BREAK.replace_all(&replaced, "$1$2").into_owned()
}

/// Joins runs of lines that carry a single character each ("A\nb\ns\nt") into one
/// line. Blank lines between the characters of a run are dropped with it.
pub fn one_char_per_line(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut run = CharRun::default();
    let mut blanks: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if char_len(trimmed) == 1 {
            run.raw.append(&mut blanks);
            run.raw.push(line);
            run.chars.push(trimmed);
        } else if trimmed.is_empty() && !run.chars.is_empty() {
            blanks.push(line);
        } else {
            run.flush_into(&mut lines);
            lines.extend(blanks.drain(..).map(str::to_string));
            lines.push(line.to_string());
        }
    }
    run.flush_into(&mut lines);
    lines.extend(blanks.into_iter().map(str::to_string));

    lines.join("\n")
}

#[derive(Default)]
struct CharRun<'a> {
    raw: Vec<&'a str>,
    chars: Vec<&'a str>,
}

impl CharRun<'_> {
    fn flush_into(&mut self, lines: &mut Vec<String>) {
        if self.chars.len() >= MIN_ONE_CHAR_RUN {
            lines.push(self.chars.concat());
        } else {
            lines.extend(self.raw.iter().map(|s| s.to_string()));
        }
        self.raw.clear();
        self.chars.clear();
    }
}

/// Unicode NFKC.
pub fn normalize_characters(text: &str) -> String {
    ComposingNormalizer::new_nfkc().normalize(text)
}

pub fn lower(text: &str) -> String {
    text.to_lowercase()
}

/// Replaces punctuation, symbols and control characters with a space. Dots,
/// closing parentheses, hyphens and bullets stay for the passes that follow.
pub fn useless_characters(text: &str) -> String {
    text.chars()
        .map(|ch| if is_kept_char(ch) { ch } else { ' ' })
        .collect()
}

/// Ellipses and table-of-contents leaders ("....", ". . .") become a space.
pub fn multiple_dots(text: &str) -> String {
    DOT_RUN.replace_all(text, " ").into_owned()
}

/// Drops bullets and enumeration prefixes ("1.", "b)", "iv.") at the start of a
/// line, then blanks out any bullet or closing parenthesis left elsewhere.
pub fn list_enum(text: &str) -> String {
    let without_prefixes = LIST_MARKER.replace_all(text, "");
    STRAY_MARKER.replace_all(&without_prefixes, " ").into_owned()
}

pub fn digits(text: &str) -> String {
    DIGITS.replace_all(text, " ").into_owned()
}

/// Strips the dots and hyphens the earlier passes kept from token edges, then
/// removes tokens shorter than `min_len` characters. Line breaks are kept.
pub fn short_tokens(text: &str, min_len: usize) -> String {
    text.split('\n')
        .map(|line| {
            line.split_whitespace()
                .map(|token| token.trim_matches(is_edge_mark))
                .filter(|token| char_len(token) >= min_len)
                .join(" ")
        })
        .join("\n")
}

fn is_edge_mark(ch: char) -> bool {
    ch == '.' || ch == '-'
}

/// Collapses every whitespace run, newlines included, into one space and trims.
pub fn multiple_spaces(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutions_ligatures_and_quotes() {
        assert_eq!(substitutions("ﬁnal ﬂow eﬀect"), "final flow effect");
        assert_eq!(substitutions("it’s “quoted” – yes"), "it's \"quoted\" - yes");
        assert_eq!(substitutions("GrÃ¶ÃŸe"), "Größe");
        assert_eq!(substitutions("donâ€™t"), "don't");
    }

    #[test]
    fn test_substitutions_invisible_and_line_endings() {
        assert_eq!(substitutions("soft\u{00AD}ware\r\nnext"), "software\nnext");
        assert_eq!(substitutions("a\u{00A0}b\u{FEFF}"), "a b");
    }

    #[test]
    fn test_substitutions_joins_hyphenated_line_break() {
        assert_eq!(substitutions("extrac-\ntion works"), "extraction works");
        // A capitalised continuation is a new sentence or a name, not a split word.
        assert_eq!(substitutions("Anglo-\nSaxon"), "Anglo-\nSaxon");
    }

    #[test]
    fn test_one_char_per_line_collapses_runs() {
        assert_eq!(one_char_per_line("A\nb\ns\nt\nrest of text"), "Abst\nrest of text");
        assert_eq!(one_char_per_line("title\n I \n n \n t \n"), "title\nInt\n");
    }

    #[test]
    fn test_one_char_per_line_keeps_short_runs() {
        let text = "table\na\nb\nnext line";
        assert_eq!(one_char_per_line(text), text);
        let spaced = "table\na\n\nb\n\nnext line";
        assert_eq!(one_char_per_line(spaced), spaced);
    }

    #[test]
    fn test_one_char_per_line_skips_blank_lines_inside_run() {
        assert_eq!(one_char_per_line("A\n\nb\n\ns\n\nt"), "Abst");
        assert_eq!(one_char_per_line("\nA\n \nb\nc\n\nnext"), "\nAbc\n\nnext");
    }

    #[test]
    fn test_normalize_characters_nfkc() {
        assert_eq!(normalize_characters("x²"), "x2");
        assert_eq!(normalize_characters("ﬁ"), "fi");
        // Decomposed umlaut is recomposed
        assert_eq!(normalize_characters("u\u{0308}ber"), "über");
    }

    #[test]
    fn test_lower() {
        assert_eq!(lower("ÜBER Abstract"), "über abstract");
    }

    #[test]
    fn test_useless_characters() {
        assert_eq!(
            useless_characters("a, b; (c) \"d\" e/f 1.5 - g\u{0007}"),
            "a  b   c)  d  e f 1.5 - g "
        );
    }

    #[test]
    fn test_multiple_dots() {
        assert_eq!(multiple_dots("introduction.......1"), "introduction 1");
        assert_eq!(multiple_dots("wait . . . now"), "wait   now");
        assert_eq!(multiple_dots("end. next"), "end. next");
    }

    #[test]
    fn test_list_enum() {
        let text = "• first item\n2. second item\n  b) third\niv. fourth\n- fifth\nplain line";
        assert_eq!(
            list_enum(text),
            "first item\nsecond item\nthird\nfourth\nfifth\nplain line"
        );
    }

    #[test]
    fn test_list_enum_keeps_words_that_look_like_numerals() {
        let text = "did. it\nmix. of\ncivil. war\nvivid. colours\ndim) light\nxii. twelve";
        assert_eq!(
            list_enum(text),
            "did. it\nmix. of\ncivil. war\nvivid. colours\ndim  light\ntwelve"
        );
    }

    #[test]
    fn test_list_enum_blanks_stray_markers() {
        assert_eq!(list_enum("see fig) and • more"), "see fig  and   more");
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits("in 2019 we had 42 papers"), "in   we had   papers");
        assert_eq!(digits("covid19"), "covid ");
    }

    #[test]
    fn test_short_tokens() {
        assert_eq!(short_tokens("a an the paper\nof is x", 3), "the paper\n");
        assert_eq!(short_tokens("ab cd e", 2), "ab cd");
    }

    #[test]
    fn test_short_tokens_trims_edge_marks() {
        assert_eq!(
            short_tokens("did. the - well-known end-\n. e.g. --", 3),
            "did the well-known end\ne.g"
        );
    }

    #[test]
    fn test_multiple_spaces() {
        assert_eq!(multiple_spaces("  many   spaces\n\nand\tlines "), "many spaces and lines");
    }
}
