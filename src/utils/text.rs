// Text utils

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Known bad sequences in extracted PDF text and their canonical replacement.
/// Applied in order: the mojibake entries have to run before the single-character
/// quote and dash entries they contain.
pub const SUBSTITUTIONS: &[(&str, &str)] = &[
    // UTF-8 decoded as Latin-1
    ("â€™", "'"),
    ("â€˜", "'"),
    ("â€œ", "\""),
    ("â€\u{9d}", "\""),
    ("â€“", "-"),
    ("â€”", "-"),
    ("Ã¤", "ä"),
    ("Ã¶", "ö"),
    ("Ã¼", "ü"),
    ("Ã„", "Ä"),
    ("Ã–", "Ö"),
    ("Ãœ", "Ü"),
    ("ÃŸ", "ß"),
    ("Ã©", "é"),
    ("Ã¨", "è"),
    ("Ã¡", "á"),
    // Line endings
    ("\r\n", "\n"),
    ("\r", "\n"),
    // Invisible and spacing characters
    ("\u{00AD}", ""),
    ("\u{200B}", ""),
    ("\u{FEFF}", ""),
    ("\u{00A0}", " "),
    // Ligatures
    ("ﬀ", "ff"),
    ("ﬁ", "fi"),
    ("ﬂ", "fl"),
    ("ﬃ", "ffi"),
    ("ﬄ", "ffl"),
    ("ﬅ", "st"),
    ("ﬆ", "st"),
    // Typographic quotes and dashes
    ("‘", "'"),
    ("’", "'"),
    ("‚", "'"),
    ("“", "\""),
    ("”", "\""),
    ("„", "\""),
    ("‐", "-"),
    ("‑", "-"),
    ("–", "-"),
    ("—", "-"),
];

/// Glyphs PDF extraction produces for list bullets.
pub const BULLET_MARKS: &[char] = &['•', '◦', '▪', '‣', '·', '∙', '●', '○', '■', '□', '*'];

/// Non-alphanumeric characters that survive the useless character pass because a
/// later step (dots, enumerations) still needs them.
static KEPT_MARKS: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set: HashSet<char> = ['.', ')', '-'].into_iter().collect();
    set.extend(BULLET_MARKS.iter().copied());
    set
});

pub fn is_kept_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == ' ' || ch == '\n' || ch == '\t' || KEPT_MARKS.contains(&ch)
}

/// Length in characters, not bytes.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
