//! Named patterns of the question-bank text grammar.
//!
//! Every pattern is compiled once and shared. The `regex` crate has no
//! lookaround, so item boundaries are found with [`item_boundary`] and the
//! item grammar is applied to one item at a time.

use std::sync::OnceLock;

use regex::Regex;

/// Ordinal chapter marker such as `第三章`.
const CHAPTER_MARKER: &str = r"第[一二三四五六七八九十]+章";

/// `答案`, the answer-key keyword.
pub const ANSWER_KEYWORD: &str = "答案";

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("grammar pattern must compile"))
}

/// A chapter marker followed by the answer keyword, e.g. `第五章 法規 答案`.
/// The keyword may also open the next line (`第五章 法規\n答案`); only
/// whitespace can sit between the heading line and the keyword.
pub fn answer_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, &format!(r"{CHAPTER_MARKER}[^\n]*?\s*{ANSWER_KEYWORD}"))
}

/// A chapter marker followed by a title.
pub fn chapter_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, &format!(r"{CHAPTER_MARKER}\s+[^\n]+"))
}

/// A numbered item at the start of a line; the match starts at the newline.
pub fn line_item_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"\n(\d+\.)")
}

/// A paragraph break followed by a numbered item.
pub fn item_boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"\n\n\d+\.")
}

/// Item grammar: id, stem, then options `(A)`..`(D)` in order. Option D
/// runs to the end of the item.
pub fn question_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(
        &RE,
        r"(?s)(?P<id>\d+)\.\s*(?P<stem>.*?)\s*\(A\)(?P<a>.*?)\s*\(B\)(?P<b>.*?)\s*\(C\)(?P<c>.*?)\s*\(D\)(?P<d>.*)",
    )
}

/// The leading number of an item, used to report items that fail the
/// item grammar.
pub fn item_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r"^\s*(\d+)\.")
}

/// An answer-key entry: number, punctuation or spaces, letter.
pub fn answer_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compile(&RE, r#"(\d+)[.\s,"'\\]+([A-D])"#)
}
