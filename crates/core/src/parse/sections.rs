use serde::Serialize;

use super::grammar::{answer_heading, ANSWER_KEYWORD};

/// How the questions/answers boundary was located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "heading", rename_all = "snake_case")]
pub enum SplitKind {
    /// A combined "chapter heading + answer key" line; holds the matched line.
    ChapterAnswerHeading(String),
    /// Last bare occurrence of the answer keyword.
    AnswerKeyword,
    /// Nothing found; the whole text is the questions region.
    NotFound,
}

/// Byte offset where the answer key begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSplit {
    pub index: usize,
    pub kind: SplitKind,
}

impl SectionSplit {
    pub fn questions<'a>(&self, text: &'a str) -> &'a str {
        &text[..self.index]
    }

    pub fn answers<'a>(&self, text: &'a str) -> &'a str {
        &text[self.index..]
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self.kind, SplitKind::ChapterAnswerHeading(_))
    }
}

/// Locate the start of the answer key.
///
/// Tries the last chapter-heading-plus-answer line, then the last bare
/// answer keyword, then gives up and returns the text length so the answers
/// region is empty.
pub fn split_sections(text: &str) -> SectionSplit {
    if let Some(m) = answer_heading().find_iter(text).last() {
        return SectionSplit {
            index: m.start(),
            kind: SplitKind::ChapterAnswerHeading(m.as_str().to_string()),
        };
    }

    match text.rfind(ANSWER_KEYWORD) {
        Some(index) => SectionSplit {
            index,
            kind: SplitKind::AnswerKeyword,
        },
        None => SectionSplit {
            index: text.len(),
            kind: SplitKind::NotFound,
        },
    }
}
