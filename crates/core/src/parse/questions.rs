use serde::Serialize;

use super::grammar::{item_boundary, item_number, line_item_start, question_item};
use crate::bank::{Options, QuestionRecord};

const PREVIEW_CHARS: usize = 40;

/// A numbered item that did not fit the question grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub chapter: String,
    pub id: String,
    pub preview: String,
}

/// Questions found in one chapter segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentExtraction {
    pub questions: Vec<QuestionRecord>,
    pub skipped: Vec<SkippedItem>,
}

/// Put a blank line in front of every line that starts with `digits.`.
///
/// PDF text extraction often collapses the blank line between items, which
/// would leave the item boundary ambiguous.
pub fn insert_item_breaks(segment: &str) -> String {
    line_item_start()
        .replace_all(segment, "\n\n$1")
        .into_owned()
}

/// Cut a normalized segment at each `\n\n<digits>.` boundary.
fn split_items(normalized: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;

    for boundary in item_boundary().find_iter(normalized) {
        items.push(&normalized[start..boundary.start()]);
        start = boundary.start();
    }
    items.push(&normalized[start..]);

    items.into_iter().filter(|item| !item.trim().is_empty()).collect()
}

/// Drop line breaks and surrounding whitespace from a captured field.
fn clean_field(raw: &str) -> String {
    raw.trim().replace(['\n', '\r'], "")
}

fn preview(item: &str) -> String {
    item.trim().chars().take(PREVIEW_CHARS).collect::<String>().replace('\n', " ")
}

/// Match one item against the question grammar.
fn parse_item(item: &str, chapter: &str) -> Option<QuestionRecord> {
    let caps = question_item().captures(item)?;
    let id = caps["id"].parse::<u32>().ok()?;

    Some(QuestionRecord {
        id,
        question: clean_field(&caps["stem"]),
        options: Options {
            a: clean_field(&caps["a"]),
            b: clean_field(&caps["b"]),
            c: clean_field(&caps["c"]),
            d: clean_field(&caps["d"]),
        },
        answer: None,
        chapter: chapter.to_string(),
        can_memorize_directly: false,
    })
}

/// Extract the questions of one chapter segment, in order of appearance.
///
/// Ids are kept as printed. Items that start with a number but lack the
/// four options are reported in [`SegmentExtraction::skipped`]; text that
/// is not a numbered item (page headers, preamble) is ignored.
pub fn extract_questions(segment: &str, chapter: &str) -> SegmentExtraction {
    let normalized = insert_item_breaks(segment);
    let mut extraction = SegmentExtraction::default();

    for item in split_items(&normalized) {
        match parse_item(item, chapter) {
            Some(question) => extraction.questions.push(question),
            None => {
                if let Some(caps) = item_number().captures(item) {
                    extraction.skipped.push(SkippedItem {
                        chapter: chapter.to_string(),
                        id: caps[1].to_string(),
                        preview: preview(item),
                    });
                }
            }
        }
    }

    extraction
}
