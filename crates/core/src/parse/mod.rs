//! Text-to-question-bank extraction
//!
//! The flattened PDF text goes through four stages, each in its own module:
//!
//! 1. [`sections`]: find where the answer key starts
//! 2. [`chapters`]: cut the questions region at chapter headings
//! 3. [`questions`]: match every chapter against the item grammar
//! 4. [`answers`]: parse the answer key and merge it into the questions
//!
//! [`parse_bank_text`] runs all of them and reports what had to degrade.

pub mod answers;
pub mod chapters;
pub mod grammar;
pub mod questions;
pub mod sections;

use serde::Serialize;

use crate::bank::QuestionRecord;

pub use answers::{reconcile_answers, Alignment, AnswerEntry, ALIGNMENT_THRESHOLD};
pub use chapters::{segment_chapters, ChapterSegment};
pub use questions::{extract_questions, SegmentExtraction, SkippedItem};
pub use sections::{split_sections, SectionSplit, SplitKind};

/// Result of parsing one document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedBank {
    /// Questions in chapter order, then order of appearance, answers set.
    pub questions: Vec<QuestionRecord>,
    pub split: SectionSplit,
    pub chapters: usize,
    pub answers_parsed: usize,
    pub alignment: Alignment,
    pub skipped_items: Vec<SkippedItem>,
}

/// Run the whole extraction on a flattened document.
pub fn parse_bank_text(text: &str) -> ParsedBank {
    let split = split_sections(text);
    let segments = segment_chapters(split.questions(text));

    let mut questions = Vec::new();
    let mut skipped_items = Vec::new();
    for segment in &segments {
        let extraction = extract_questions(segment.text, &segment.title);
        questions.extend(extraction.questions);
        skipped_items.extend(extraction.skipped);
    }

    let answers = answers::parse_answers(split.answers(text));
    let alignment = reconcile_answers(&mut questions, &answers);

    ParsedBank {
        questions,
        chapters: segments.len(),
        answers_parsed: answers.len(),
        split,
        alignment,
        skipped_items,
    }
}
