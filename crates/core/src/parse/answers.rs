use std::collections::HashMap;

use serde::Serialize;

use super::grammar::answer_entry;
use crate::bank::{Answer, OptionLetter, QuestionRecord};

/// Largest question/answer count difference still aligned by position.
pub const ALIGNMENT_THRESHOLD: usize = 20;

/// One `number + letter` pair from the answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerEntry {
    pub number: u64,
    pub letter: OptionLetter,
}

/// Strategy used to merge answers into questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// The i-th question takes the i-th parsed letter.
    Positional,
    /// Each question looks up its printed id.
    IdMapped,
}

/// Parse the answer key into ordered entries.
pub fn parse_answers(answers_region: &str) -> Vec<AnswerEntry> {
    let flattened = answers_region.replace('\n', " ");

    answer_entry()
        .captures_iter(&flattened)
        .filter_map(|caps| {
            let number = caps[1].parse::<u64>().ok()?;
            let letter = caps[2].chars().next().and_then(OptionLetter::from_char)?;
            Some(AnswerEntry { number, letter })
        })
        .collect()
}

/// Whether printed ids never decrease across the whole question list.
pub fn ids_non_decreasing(questions: &[QuestionRecord]) -> bool {
    questions.windows(2).all(|pair| pair[0].id <= pair[1].id)
}

/// Pick the alignment strategy.
///
/// Id mapping is only trusted when the counts disagree by more than
/// [`ALIGNMENT_THRESHOLD`], at least one answer was parsed, and ids never
/// decrease over the whole list. Chapter-local ids restart at 1, so any
/// multi-chapter bank fails the last check and stays positional.
pub fn choose_alignment(questions: &[QuestionRecord], answers: &[AnswerEntry]) -> Alignment {
    let discrepancy = questions.len().abs_diff(answers.len());

    if discrepancy > ALIGNMENT_THRESHOLD && !answers.is_empty() && ids_non_decreasing(questions)
    {
        Alignment::IdMapped
    } else {
        Alignment::Positional
    }
}

/// Set `answer` on every question and report the strategy used.
///
/// Questions that cannot be resolved get [`Answer::NotFound`]; none are
/// dropped.
pub fn reconcile_answers(questions: &mut [QuestionRecord], answers: &[AnswerEntry]) -> Alignment {
    let alignment = choose_alignment(questions, answers);

    match alignment {
        Alignment::Positional => {
            for (i, question) in questions.iter_mut().enumerate() {
                question.answer = Some(
                    answers
                        .get(i)
                        .map_or(Answer::NotFound, |entry| Answer::Letter(entry.letter)),
                );
            }
        }
        Alignment::IdMapped => {
            // Later entries overwrite earlier ones with the same number.
            let by_number: HashMap<u64, OptionLetter> = answers
                .iter()
                .map(|entry| (entry.number, entry.letter))
                .collect();

            for question in questions.iter_mut() {
                question.answer = Some(
                    by_number
                        .get(&u64::from(question.id))
                        .map_or(Answer::NotFound, |letter| Answer::Letter(*letter)),
                );
            }
        }
    }

    alignment
}
