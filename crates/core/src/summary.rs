use std::collections::BTreeSet;

use serde::Serialize;

use crate::bank::{Answer, BankOutput};

/// Option text meaning "all of the above".
pub const ALL_OF_THE_ABOVE: &str = "以上皆是";

/// How "all of the above" options behave in a bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AllAboveStats {
    /// Questions with at least one option containing [`ALL_OF_THE_ABOVE`].
    pub questions_with_option: usize,
    /// Of those, questions whose correct option contains it.
    pub answer_is_all_above: usize,
}

impl AllAboveStats {
    /// Questions where picking "all of the above" would be wrong.
    pub fn traps(&self) -> usize {
        self.questions_with_option - self.answer_is_all_above
    }
}

/// Counts reported after a bank is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BankSummary {
    pub total_questions: usize,
    pub chapters: usize,
    pub answers_not_found: usize,
    pub whitelist_size: usize,
    pub memorizable: usize,
    pub needs_judgement: usize,
    pub all_above: AllAboveStats,
}

pub fn summarize(bank: &BankOutput) -> BankSummary {
    let questions = &bank.questions;

    let chapters: BTreeSet<&str> = questions.iter().map(|q| q.chapter.as_str()).collect();
    let memorizable = questions.iter().filter(|q| q.can_memorize_directly).count();
    let answers_not_found = questions
        .iter()
        .filter(|q| !matches!(q.answer, Some(Answer::Letter(_))))
        .count();

    let mut all_above = AllAboveStats::default();
    for question in questions {
        if question
            .options
            .iter()
            .any(|(_, text)| text.contains(ALL_OF_THE_ABOVE))
        {
            all_above.questions_with_option += 1;
            if question
                .correct_text()
                .is_some_and(|text| text.contains(ALL_OF_THE_ABOVE))
            {
                all_above.answer_is_all_above += 1;
            }
        }
    }

    BankSummary {
        total_questions: questions.len(),
        chapters: chapters.len(),
        answers_not_found,
        whitelist_size: bank.answer_option_whitelist.len(),
        memorizable,
        needs_judgement: questions.len() - memorizable,
        all_above,
    }
}
