//! Answer-option whitelist
//!
//! An option text is whitelisted when it is the correct option of at least
//! one question and never a wrong option of any question in the same bank.
//! Wherever a whitelisted text shows up in that bank it is safe to pick.
//! The guarantee does not carry over to other banks.
//!
//! The computation is two pure passes: [`compute_whitelist`] builds the
//! sets, [`tag_questions`] marks each record.

use std::collections::BTreeSet;

use crate::bank::{BankOutput, QuestionRecord, QuestionSource};

#[derive(Debug, thiserror::Error)]
pub enum WhitelistInputError {
    #[error("input is neither a question list nor a bank file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Option texts that were ever correct and never incorrect.
///
/// Texts are compared after trimming surrounding whitespace; everything
/// else (case, punctuation) must match exactly. A question without a usable
/// answer contributes all four options as incorrect.
pub fn compute_whitelist(questions: &[QuestionRecord]) -> BTreeSet<String> {
    let mut correct = BTreeSet::new();
    let mut incorrect = BTreeSet::new();

    for question in questions {
        let answer = question.answer.and_then(|a| a.letter());
        for (letter, text) in question.options.iter() {
            let text = text.trim();
            if Some(letter) == answer {
                correct.insert(text);
            } else {
                incorrect.insert(text);
            }
        }
    }

    correct
        .difference(&incorrect)
        .map(|text| text.to_string())
        .collect()
}

/// Whether a question's correct option is a whitelisted text.
pub fn can_memorize(question: &QuestionRecord, whitelist: &BTreeSet<String>) -> bool {
    question
        .correct_text()
        .is_some_and(|text| whitelist.contains(text.trim()))
}

/// Set `can_memorize_directly` on every question.
pub fn tag_questions(questions: &mut [QuestionRecord], whitelist: &BTreeSet<String>) {
    for question in questions.iter_mut() {
        question.can_memorize_directly = can_memorize(question, whitelist);
    }
}

/// Compute the whitelist, tag the questions and assemble the bank file.
pub fn build_bank_output(mut questions: Vec<QuestionRecord>) -> BankOutput {
    let whitelist = compute_whitelist(&questions);
    tag_questions(&mut questions, &whitelist);

    BankOutput {
        answer_option_whitelist: whitelist.into_iter().collect(),
        questions,
    }
}

/// Rebuild a bank from JSON holding either a bare question list or a
/// previously written bank file. Any existing whitelist and tags are ignored.
pub fn rebuild_from_json(input: &str) -> Result<BankOutput, WhitelistInputError> {
    let source: QuestionSource = serde_json::from_str(input)?;
    Ok(build_bank_output(source.into_questions()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::fixtures::question;
    use crate::bank::{Answer, OptionLetter};
    use crate::parse::parse_bank_text;

    fn letter(l: OptionLetter) -> Option<Answer> {
        Some(Answer::Letter(l))
    }

    #[test]
    fn test_text_correct_and_incorrect_is_excluded() {
        let questions = vec![
            question(1, ["opt1", "opt2", "opt3", "opt4"], letter(OptionLetter::A)),
            question(2, ["opt5", "opt1", "opt6", "opt7"], letter(OptionLetter::C)),
        ];

        let whitelist = compute_whitelist(&questions);

        assert!(!whitelist.contains("opt1"));
        assert!(whitelist.contains("opt6"));
        assert_eq!(whitelist.len(), 1);
    }

    #[test]
    fn test_whitelist_never_contains_incorrect_text() {
        let questions = vec![
            question(1, ["甲", "乙", "丙", "丁"], letter(OptionLetter::A)),
            question(2, ["乙", "甲", "戊", "己"], letter(OptionLetter::A)),
            question(3, ["庚", "辛", "壬", "甲"], letter(OptionLetter::B)),
            question(4, ["a", "b", "c", "d"], Some(Answer::NotFound)),
        ];

        let whitelist = compute_whitelist(&questions);

        for q in &questions {
            let answer = q.answer.and_then(|a| a.letter());
            for (l, text) in q.options.iter() {
                if Some(l) != answer {
                    assert!(!whitelist.contains(text.trim()), "{text} is incorrect somewhere");
                }
            }
        }
        assert_eq!(whitelist.into_iter().collect::<Vec<_>>(), vec!["辛"]);
    }

    #[test]
    fn test_comparison_trims_whitespace_only() {
        let questions = vec![
            question(1, [" 是 ", "否", "x", "y"], letter(OptionLetter::A)),
            question(2, ["是", "Yes", "z", "w"], letter(OptionLetter::B)),
            question(3, ["yes", "q", "r", "s"], letter(OptionLetter::B)),
        ];

        let whitelist = compute_whitelist(&questions);

        assert!(whitelist.contains("Yes"));
        assert!(!whitelist.contains("是"));
        assert!(!whitelist.contains("yes"));
    }

    #[test]
    fn test_tagging_both_directions() {
        let mut questions = vec![
            question(1, ["唯一正解", "錯1", "錯2", "錯3"], letter(OptionLetter::A)),
            question(2, ["錯1", "錯4", "錯5", "錯6"], letter(OptionLetter::A)),
            question(3, ["x", "y", "z", "w"], Some(Answer::NotFound)),
            question(4, ["p", "q", "r", "s"], None),
        ];

        let whitelist = compute_whitelist(&questions);
        tag_questions(&mut questions, &whitelist);

        assert!(questions[0].can_memorize_directly);
        assert!(!questions[1].can_memorize_directly);
        assert!(!questions[2].can_memorize_directly);
        assert!(!questions[3].can_memorize_directly);

        for q in &questions {
            let expected = q
                .correct_text()
                .is_some_and(|t| whitelist.contains(t.trim()));
            assert_eq!(q.can_memorize_directly, expected);
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let questions = vec![
            question(1, ["甲", "乙", "丙", "丁"], letter(OptionLetter::C)),
            question(2, ["丙", "戊", "己", "庚"], letter(OptionLetter::A)),
            question(3, ["辛", "甲", "壬", "癸"], letter(OptionLetter::D)),
        ];

        let first = build_bank_output(questions);
        let second = build_bank_output(first.questions.clone());

        assert_eq!(first, second);
    }

    #[test]
    fn test_whitelist_is_sorted() {
        let questions = vec![
            question(1, ["b", "x1", "x2", "x3"], letter(OptionLetter::A)),
            question(2, ["a", "x1", "x2", "x3"], letter(OptionLetter::A)),
            question(3, ["c", "x1", "x2", "x3"], letter(OptionLetter::A)),
        ];

        let bank = build_bank_output(questions);

        assert_eq!(bank.answer_option_whitelist, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_end_to_end_from_text() {
        let text = "1. 題目A (A)opt1 (B)opt2 (C)opt3 (D)opt4\n\n\
                    2. 題目B (A)opt5 (B)opt1 (C)opt6 (D)opt7\n\
                    答案\n1. A 2. C";

        let parsed = parse_bank_text(text);
        let bank = build_bank_output(parsed.questions);

        assert_eq!(bank.questions.len(), 2);
        assert_eq!(bank.questions[0].correct_text(), Some("opt1"));
        // opt1 is correct in question 1 but a wrong option in question 2.
        assert!(!bank.answer_option_whitelist.contains(&"opt1".to_string()));
        assert!(!bank.questions[0].can_memorize_directly);
        assert_eq!(bank.answer_option_whitelist, vec!["opt6"]);
        assert!(bank.questions[1].can_memorize_directly);
    }

    #[test]
    fn test_empty_bank() {
        let bank = build_bank_output(Vec::new());
        assert!(bank.answer_option_whitelist.is_empty());
        assert!(bank.questions.is_empty());
    }

    #[test]
    fn test_rebuild_from_bare_list() {
        let input = r#"[
            {"id": 1, "question": "q", "options": {"A": "對", "B": "錯", "C": "x", "D": "y"},
             "answer": "A", "chapter": "第一章 概論"},
            {"id": 2, "question": "r", "options": {"A": "錯", "B": "z", "C": "w", "D": "v"},
             "answer": "未找到", "chapter": "第一章 概論"}
        ]"#;

        let bank = rebuild_from_json(input).unwrap();

        assert_eq!(bank.answer_option_whitelist, vec!["對"]);
        assert!(bank.questions[0].can_memorize_directly);
        assert!(!bank.questions[1].can_memorize_directly);
    }

    #[test]
    fn test_rebuild_from_bank_file_ignores_stale_tags() {
        let stale = BankOutput {
            answer_option_whitelist: vec!["stale".to_string()],
            questions: vec![{
                let mut q = question(1, ["甲", "乙", "丙", "丁"], letter(OptionLetter::B));
                q.can_memorize_directly = false;
                q
            }],
        };
        let input = serde_json::to_string(&stale).unwrap();

        let bank = rebuild_from_json(&input).unwrap();

        assert_eq!(bank.answer_option_whitelist, vec!["乙"]);
        assert!(bank.questions[0].can_memorize_directly);
    }

    #[test]
    fn test_rebuild_rejects_unknown_shape() {
        assert!(rebuild_from_json(r#"{"items": []}"#).is_err());
        assert!(rebuild_from_json(r#"[{"id": 1, "answer": "E"}]"#).is_err());
    }
}
