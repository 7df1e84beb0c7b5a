use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chapter title used when a questions region has no chapter heading.
pub const UNKNOWN_CHAPTER: &str = "未知章節";

/// Serialized form of [`Answer::NotFound`].
pub const NOT_FOUND: &str = "未找到";

/// One of the four option markers `(A)`..`(D)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLetter::A => "A",
            OptionLetter::B => "B",
            OptionLetter::C => "C",
            OptionLetter::D => "D",
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid answer value: {0:?}")]
pub struct InvalidAnswer(pub String);

/// The answer assigned to a question by the reconciler.
///
/// Serialized as the bare letter or as the [`NOT_FOUND`] sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Answer {
    Letter(OptionLetter),
    NotFound,
}

impl Answer {
    pub fn letter(&self) -> Option<OptionLetter> {
        match self {
            Answer::Letter(letter) => Some(*letter),
            Answer::NotFound => None,
        }
    }
}

impl TryFrom<String> for Answer {
    type Error = InvalidAnswer;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == NOT_FOUND {
            return Ok(Answer::NotFound);
        }
        let mut chars = value.chars();
        match (chars.next().and_then(OptionLetter::from_char), chars.next()) {
            (Some(letter), None) => Ok(Answer::Letter(letter)),
            _ => Err(InvalidAnswer(value)),
        }
    }
}

impl From<Answer> for String {
    fn from(answer: Answer) -> Self {
        answer.to_string()
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Letter(letter) => write!(f, "{letter}"),
            Answer::NotFound => write!(f, "{NOT_FOUND}"),
        }
    }
}

/// The four option texts of a question, keyed `A`..`D` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl Options {
    pub fn get(&self, letter: OptionLetter) -> &str {
        match letter {
            OptionLetter::A => &self.a,
            OptionLetter::B => &self.b,
            OptionLetter::C => &self.c,
            OptionLetter::D => &self.d,
        }
    }

    /// Options in letter order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionLetter, &str)> + '_ {
        OptionLetter::ALL
            .into_iter()
            .map(move |letter| (letter, self.get(letter)))
    }
}

/// One exam question as extracted from the PDF.
///
/// `id` is the number printed in the document and restarts per chapter;
/// only the position in [`BankOutput::questions`] identifies a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u32,
    pub question: String,
    pub options: Options,
    #[serde(default)]
    pub answer: Option<Answer>,
    pub chapter: String,
    #[serde(default)]
    pub can_memorize_directly: bool,
}

impl QuestionRecord {
    /// Text of the option the answer points at, if it points at one.
    pub fn correct_text(&self) -> Option<&str> {
        self.answer
            .and_then(|answer| answer.letter())
            .map(|letter| self.options.get(letter))
    }
}

/// The persisted artifact for one bank variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankOutput {
    pub answer_option_whitelist: Vec<String>,
    pub questions: Vec<QuestionRecord>,
}

/// Input accepted by the standalone whitelist command: either a bare list of
/// questions or a previously written bank file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionSource {
    Bank(BankOutput),
    List(Vec<QuestionRecord>),
}

impl QuestionSource {
    pub fn into_questions(self) -> Vec<QuestionRecord> {
        match self {
            QuestionSource::Bank(bank) => bank.questions,
            QuestionSource::List(questions) => questions,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn question(id: u32, options: [&str; 4], answer: Option<Answer>) -> QuestionRecord {
        QuestionRecord {
            id,
            question: format!("題目{id}"),
            options: Options {
                a: options[0].to_string(),
                b: options[1].to_string(),
                c: options[2].to_string(),
                d: options[3].to_string(),
            },
            answer,
            chapter: UNKNOWN_CHAPTER.to_string(),
            can_memorize_directly: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_serializes_letter_and_sentinel() {
        assert_eq!(
            serde_json::to_string(&Answer::Letter(OptionLetter::C)).unwrap(),
            "\"C\""
        );
        assert_eq!(
            serde_json::to_string(&Answer::NotFound).unwrap(),
            "\"未找到\""
        );
    }

    #[test]
    fn test_answer_rejects_unknown_values() {
        assert!(serde_json::from_str::<Answer>("\"E\"").is_err());
        assert!(serde_json::from_str::<Answer>("\"AB\"").is_err());
        assert!(serde_json::from_str::<Answer>("\"\"").is_err());
        assert_eq!(
            serde_json::from_str::<Answer>("\"未找到\"").unwrap(),
            Answer::NotFound
        );
    }

    #[test]
    fn test_question_record_wire_shape() {
        let q = fixtures::question(
            3,
            ["甲", "乙", "丙", "丁"],
            Some(Answer::Letter(OptionLetter::B)),
        );
        let value = serde_json::to_value(&q).unwrap();

        assert_eq!(value["id"], 3);
        assert_eq!(value["answer"], "B");
        assert_eq!(value["options"]["A"], "甲");
        assert_eq!(value["options"]["D"], "丁");
        assert_eq!(value["can_memorize_directly"], false);
        assert_eq!(value["options"].as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_unset_answer_serializes_as_null() {
        let q = fixtures::question(1, ["a", "b", "c", "d"], None);
        let value = serde_json::to_value(&q).unwrap();
        assert!(value["answer"].is_null());
    }

    #[test]
    fn test_options_missing_key_is_rejected() {
        let json = r#"{"A":"1","B":"2","C":"3"}"#;
        assert!(serde_json::from_str::<Options>(json).is_err());
    }

    #[test]
    fn test_correct_text() {
        let q = fixtures::question(
            1,
            ["a", "b", "c", "d"],
            Some(Answer::Letter(OptionLetter::D)),
        );
        assert_eq!(q.correct_text(), Some("d"));

        let q = fixtures::question(1, ["a", "b", "c", "d"], Some(Answer::NotFound));
        assert_eq!(q.correct_text(), None);
    }

    #[test]
    fn test_question_source_accepts_both_shapes() {
        let list = r#"[{"id":1,"question":"q","options":{"A":"a","B":"b","C":"c","D":"d"},"answer":"A","chapter":"c"}]"#;
        let bank = format!(r#"{{"answer_option_whitelist":[],"questions":{list}}}"#);

        let from_list: QuestionSource = serde_json::from_str(list).unwrap();
        let from_bank: QuestionSource = serde_json::from_str(&bank).unwrap();

        assert_eq!(from_list.into_questions().len(), 1);
        assert_eq!(from_bank.into_questions().len(), 1);
    }
}
