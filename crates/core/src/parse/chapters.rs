use super::grammar::chapter_heading;
use crate::bank::UNKNOWN_CHAPTER;

/// The text of one chapter, borrowed from the questions region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSegment<'a> {
    pub title: String,
    pub text: &'a str,
}

/// Split the questions region at chapter headings.
///
/// A segment runs from the end of its heading to the start of the next
/// heading. Text before the first heading belongs to no chapter and is
/// dropped. Without any heading the whole region is one segment titled
/// [`UNKNOWN_CHAPTER`].
pub fn segment_chapters(questions: &str) -> Vec<ChapterSegment<'_>> {
    let headings: Vec<_> = chapter_heading().find_iter(questions).collect();

    if headings.is_empty() {
        return vec![ChapterSegment {
            title: UNKNOWN_CHAPTER.to_string(),
            text: questions,
        }];
    }

    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let end = headings
                .get(i + 1)
                .map_or(questions.len(), |next| next.start());
            ChapterSegment {
                title: heading.as_str().trim().to_string(),
                text: &questions[heading.end()..end],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_headings_yields_unknown_chapter() {
        let segments = segment_chapters("1. 題目 (A)a (B)b (C)c (D)d");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].title, UNKNOWN_CHAPTER);
        assert_eq!(segments[0].text, "1. 題目 (A)a (B)b (C)c (D)d");
    }

    #[test]
    fn test_segments_span_between_headings() {
        let text = "封面\n第一章 無人機概論\n1. 甲\n第二章 飛航法規\n1. 乙\n2. 丙\n";
        let segments = segment_chapters(text);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].title, "第一章 無人機概論");
        assert_eq!(segments[0].text, "\n1. 甲\n");
        assert_eq!(segments[1].title, "第二章 飛航法規");
        assert_eq!(segments[1].text, "\n1. 乙\n2. 丙\n");
    }

    #[test]
    fn test_heading_at_end_yields_empty_segment() {
        let segments = segment_chapters("第三章 氣象");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].title, "第三章 氣象");
        assert_eq!(segments[0].text, "");
    }
}
