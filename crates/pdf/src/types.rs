use serde::{Deserialize, Serialize};

/// Normalized text of one page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number.
    pub number: u32,
    pub text: String,
}

/// Page-ordered text of a whole document.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub pages: Vec<PageText>,
    /// Pages whose text could not be extracted; they contribute nothing.
    pub failed_pages: Vec<u32>,
}

impl ExtractedText {
    pub fn page_count(&self) -> usize {
        self.pages.len() + self.failed_pages.len()
    }

    /// All non-empty pages joined with a newline, in page order.
    ///
    /// Columns, tables and other layout are not preserved.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .filter(|page| !page.text.is_empty())
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, text: &str) -> PageText {
        PageText {
            number,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_full_text_joins_pages_with_newline() {
        let doc = ExtractedText {
            pages: vec![page(1, "第一頁"), page(2, ""), page(3, "第三頁")],
            failed_pages: vec![4],
        };

        assert_eq!(doc.full_text(), "第一頁\n第三頁");
        assert_eq!(doc.page_count(), 4);
    }

    #[test]
    fn test_full_text_empty_document() {
        assert_eq!(ExtractedText::default().full_text(), "");
    }
}
