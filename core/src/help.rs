//! Help text layout.
//!
//! Every table entry is a two-column line: the usage label padded to
//! [`HelpLayout::usage_column_width`], then the first doc line. Labels wider
//! than the column get a line of their own, and all doc lines move below.
//!
//! ```text
//!   -a         A test flag.
//!   -a-flag-with-a-long-name
//!              Another test flag.
//! ```

use serde::{Deserialize, Serialize};

/// Presentation settings for rendered help.
///
/// Deserializes from partial input; missing fields take their default.
///
/// # Examples
///
/// ```
/// use option_schema_core::HelpLayout;
///
/// let layout = HelpLayout::default();
/// assert_eq!(layout.indent, "  ");
/// assert_eq!(layout.usage_column_width, 10);
/// assert_eq!(layout.doc_column(), 13);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpLayout {
    /// Prefix of every entry line.
    pub indent: String,
    /// Text between the usage column and the doc column.
    pub column_separator: String,
    /// Width the usage label is padded to.
    pub usage_column_width: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            column_separator: " ".to_string(),
            usage_column_width: 10,
        }
    }
}

impl HelpLayout {
    /// Column at which documentation text starts.
    pub fn doc_column(&self) -> usize {
        self.indent.chars().count()
            + self.usage_column_width
            + self.column_separator.chars().count()
    }

    /// Renders one table entry as a list of lines.
    ///
    /// Every `\n` in `docs` starts a new doc line, so empty docs still give a
    /// wide label one blank doc line.
    pub(crate) fn entry(&self, usage: &str, docs: &str) -> Vec<String> {
        let doc_indent = " ".repeat(self.doc_column());
        let mut doc_lines = docs.split('\n');
        let mut lines = Vec::new();

        if usage.chars().count() <= self.usage_column_width {
            let first = doc_lines.next().unwrap_or_default();
            lines.push(format!(
                "{}{:<width$}{}{}",
                self.indent,
                usage,
                self.column_separator,
                first,
                width = self.usage_column_width
            ));
        } else {
            lines.push(format!("{}{}", self.indent, usage));
        }
        lines.extend(doc_lines.map(|line| format!("{doc_indent}{line}")));
        lines
    }
}

/// Accumulates the lines of one help screen.
#[derive(Debug)]
pub(crate) struct HelpWriter<'a> {
    layout: &'a HelpLayout,
    lines: Vec<String>,
}

impl<'a> HelpWriter<'a> {
    pub(crate) fn new(layout: &'a HelpLayout, usage: String) -> Self {
        Self {
            layout,
            lines: vec![usage],
        }
    }

    pub(crate) fn docs(&mut self, docs: &str) {
        if !docs.is_empty() {
            self.lines.extend(docs.split('\n').map(String::from));
        }
    }

    /// Writes a titled table; nothing is written for an empty table.
    pub(crate) fn section<'e>(
        &mut self,
        title: &str,
        entries: impl IntoIterator<Item = (&'e str, &'e str)>,
    ) {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return;
        }
        self.lines.push(String::new());
        self.lines.push(title.to_string());
        for (usage, docs) in entries {
            self.lines.extend(self.layout.entry(usage, docs));
        }
    }

    pub(crate) fn finish(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_shares_line() {
        let layout = HelpLayout::default();
        assert_eq!(
            layout.entry("-a", "A test flag."),
            vec!["  -a         A test flag."]
        );
        assert_eq!(
            layout.entry("-a[=<int>]", "Integer value."),
            vec!["  -a[=<int>] Integer value."]
        );
    }

    #[test]
    fn test_long_label_wraps_docs() {
        let layout = HelpLayout::default();
        assert_eq!(
            layout.entry("-c=<string>", "String value."),
            vec!["  -c=<string>", "             String value."]
        );
    }

    #[test]
    fn test_multiline_docs_are_indented() {
        let layout = HelpLayout::default();
        assert_eq!(
            layout.entry("-c", "First line.\nSecond line."),
            vec!["  -c         First line.", "             Second line."]
        );
    }

    #[test]
    fn test_long_label_with_empty_docs_keeps_blank_doc_line() {
        let layout = HelpLayout::default();
        assert_eq!(
            layout.entry("-c=<string>", ""),
            vec!["  -c=<string>", "             "]
        );
        assert_eq!(layout.entry("-c", ""), vec!["  -c         "]);
    }

    #[test]
    fn test_trailing_newline_in_docs_adds_blank_line() {
        let layout = HelpLayout::default();
        assert_eq!(
            layout.entry("-c", "First line.\n"),
            vec!["  -c         First line.", "             "]
        );
        assert_eq!(
            layout.entry("-c=<string>", "First line.\n"),
            vec!["  -c=<string>", "             First line.", "             "]
        );
    }

    #[test]
    fn test_docs_keep_trailing_newline() {
        let layout = HelpLayout::default();
        let mut writer = HelpWriter::new(&layout, "Usage: tool".into());
        writer.docs("Does things.\n");
        assert_eq!(writer.finish(), "Usage: tool\nDoes things.\n");
    }

    #[test]
    fn test_empty_section_is_omitted() {
        let layout = HelpLayout::default();
        let mut writer = HelpWriter::new(&layout, "Usage: tool".into());
        writer.section("Commands:", std::iter::empty());
        assert_eq!(writer.finish(), "Usage: tool");
    }

    #[test]
    fn test_layout_deserializes_partially() {
        let layout: HelpLayout = serde_json::from_str(r#"{"usage_column_width": 4}"#).unwrap();
        assert_eq!(layout.usage_column_width, 4);
        assert_eq!(layout.indent, "  ");
        assert_eq!(layout.entry("-ab", "Docs."), vec!["  -ab  Docs."]);
        assert_eq!(
            layout.entry("-abcd=x", "Docs."),
            vec!["  -abcd=x", "       Docs."]
        );
    }
}
