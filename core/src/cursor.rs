use std::path::Path;

use crate::help::HelpLayout;
use crate::token::Argument;

/// Per-parse state: the remaining arguments, the tool name and command path
/// used in usage lines, the help printer, and the help layout.
///
/// A cursor is created by [`OptionParser::parse`](crate::OptionParser::parse)
/// and threaded by mutable reference through the recursive descent. It only
/// moves forward.
pub struct ParseCursor<'p> {
    tool_name: String,
    path: Vec<String>,
    arguments: Vec<Argument>,
    index: usize,
    printer: &'p mut dyn FnMut(&str),
    layout: &'p HelpLayout,
}

impl<'p> ParseCursor<'p> {
    pub(crate) fn new<S: AsRef<str>>(
        arguments: &[S],
        printer: &'p mut dyn FnMut(&str),
        layout: &'p HelpLayout,
    ) -> Self {
        let tool_name = arguments
            .first()
            .map(|arg0| {
                let arg0 = arg0.as_ref();
                Path::new(arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| arg0.to_string())
            })
            .unwrap_or_default();
        let arguments = arguments
            .iter()
            .skip(1)
            .map(|arg| Argument::new(arg.as_ref()))
            .collect();
        Self {
            tool_name,
            path: Vec::new(),
            arguments,
            index: 0,
            printer,
            layout,
        }
    }

    /// Name of the tool, taken from the last path component of argument 0.
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Tool name followed by the names of the enclosing named commands, as
    /// shown after `Usage:`.
    pub fn invocation(&self) -> String {
        std::iter::once(self.tool_name.as_str())
            .chain(self.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Records that dispatch descended below the command `name`.
    pub(crate) fn enter(&mut self, name: &str) {
        self.path.push(name.to_string());
    }

    pub fn layout(&self) -> &HelpLayout {
        self.layout
    }

    pub fn is_at_end(&self) -> bool {
        self.index == self.arguments.len()
    }

    pub(crate) fn peek(&self) -> Option<&Argument> {
        self.arguments.get(self.index)
    }

    /// Consumes the next argument. Returns `None` at end of input.
    pub(crate) fn accept(&mut self) -> Option<&Argument> {
        let argument = self.arguments.get(self.index)?;
        self.index += 1;
        Some(argument)
    }

    /// Hands one complete help text to the printer.
    pub fn print(&mut self, text: &str) {
        (self.printer)(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_name_is_last_path_component() {
        let layout = HelpLayout::default();
        let mut sink = |_: &str| {};
        let cursor = ParseCursor::new(&["/usr/local/bin/florb", "run"], &mut sink, &layout);
        assert_eq!(cursor.tool_name(), "florb");
        assert!(!cursor.is_at_end());
    }

    #[test]
    fn test_invocation_includes_entered_commands() {
        let layout = HelpLayout::default();
        let mut sink = |_: &str| {};
        let mut cursor = ParseCursor::new(&["florb", "remote", "add"], &mut sink, &layout);
        assert_eq!(cursor.invocation(), "florb");
        cursor.enter("remote");
        assert_eq!(cursor.invocation(), "florb remote");
    }

    #[test]
    fn test_empty_arguments() {
        let layout = HelpLayout::default();
        let mut sink = |_: &str| {};
        let args: [&str; 0] = [];
        let cursor = ParseCursor::new(&args, &mut sink, &layout);
        assert_eq!(cursor.tool_name(), "");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_accept_advances_monotonically() {
        let layout = HelpLayout::default();
        let mut sink = |_: &str| {};
        let mut cursor = ParseCursor::new(&["tool", "-a", "b"], &mut sink, &layout);
        assert_eq!(cursor.peek().map(Argument::text), Some("-a"));
        assert_eq!(cursor.accept().map(Argument::text), Some("-a"));
        assert_eq!(cursor.accept().map(Argument::text), Some("b"));
        assert!(cursor.accept().is_none());
        assert!(cursor.is_at_end());
    }
}
