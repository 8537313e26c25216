//! The root of a command tree.

use std::ffi::OsString;

use tracing::debug;

use crate::command::{Command, HelpCommand};
use crate::cursor::ParseCursor;
use crate::error::{Result, SchemaError};
use crate::help::HelpLayout;
use crate::option::OptionSpec;
use crate::parameter::ParameterSpec;
use crate::syntax::{Child, Construct, Syntax, completion};

type Action<R> = Box<dyn Fn(R) -> Result<()> + Send + Sync>;

/// A complete, immutable command-line schema.
///
/// Every parse starts from a clone of the initial record, so one parser can
/// be shared across threads and used any number of times.
///
/// # Examples
///
/// ```
/// use option_schema_core::{OptionParser, OptionSpec, ParameterSpec};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Options {
///     count: u32,
///     files: Vec<String>,
/// }
///
/// let parsed = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&parsed);
/// let parser = OptionParser::builder("Count some files.", Options::default())
///     .with_option(OptionSpec::value("n", "<count>", "How many.", |o: &mut Options, v: u32| {
///         o.count = v
///     }))
///     .with_parameter(ParameterSpec::repeating("<file>", "Inputs.", |o: &mut Options| {
///         &mut o.files
///     }))
///     .with_action(move |o: Options| {
///         sink.lock().unwrap().push(o);
///         Ok(())
///     })
///     .build()
///     .unwrap();
///
/// parser.parse(&["count", "-n=3", "a", "b"], |_| {}).unwrap();
/// assert_eq!(
///     parsed.lock().unwrap()[0],
///     Options { count: 3, files: vec!["a".into(), "b".into()] }
/// );
///
/// let err = parser.parse(&["count", "-n"], |_| {}).unwrap_err();
/// assert_eq!(err.to_string(), "Option -n requires a value");
/// ```
pub struct OptionParser<R> {
    syntax: Syntax<(), R>,
    action: Option<Action<R>>,
    layout: HelpLayout,
}

impl<R: Clone + Send + Sync + 'static> OptionParser<R> {
    /// Starts a parser whose records begin as clones of `initial`.
    pub fn builder(docs: impl Into<String>, initial: R) -> ParserBuilder<R> {
        ParserBuilder {
            docs: docs.into(),
            initial,
            options: Vec::new(),
            parameters: Vec::new(),
            commands: Vec::new(),
            action: None,
            layout: HelpLayout::default(),
        }
    }

    /// Parses `arguments`, whose first element is the tool's path.
    ///
    /// Help text is handed to `printer`, one complete screen per call. On
    /// success exactly one of these happened: a completion action ran, an
    /// action option ran, or help was printed.
    pub fn parse<S: AsRef<str>>(
        &self,
        arguments: &[S],
        mut printer: impl FnMut(&str),
    ) -> Result<()> {
        let mut cursor = ParseCursor::new(arguments, &mut printer, &self.layout);
        debug!(
            tool = cursor.tool_name(),
            arguments = arguments.len().saturating_sub(1),
            "Parsing command line"
        );
        match &self.action {
            Some(action) => {
                let complete = completion(|record: R, _: &mut ParseCursor<'_>| action(record));
                self.syntax.parse(&mut cursor, (), Some(&complete))
            }
            None => self.syntax.parse(&mut cursor, (), None),
        }
    }

    /// Parses the process arguments, printing help to stdout. Arguments that
    /// are not valid UTF-8 are read lossily and fail like any other bad
    /// argument.
    pub fn parse_env(&self) -> Result<()> {
        let arguments = lossy_arguments(std::env::args_os());
        self.parse(arguments.as_slice(), |text| println!("{text}"))
    }

    /// Renders the root help as it would be printed for `tool_name`.
    pub fn render_help(&self, tool_name: &str) -> String {
        self.syntax.render_help(tool_name, &self.layout)
    }

    /// Root options in declaration order. The synthesized `-help` comes
    /// last.
    pub fn options(&self) -> &[OptionSpec<R>] {
        self.syntax.options()
    }
}

/// Converts process arguments to strings, replacing invalid UTF-8 sequences
/// with U+FFFD.
fn lossy_arguments(raw: impl IntoIterator<Item = OsString>) -> Vec<String> {
    raw.into_iter()
        .map(|argument| argument.to_string_lossy().into_owned())
        .collect()
}

/// Builder for [`OptionParser`].
pub struct ParserBuilder<R> {
    docs: String,
    initial: R,
    options: Vec<OptionSpec<R>>,
    parameters: Vec<ParameterSpec<R>>,
    commands: Vec<Box<dyn Command<R>>>,
    action: Option<Action<R>>,
    layout: HelpLayout,
}

impl<R: Clone + Send + Sync + 'static> ParserBuilder<R> {
    pub fn with_option(mut self, option: OptionSpec<R>) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec<R>) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_command<C>(mut self, command: C) -> Self
    where
        C: Command<R> + 'static,
    {
        self.commands.push(Box::new(command));
        self
    }

    /// Sets the action run with the finished record when no subcommand was
    /// dispatched to.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(R) -> Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn with_help_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Validates the tree root and assembles the parser. A root with
    /// subcommands gains a `help` command unless it declares one.
    pub fn build(self) -> std::result::Result<OptionParser<R>, SchemaError> {
        let mut children: Vec<Child<R>> = self.commands.into_iter().map(Child::Command).collect();
        if !children.is_empty() && !children.iter().any(|child| child.name() == "help") {
            children.push(Child::Help(HelpCommand::new()?));
        }

        let initial = self.initial;
        let construct: Construct<(), R> = Box::new(move |(): ()| initial.clone());
        let syntax = Syntax::new(
            None,
            self.docs,
            construct,
            self.options,
            self.parameters,
            children,
        )?;
        debug!(layout = ?self.layout, "Built option parser");

        Ok(OptionParser {
            syntax,
            action: self.action,
            layout: self.layout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_arguments_keep_valid_text() {
        let raw = vec![OsString::from("tool"), OsString::from("-name=välue")];
        assert_eq!(lossy_arguments(raw), vec!["tool", "-name=välue"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_lossy_arguments_replace_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let invalid = OsString::from_vec(vec![b'-', b'x', 0xff]);
        let raw = vec![OsString::from("tool"), invalid];
        assert_eq!(lossy_arguments(raw), vec!["tool", "-x\u{FFFD}"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_invalid_utf8_argument_fails_as_parse_error() {
        use std::os::unix::ffi::OsStringExt;

        let parser = OptionParser::builder("Takes nothing.", ())
            .with_action(|()| Ok(()))
            .build()
            .unwrap();
        let raw = vec![OsString::from("tool"), OsString::from_vec(vec![0xff])];
        let arguments = lossy_arguments(raw);
        let err = parser.parse(arguments.as_slice(), |_| {}).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected argument '\u{FFFD}'");
    }
}
