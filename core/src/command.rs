//! Subcommands.
//!
//! A subcommand is a named node whose record is derived from its parent's
//! record when it is dispatched to. [`CommandSpec`] is the declarative
//! implementation built with [`CommandBuilder`]; the [`Command`] trait is the
//! seam a parent uses to reach children of any record type.

use crate::cursor::ParseCursor;
use crate::error::{ParseError, Result, SchemaError};
use crate::help::HelpLayout;
use crate::option::OptionSpec;
use crate::parameter::ParameterSpec;
use crate::syntax::{Child, Construct, Syntax, completion};

type Action<R> = Box<dyn Fn(R) -> Result<()> + Send + Sync>;

/// A child of a node whose record type is `P`.
pub trait Command<P>: Send + Sync {
    /// Name matched against the first positional argument of the parent.
    fn name(&self) -> &str;

    /// One-line description shown in the parent's `Commands:` table.
    fn docs(&self) -> &str;

    /// Parses the rest of the input, starting from the parent's record.
    fn parse(&self, cursor: &mut ParseCursor<'_>, parent: P) -> Result<()>;

    /// Renders this command's help. `invocation` is the tool name followed
    /// by the names of the enclosing commands.
    fn render_help(&self, invocation: &str, layout: &HelpLayout) -> String;
}

/// A declared subcommand with record type `R`, reached from a parent with
/// record type `P`.
///
/// # Examples
///
/// ```
/// use option_schema_core::{CommandSpec, OptionParser, OptionSpec, ParameterSpec};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Clone, Default)]
/// struct Global {
///     verbose: bool,
/// }
///
/// struct Add {
///     verbose: bool,
///     url: String,
/// }
///
/// let seen = Arc::new(Mutex::new(None));
/// let sink = Arc::clone(&seen);
/// let add = CommandSpec::builder("add", "Add a remote.", |g: Global| Add {
///     verbose: g.verbose,
///     url: String::new(),
/// })
/// .with_parameter(ParameterSpec::required(
///     "<url>",
///     "Remote location.",
///     |r: &mut Add, v: String| r.url = v,
/// ))
/// .with_action(move |r: Add| {
///     *sink.lock().unwrap() = Some((r.verbose, r.url));
///     Ok(())
/// })
/// .build()
/// .unwrap();
///
/// let parser = OptionParser::builder("Remote tool.", Global::default())
///     .with_option(OptionSpec::flag("v", "Verbose.", |g: &mut Global| g.verbose = true))
///     .with_command(add)
///     .build()
///     .unwrap();
///
/// parser.parse(&["tool", "-v", "add", "https://example.com"], |_| {}).unwrap();
/// assert_eq!(*seen.lock().unwrap(), Some((true, "https://example.com".to_string())));
/// ```
pub struct CommandSpec<P, R> {
    syntax: Syntax<P, R>,
    action: Option<Action<R>>,
}

impl<P: 'static, R: 'static> CommandSpec<P, R> {
    /// Starts a command named `name`. `initial` derives the command's record
    /// from the parent's record at dispatch time.
    pub fn builder<F>(
        name: impl Into<String>,
        docs: impl Into<String>,
        initial: F,
    ) -> CommandBuilder<P, R>
    where
        F: Fn(P) -> R + Send + Sync + 'static,
    {
        CommandBuilder {
            name: name.into(),
            docs: docs.into(),
            initial: Box::new(initial),
            options: Vec::new(),
            parameters: Vec::new(),
            commands: Vec::new(),
            action: None,
        }
    }
}

impl<P: 'static, R: 'static> Command<P> for CommandSpec<P, R> {
    fn name(&self) -> &str {
        self.syntax.name().unwrap_or_default()
    }

    fn docs(&self) -> &str {
        self.syntax.docs()
    }

    fn parse(&self, cursor: &mut ParseCursor<'_>, parent: P) -> Result<()> {
        match &self.action {
            Some(action) => {
                let complete = completion(|record: R, _: &mut ParseCursor<'_>| action(record));
                self.syntax.parse(cursor, parent, Some(&complete))
            }
            None => self.syntax.parse(cursor, parent, None),
        }
    }

    fn render_help(&self, invocation: &str, layout: &HelpLayout) -> String {
        self.syntax.render_help(invocation, layout)
    }
}

/// Builder for [`CommandSpec`].
pub struct CommandBuilder<P, R> {
    name: String,
    docs: String,
    initial: Construct<P, R>,
    options: Vec<OptionSpec<R>>,
    parameters: Vec<ParameterSpec<R>>,
    commands: Vec<Box<dyn Command<R>>>,
    action: Option<Action<R>>,
}

impl<P: 'static, R: 'static> CommandBuilder<P, R> {
    pub fn with_option(mut self, option: OptionSpec<R>) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec<R>) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds a nested subcommand. A command with subcommands cannot declare
    /// positional parameters.
    pub fn with_command<C>(mut self, command: C) -> Self
    where
        C: Command<R> + 'static,
    {
        self.commands.push(Box::new(command));
        self
    }

    /// Sets the action run with the finished record. Without one, reaching
    /// the end of input prints the command's help.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(R) -> Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn build(self) -> std::result::Result<CommandSpec<P, R>, SchemaError> {
        let children = self.commands.into_iter().map(Child::Command).collect();
        let syntax = Syntax::new(
            Some(self.name),
            self.docs,
            self.initial,
            self.options,
            self.parameters,
            children,
        )?;
        Ok(CommandSpec {
            syntax,
            action: self.action,
        })
    }
}

/// Record of the built-in `help` command.
#[derive(Debug, Default)]
struct HelpRequest {
    command: Option<String>,
}

/// The `help [<command>]` command added to roots that have subcommands.
pub(crate) struct HelpCommand<R> {
    syntax: Syntax<R, HelpRequest>,
}

impl<R: 'static> HelpCommand<R> {
    pub(crate) fn new() -> std::result::Result<Self, SchemaError> {
        let initial: Construct<R, HelpRequest> = Box::new(|_: R| HelpRequest::default());
        let topic = ParameterSpec::optional(
            "<command>",
            "The command to describe. If not given, prints general usage information.",
            |request: &mut HelpRequest, name: String| request.command = Some(name),
        );
        let syntax = Syntax::new(
            Some("help".to_string()),
            "Print help about a particular command.".to_string(),
            initial,
            Vec::new(),
            vec![topic],
            Vec::new(),
        )?;
        Ok(Self { syntax })
    }

    pub(crate) fn name(&self) -> &str {
        self.syntax.name().unwrap_or("help")
    }

    pub(crate) fn docs(&self) -> &str {
        self.syntax.docs()
    }

    pub(crate) fn render_help(&self, invocation: &str, layout: &HelpLayout) -> String {
        self.syntax.render_help(invocation, layout)
    }

    /// Parses `help`'s own arguments, then prints the help of `parent` or of
    /// the sibling command named by the argument.
    pub(crate) fn parse<P>(
        &self,
        cursor: &mut ParseCursor<'_>,
        record: R,
        parent: &Syntax<P, R>,
        parent_invocation: &str,
    ) -> Result<()> {
        let describe = completion(|request: HelpRequest, cursor: &mut ParseCursor<'_>| {
            let text = match request.command {
                None => parent.render_help(parent_invocation, cursor.layout()),
                Some(name) => {
                    let child = parent
                        .find_command(&name)
                        .ok_or_else(|| ParseError::UnknownCommand(name.clone()))?;
                    child.render_help(&cursor.invocation(), cursor.layout())
                }
            };
            cursor.print(&text);
            Ok(())
        });
        self.syntax.parse(cursor, record, Some(&describe))
    }
}
