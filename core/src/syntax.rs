//! One node of the command tree and the recursive descent over it.
//!
//! A [`Syntax`] owns a node's options, its body (positional parameters or
//! child commands), and the function that derives the node's record from its
//! parent's. Parsing a node scans tokens left to right: options mutate the
//! record as they are met, the first bare value naming a child hands the rest
//! of the input to that child, and whatever positionals remain are
//! distributed when input runs out.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::command::{Command, HelpCommand};
use crate::cursor::ParseCursor;
use crate::distribute::apply_positionals;
use crate::error::{ParseError, Result, SchemaError};
use crate::help::{HelpLayout, HelpWriter};
use crate::option::{ArraySyntax, OptionBehavior, OptionSpec, missing_value};
use crate::parameter::ParameterSpec;
use crate::token::Token;
use crate::validate::validate_node;

/// Derives a node's record from its parent's.
pub(crate) type Construct<P, R> = Box<dyn Fn(P) -> R + Send + Sync>;

/// Runs when a node finishes parsing without dispatching further.
pub(crate) type Completion<'a, R> = dyn Fn(R, &mut ParseCursor<'_>) -> Result<()> + 'a;

/// Pins a closure to the higher-ranked [`Completion`] signature.
pub(crate) fn completion<R, F>(f: F) -> F
where
    F: Fn(R, &mut ParseCursor<'_>) -> Result<()>,
{
    f
}

/// Whether scanning continues after an option was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Terminated,
}

/// A child slot of a branch node.
pub(crate) enum Child<R> {
    Command(Box<dyn Command<R>>),
    Help(HelpCommand<R>),
}

impl<R: 'static> Child<R> {
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Command(command) => command.name(),
            Self::Help(help) => help.name(),
        }
    }

    pub(crate) fn docs(&self) -> &str {
        match self {
            Self::Command(command) => command.docs(),
            Self::Help(help) => help.docs(),
        }
    }

    pub(crate) fn render_help(&self, invocation: &str, layout: &HelpLayout) -> String {
        match self {
            Self::Command(command) => command.render_help(invocation, layout),
            Self::Help(help) => help.render_help(invocation, layout),
        }
    }
}

enum Body<R> {
    Parameters(Vec<ParameterSpec<R>>),
    Commands {
        children: Vec<Child<R>>,
        index: HashMap<String, usize>,
    },
}

pub(crate) struct Syntax<P, R> {
    name: Option<String>,
    docs: String,
    initial: Construct<P, R>,
    options: Vec<OptionSpec<R>>,
    option_index: HashMap<String, usize>,
    body: Body<R>,
}

impl<P, R: 'static> Syntax<P, R> {
    /// Validates and assembles a node, adding `-help` unless an option of
    /// that name is already declared.
    pub(crate) fn new(
        name: Option<String>,
        docs: String,
        initial: Construct<P, R>,
        mut options: Vec<OptionSpec<R>>,
        parameters: Vec<ParameterSpec<R>>,
        children: Vec<Child<R>>,
    ) -> std::result::Result<Self, SchemaError> {
        let label = name.as_deref().unwrap_or("root");
        let problems = validate_node(
            label,
            &options,
            &parameters,
            children.iter().map(Child::name),
        );
        if let Some(problem) = problems.into_iter().next() {
            return Err(problem);
        }

        if !options.iter().any(|option| option.name() == "help") {
            options.push(OptionSpec::help());
        }
        let option_index = options
            .iter()
            .enumerate()
            .map(|(i, option)| (option.name().to_string(), i))
            .collect();

        let body = if children.is_empty() {
            Body::Parameters(parameters)
        } else {
            let index = children
                .iter()
                .enumerate()
                .map(|(i, child)| (child.name().to_string(), i))
                .collect();
            Body::Commands { children, index }
        };

        Ok(Self {
            name,
            docs,
            initial,
            options,
            option_index,
            body,
        })
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn docs(&self) -> &str {
        &self.docs
    }

    pub(crate) fn options(&self) -> &[OptionSpec<R>] {
        &self.options
    }

    fn parameters(&self) -> &[ParameterSpec<R>] {
        match &self.body {
            Body::Parameters(parameters) => parameters,
            Body::Commands { .. } => &[],
        }
    }

    fn children(&self) -> &[Child<R>] {
        match &self.body {
            Body::Parameters(_) => &[],
            Body::Commands { children, .. } => children,
        }
    }

    pub(crate) fn find_command(&self, name: &str) -> Option<&Child<R>> {
        match &self.body {
            Body::Parameters(_) => None,
            Body::Commands { children, index } => index.get(name).map(|&i| &children[i]),
        }
    }

    /// Parses the rest of the cursor's input into a record derived from
    /// `parent`, then completes with `action` or prints this node's help.
    pub(crate) fn parse(
        &self,
        cursor: &mut ParseCursor<'_>,
        parent: P,
        action: Option<&Completion<'_, R>>,
    ) -> Result<()> {
        let mut record = (self.initial)(parent);
        let mut positionals: Vec<String> = Vec::new();
        let mut positional_only = false;

        while let Some(argument) = cursor.accept() {
            let text = argument.text().to_string();
            let token = argument.token().clone();
            trace!(argument = %text, positional_only, "Scanning argument");

            if let Token::Option { name, value } = &token {
                if !positional_only {
                    if name == "-" {
                        debug!("Entering positional-only mode");
                        positional_only = true;
                        continue;
                    }
                    let step =
                        self.resolve_option(cursor, &mut record, &text, name, value.as_deref())?;
                    match step {
                        Step::Continue => continue,
                        Step::Terminated => return Ok(()),
                    }
                }
            }

            if positionals.is_empty() {
                if let Some(child) = self.find_command(&text) {
                    debug!(command = %text, "Dispatching to subcommand");
                    let invocation = cursor.invocation();
                    if let Some(name) = &self.name {
                        cursor.enter(name);
                    }
                    return match child {
                        Child::Command(command) => command.parse(cursor, record),
                        Child::Help(help) => help.parse(cursor, record, self, &invocation),
                    };
                }
            }
            positionals.push(text);
        }

        apply_positionals(self.parameters(), &positionals, &mut record)?;
        let node = self.name.as_deref().unwrap_or("root");
        match action {
            Some(action) => {
                debug!(node, "Running completion action");
                action(record, cursor)
            }
            None => {
                debug!(node, "No action, printing help");
                let text = self.render_help(&cursor.invocation(), cursor.layout());
                cursor.print(&text);
                Ok(())
            }
        }
    }

    fn resolve_option(
        &self,
        cursor: &mut ParseCursor<'_>,
        record: &mut R,
        text: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<Step> {
        let option = self
            .option_index
            .get(name)
            .map(|&i| &self.options[i])
            .ok_or_else(|| ParseError::UnknownOption(text.to_string()))?;
        trace!(option = name, kind = option.kind(), "Resolved option");

        match &option.behavior {
            OptionBehavior::Flag(set) => {
                if let Some(value) = value {
                    return Err(ParseError::UnexpectedValue {
                        option: name.to_string(),
                        value: value.to_string(),
                    });
                }
                set(record);
            }
            OptionBehavior::Value { apply, default } => match (value, default) {
                (Some(value), _) => apply(record, value)?,
                (None, Some(default)) => default(record),
                (None, None) => return Err(missing_value(name)),
            },
            OptionBehavior::Array { syntax, append } => match syntax {
                ArraySyntax::CommaSeparated => {
                    let value = value.ok_or_else(|| missing_value(name))?;
                    if !value.is_empty() {
                        let elements: Vec<&str> = value.split(',').map(str::trim).collect();
                        append(record, &elements)?;
                    }
                }
                ArraySyntax::UpToNextOption => match value {
                    Some(value) => append(record, &[value])?,
                    None => {
                        let mut elements = Vec::new();
                        while let Some(next) = cursor.peek() {
                            if !next.token().is_value() {
                                break;
                            }
                            elements.push(next.text().to_string());
                            cursor.accept();
                        }
                        let elements: Vec<&str> = elements.iter().map(String::as_str).collect();
                        append(record, &elements)?;
                    }
                },
                ArraySyntax::Repeated => {
                    let value = value.ok_or_else(|| missing_value(name))?;
                    append(record, &[value])?;
                }
            },
            OptionBehavior::Action(effect) => {
                debug!(option = name, "Running action option");
                effect()?;
                return Ok(Step::Terminated);
            }
            OptionBehavior::Help => {
                debug!(option = name, "Printing help");
                let text = self.render_help(&cursor.invocation(), cursor.layout());
                cursor.print(&text);
                return Ok(Step::Terminated);
            }
        }
        Ok(Step::Continue)
    }

    /// Renders this node's help. `invocation` is the tool name followed by
    /// the names of the enclosing commands.
    pub(crate) fn render_help(&self, invocation: &str, layout: &HelpLayout) -> String {
        let mut usage = format!("Usage: {invocation}");
        if let Some(name) = &self.name {
            usage.push(' ');
            usage.push_str(name);
        }
        if !self.options.is_empty() {
            usage.push_str(" [<option>]...");
        }
        if !self.children().is_empty() {
            usage.push_str(" <command> [<arg>]...");
        }
        for parameter in self.parameters() {
            usage.push(' ');
            usage.push_str(&parameter.usage());
        }

        let mut writer = HelpWriter::new(layout, usage);
        writer.docs(&self.docs);
        writer.section(
            "Options:",
            self.options
                .iter()
                .map(|option| (option.usage(), option.docs())),
        );
        let parameter_usages: Vec<String> =
            self.parameters().iter().map(ParameterSpec::usage).collect();
        writer.section(
            "Positional parameters:",
            parameter_usages
                .iter()
                .zip(self.parameters())
                .map(|(usage, parameter)| (usage.as_str(), parameter.docs())),
        );
        writer.section(
            "Commands:",
            self.children()
                .iter()
                .map(|child| (child.name(), child.docs())),
        );
        writer.finish()
    }
}
