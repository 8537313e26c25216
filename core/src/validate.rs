//! Schema validation.
//!
//! Catches structural problems while a node is built: empty or duplicate
//! option names, duplicate command names, nodes declaring both positional
//! parameters and subcommands, and more than one repeating parameter.
//! Each check stops at the first problem it finds.

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::option::OptionSpec;
use crate::parameter::{ParameterKind, ParameterSpec};

/// Validates the pieces of one node before it is assembled.
///
/// `node` names the node in messages (`root` for the unnamed root).
pub(crate) fn validate_node<'a, R>(
    node: &str,
    options: &[OptionSpec<R>],
    parameters: &[ParameterSpec<R>],
    command_names: impl IntoIterator<Item = &'a str>,
) -> Vec<SchemaError> {
    let mut errors = validate_options(options);
    if !errors.is_empty() {
        return errors;
    }

    let command_names: Vec<&str> = command_names.into_iter().collect();
    if !parameters.is_empty() && !command_names.is_empty() {
        errors.push(SchemaError::ParametersWithCommands(node.to_string()));
        return errors;
    }

    errors.extend(validate_parameters(node, parameters));
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_command_names(&command_names));
    errors
}

fn validate_options<R>(options: &[OptionSpec<R>]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for option in options {
        let name = option.name();
        if name.is_empty() {
            errors.push(SchemaError::EmptyOptionName);
            return errors;
        }
        if !seen.insert(name) {
            errors.push(SchemaError::DuplicateOption(name.to_string()));
            return errors;
        }
    }

    errors
}

fn validate_parameters<R>(node: &str, parameters: &[ParameterSpec<R>]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut repeating = parameters
        .iter()
        .filter(|p| p.kind() == ParameterKind::Repeating);

    if repeating.next().is_some() {
        if let Some(second) = repeating.next() {
            errors.push(SchemaError::MultipleRepeating {
                node: node.to_string(),
                metavariable: second.metavariable().to_string(),
            });
        }
    }

    errors
}

fn validate_command_names(names: &[&str]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for name in names {
        if name.trim().is_empty() {
            errors.push(SchemaError::EmptyCommandName);
            return errors;
        }
        if !seen.insert(*name) {
            errors.push(SchemaError::DuplicateCommand(name.to_string()));
            return errors;
        }
    }

    errors
}
