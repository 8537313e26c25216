//! Assignment of positional arguments to parameter slots.
//!
//! Required parameters take one argument each. What is left goes to optional
//! parameters one at a time in declaration order, and the repeating parameter
//! (if any) absorbs the rest. Arguments are then applied in declaration
//! order, so the argument list is consumed strictly left to right.
//!
//! For `A [B] [R]... C [D]` and seven arguments, `A` and `C` take one each,
//! `B` and `D` take one each, and `R` takes the three in the middle.

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::parameter::{ParameterKind, ParameterSpec};

/// Computes how many arguments each parameter receives.
pub(crate) fn slot_counts<R>(
    parameters: &[ParameterSpec<R>],
    arguments: &[String],
) -> Result<Vec<usize>> {
    let required = parameters
        .iter()
        .filter(|p| p.kind() == ParameterKind::Required)
        .count();
    if arguments.len() < required {
        let missing = parameters
            .iter()
            .filter(|p| p.kind() == ParameterKind::Required)
            .nth(arguments.len())
            .map(|p| p.metavariable().to_string())
            .unwrap_or_default();
        return Err(ParseError::MissingArgument(missing));
    }

    let mut counts = vec![0; parameters.len()];
    let mut remaining = arguments.len() - required;
    let mut optionals = Vec::new();
    let mut repeating = None;
    for (i, parameter) in parameters.iter().enumerate() {
        match parameter.kind() {
            ParameterKind::Required => counts[i] = 1,
            ParameterKind::Optional => optionals.push(i),
            ParameterKind::Repeating => repeating = Some(i),
        }
    }

    for i in optionals {
        if remaining == 0 {
            break;
        }
        counts[i] = 1;
        remaining -= 1;
    }

    match repeating {
        Some(i) => counts[i] = remaining,
        None if remaining > 0 => {
            let consumed = arguments.len() - remaining;
            return Err(ParseError::UnexpectedArgument(arguments[consumed].clone()));
        }
        None => {}
    }

    Ok(counts)
}

/// Distributes `arguments` over `parameters` and applies them to `record`.
pub(crate) fn apply_positionals<R>(
    parameters: &[ParameterSpec<R>],
    arguments: &[String],
    record: &mut R,
) -> Result<()> {
    let counts = slot_counts(parameters, arguments)?;
    debug!(arguments = arguments.len(), counts = ?counts, "Distributed positional arguments");

    let mut rest = arguments;
    for (parameter, count) in parameters.iter().zip(counts) {
        let (slice, tail) = rest.split_at(count);
        for raw in slice {
            parameter.apply(record, raw)?;
        }
        rest = tail;
    }
    Ok(())
}
