//! Option specifications.
//!
//! An [`OptionSpec`] pairs a name, a usage label, and documentation with one
//! of five behaviors: flag, value, array, action, or help. Record mutation is
//! done through closures bound when the option is declared.

use std::sync::Arc;

use crate::error::{ParseError, Result};
use crate::value::OptionValue;

/// How an array option collects its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArraySyntax {
    /// `-name=a,b,c`; every invocation needs an inline value.
    CommaSeparated,
    /// `-name a b c`; consumes bare values until the next option.
    /// `-name=a` appends a single element.
    #[default]
    UpToNextOption,
    /// `-name=a -name=b`; one element per invocation.
    Repeated,
}

type Setter<R> = Box<dyn Fn(&mut R) + Send + Sync>;
type Apply<R> = Box<dyn Fn(&mut R, &str) -> Result<()> + Send + Sync>;
type Append<R> = Box<dyn Fn(&mut R, &[&str]) -> Result<()> + Send + Sync>;
type Effect = Box<dyn Fn() -> Result<()> + Send + Sync>;

pub(crate) enum OptionBehavior<R> {
    Flag(Setter<R>),
    Value {
        apply: Apply<R>,
        default: Option<Setter<R>>,
    },
    Array {
        syntax: ArraySyntax,
        append: Append<R>,
    },
    Action(Effect),
    Help,
}

/// A named option of one command node.
///
/// # Examples
///
/// ```
/// use option_schema_core::{ArraySyntax, OptionSpec};
///
/// #[derive(Clone, Default)]
/// struct Record {
///     verbose: bool,
///     jobs: u32,
///     tags: Vec<String>,
/// }
///
/// let verbose = OptionSpec::flag("verbose", "Print more.", |r: &mut Record| r.verbose = true);
/// assert_eq!(verbose.usage(), "-verbose");
///
/// let jobs = OptionSpec::value_with_default(
///     "jobs",
///     "<n>",
///     "Worker count.",
///     4,
///     |r: &mut Record, v: u32| r.jobs = v,
/// );
/// assert_eq!(jobs.usage(), "-jobs[=<n>]");
///
/// let tags = OptionSpec::array(
///     "tag",
///     "<tag>",
///     ArraySyntax::CommaSeparated,
///     "Tags.",
///     |r: &mut Record| &mut r.tags,
/// );
/// assert_eq!(tags.usage(), "-tag=<tag>,<tag>...");
/// ```
pub struct OptionSpec<R> {
    name: String,
    usage: String,
    docs: String,
    pub(crate) behavior: OptionBehavior<R>,
}

impl<R: 'static> OptionSpec<R> {
    fn new(name: String, usage: String, docs: String, behavior: OptionBehavior<R>) -> Self {
        Self {
            name,
            usage,
            docs,
            behavior,
        }
    }

    /// Creates a flag: takes no value and runs `set` on every occurrence.
    pub fn flag<F>(name: impl Into<String>, docs: impl Into<String>, set: F) -> Self
    where
        F: Fn(&mut R) + Send + Sync + 'static,
    {
        let name = name.into();
        let usage = format!("-{name}");
        let behavior = OptionBehavior::Flag(Box::new(set));
        Self::new(name, usage, docs.into(), behavior)
    }

    /// Creates an option that requires an inline value (`-name=value`).
    pub fn value<V, F>(
        name: impl Into<String>,
        metavariable: &str,
        docs: impl Into<String>,
        set: F,
    ) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut R, V) + Send + Sync + 'static,
    {
        let name = name.into();
        let usage = format!("-{name}={metavariable}");
        let apply: Apply<R> = Box::new(move |record: &mut R, raw: &str| -> Result<()> {
            set(record, V::decode(raw)?);
            Ok(())
        });
        Self::new(
            name,
            usage,
            docs.into(),
            OptionBehavior::Value {
                apply,
                default: None,
            },
        )
    }

    /// Creates an option whose value may be omitted, in which case `default`
    /// is applied (`-name` is the same as `-name=<default>`).
    pub fn value_with_default<V, F>(
        name: impl Into<String>,
        metavariable: &str,
        docs: impl Into<String>,
        default: V,
        set: F,
    ) -> Self
    where
        V: OptionValue + Clone + Send + Sync + 'static,
        F: Fn(&mut R, V) + Send + Sync + 'static,
    {
        let name = name.into();
        let usage = format!("-{name}[={metavariable}]");
        let set = Arc::new(set);
        let set_default = Arc::clone(&set);
        let apply: Apply<R> = Box::new(move |record: &mut R, raw: &str| -> Result<()> {
            set(record, V::decode(raw)?);
            Ok(())
        });
        let fallback: Setter<R> =
            Box::new(move |record: &mut R| set_default(record, default.clone()));
        Self::new(
            name,
            usage,
            docs.into(),
            OptionBehavior::Value {
                apply,
                default: Some(fallback),
            },
        )
    }

    /// Creates an option accumulating elements into the vector returned by
    /// `field`, collected according to `syntax`.
    pub fn array<V, F>(
        name: impl Into<String>,
        metavariable: &str,
        syntax: ArraySyntax,
        docs: impl Into<String>,
        field: F,
    ) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut R) -> &mut Vec<V> + Send + Sync + 'static,
    {
        let name = name.into();
        let usage = match syntax {
            ArraySyntax::CommaSeparated => format!("-{name}={metavariable},{metavariable}..."),
            ArraySyntax::UpToNextOption => format!("-{name} {metavariable}..."),
            ArraySyntax::Repeated => format!("-{name}={metavariable}"),
        };
        let append: Append<R> = Box::new(move |record: &mut R, raws: &[&str]| -> Result<()> {
            let values = raws
                .iter()
                .map(|raw| V::decode(raw))
                .collect::<std::result::Result<Vec<V>, _>>()?;
            field(record).extend(values);
            Ok(())
        });
        let behavior = OptionBehavior::Array { syntax, append };
        Self::new(name, usage, docs.into(), behavior)
    }

    /// Creates an option that runs `effect` and ends the parse: no further
    /// arguments are read and no completion action runs.
    pub fn action<F>(name: impl Into<String>, docs: impl Into<String>, effect: F) -> Self
    where
        F: Fn() -> Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        let usage = format!("-{name}");
        let behavior = OptionBehavior::Action(Box::new(effect));
        Self::new(name, usage, docs.into(), behavior)
    }

    /// The `-help` option synthesized for nodes that do not declare one.
    pub(crate) fn help() -> Self {
        Self::new(
            "help".to_string(),
            "-help".to_string(),
            "Print usage information and exit.".to_string(),
            OptionBehavior::Help,
        )
    }
}

impl<R> OptionSpec<R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label shown in the left column of the options table.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn docs(&self) -> &str {
        &self.docs
    }

    /// Short behavior label used in trace output.
    pub(crate) fn kind(&self) -> &'static str {
        match self.behavior {
            OptionBehavior::Flag(_) => "flag",
            OptionBehavior::Value { .. } => "value",
            OptionBehavior::Array { .. } => "array",
            OptionBehavior::Action(_) => "action",
            OptionBehavior::Help => "help",
        }
    }
}

impl<R> std::fmt::Debug for OptionSpec<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSpec")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Error for an option that needs an inline value and got none.
pub(crate) fn missing_value(name: &str) -> ParseError {
    ParseError::MissingValue(name.to_string())
}
