//! Positional parameter specifications.

use crate::error::Result;
use crate::value::OptionValue;

/// Multiplicity of a positional parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Exactly one argument.
    Required,
    /// Zero or one argument.
    Optional,
    /// Any number of arguments. At most one per node.
    Repeating,
}

type Apply<R> = Box<dyn Fn(&mut R, &str) -> Result<()> + Send + Sync>;

/// A positional parameter of one command node.
///
/// # Examples
///
/// ```
/// use option_schema_core::{ParameterKind, ParameterSpec};
///
/// #[derive(Default)]
/// struct Record {
///     source: String,
///     dest: Option<String>,
///     extra: Vec<u32>,
/// }
///
/// let source = ParameterSpec::required("SOURCE", "Input.", |r: &mut Record, v: String| {
///     r.source = v
/// });
/// let dest = ParameterSpec::optional("DEST", "Output.", |r: &mut Record, v: String| {
///     r.dest = Some(v)
/// });
/// let extra = ParameterSpec::repeating("N", "Numbers.", |r: &mut Record| &mut r.extra);
///
/// assert_eq!(source.usage(), "SOURCE");
/// assert_eq!(dest.usage(), "[DEST]");
/// assert_eq!(extra.usage(), "[N]...");
/// assert_eq!(extra.kind(), ParameterKind::Repeating);
/// ```
pub struct ParameterSpec<R> {
    metavariable: String,
    docs: String,
    kind: ParameterKind,
    apply: Apply<R>,
}

impl<R: 'static> ParameterSpec<R> {
    fn single<V, F>(metavariable: String, docs: String, kind: ParameterKind, set: F) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut R, V) + Send + Sync + 'static,
    {
        let apply: Apply<R> = Box::new(move |record: &mut R, raw: &str| -> Result<()> {
            set(record, V::decode(raw)?);
            Ok(())
        });
        Self {
            metavariable,
            docs,
            kind,
            apply,
        }
    }

    /// Creates a parameter that must receive exactly one argument.
    pub fn required<V, F>(metavariable: impl Into<String>, docs: impl Into<String>, set: F) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut R, V) + Send + Sync + 'static,
    {
        Self::single(
            metavariable.into(),
            docs.into(),
            ParameterKind::Required,
            set,
        )
    }

    /// Creates a parameter that receives one argument if enough are given.
    pub fn optional<V, F>(metavariable: impl Into<String>, docs: impl Into<String>, set: F) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut R, V) + Send + Sync + 'static,
    {
        Self::single(
            metavariable.into(),
            docs.into(),
            ParameterKind::Optional,
            set,
        )
    }

    /// Creates a parameter absorbing every argument left over after the
    /// required and optional parameters are served.
    pub fn repeating<V, F>(
        metavariable: impl Into<String>,
        docs: impl Into<String>,
        field: F,
    ) -> Self
    where
        V: OptionValue + 'static,
        F: Fn(&mut R) -> &mut Vec<V> + Send + Sync + 'static,
    {
        let apply: Apply<R> = Box::new(move |record: &mut R, raw: &str| -> Result<()> {
            field(record).push(V::decode(raw)?);
            Ok(())
        });
        Self {
            metavariable: metavariable.into(),
            docs: docs.into(),
            kind: ParameterKind::Repeating,
            apply,
        }
    }
}

impl<R> ParameterSpec<R> {
    pub fn metavariable(&self) -> &str {
        &self.metavariable
    }

    pub fn docs(&self) -> &str {
        &self.docs
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Label used in the usage line and the parameters table.
    pub fn usage(&self) -> String {
        match self.kind {
            ParameterKind::Required => self.metavariable.clone(),
            ParameterKind::Optional => format!("[{}]", self.metavariable),
            ParameterKind::Repeating => format!("[{}]...", self.metavariable),
        }
    }

    pub(crate) fn apply(&self, record: &mut R, raw: &str) -> Result<()> {
        (self.apply)(record, raw)
    }
}

impl<R> std::fmt::Debug for ParameterSpec<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterSpec")
            .field("metavariable", &self.metavariable)
            .field("kind", &self.kind)
            .finish()
    }
}
