//! Syntactic classification of raw command-line arguments.
//!
//! Classification depends only on the leading dashes and the first `=`:
//!
//! | Argument     | Token                                  |
//! |--------------|----------------------------------------|
//! | `--name=v`   | `Option { name: "name", value: "v" }`  |
//! | `-name`      | `Option { name: "name", value: None }` |
//! | `--`         | `Option { name: "-", value: None }`    |
//! | `-`, `""`    | `Value`                                |
//! | `foo`        | `Value`                                |

use std::cell::OnceCell;

/// Classified form of one raw argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare value (`foo`, `-`, or the empty string).
    Value(String),
    /// An option (`-name[=value]` or `--name[=value]`).
    Option { name: String, value: Option<String> },
}

impl Token {
    /// Classifies a raw argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use option_schema_core::Token;
    ///
    /// assert_eq!(
    ///     Token::classify("--format=json"),
    ///     Token::Option { name: "format".into(), value: Some("json".into()) }
    /// );
    /// assert_eq!(Token::classify("-"), Token::Value("-".into()));
    /// ```
    pub fn classify(raw: &str) -> Self {
        let body = if raw.len() > 2 && raw.starts_with("--") {
            &raw[2..]
        } else if raw.len() > 1 && raw.starts_with('-') {
            &raw[1..]
        } else {
            return Self::Value(raw.to_string());
        };

        match body.split_once('=') {
            Some((name, value)) => Self::Option {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
            None => Self::Option {
                name: body.to_string(),
                value: None,
            },
        }
    }

    /// Returns `true` for [`Token::Value`].
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// A raw argument together with its lazily computed classification.
#[derive(Debug)]
pub(crate) struct Argument {
    text: String,
    token: OnceCell<Token>,
}

impl Argument {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            token: OnceCell::new(),
        }
    }

    /// The argument exactly as given on the command line.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn token(&self) -> &Token {
        self.token.get_or_init(|| Token::classify(&self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str, value: Option<&str>) -> Token {
        Token::Option {
            name: name.to_string(),
            value: value.map(String::from),
        }
    }

    #[test]
    fn test_long_and_short_options() {
        assert_eq!(Token::classify("--verbose"), option("verbose", None));
        assert_eq!(Token::classify("-v"), option("v", None));
        assert_eq!(Token::classify("-a=42"), option("a", Some("42")));
        assert_eq!(Token::classify("--a=1,2"), option("a", Some("1,2")));
    }

    #[test]
    fn test_split_at_first_equals() {
        assert_eq!(Token::classify("-c=a=b"), option("c", Some("a=b")));
        assert_eq!(Token::classify("-a="), option("a", Some("")));
        assert_eq!(Token::classify("-c=-c"), option("c", Some("-c")));
    }

    #[test]
    fn test_separator_is_dash_option() {
        assert_eq!(Token::classify("--"), option("-", None));
        assert_eq!(Token::classify("---"), option("-", None));
    }

    #[test]
    fn test_values() {
        assert_eq!(Token::classify("-"), Token::Value("-".into()));
        assert_eq!(Token::classify(""), Token::Value(String::new()));
        assert_eq!(Token::classify("list"), Token::Value("list".into()));
        assert!(Token::classify("42").is_value());
    }

    #[test]
    fn test_argument_caches_classification() {
        let arg = Argument::new("--florbs");
        let first = arg.token() as *const Token;
        let second = arg.token() as *const Token;
        assert_eq!(first, second);
        assert_eq!(arg.text(), "--florbs");
    }
}
