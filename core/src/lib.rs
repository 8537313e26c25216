//! Declarative command-line parsing into a caller-owned record.
//!
//! A tool describes its command line as a tree of nodes. Each node owns:
//!
//! - [`OptionSpec`]s: flags, value options, array options, actions, and the
//!   built-in `-help`.
//! - Either [`ParameterSpec`]s (a leaf) or subcommands (a branch, see
//!   [`CommandSpec`]).
//! - An optional action run with the finished record.
//!
//! Parsing walks the arguments once, left to right, mutating the record
//! through the closures bound at declaration time. Option resolution is
//! scoped to the node the parse currently sits in, and the first bare value
//! naming a subcommand hands the rest of the input to it.
//!
//! Help text is rendered from the same schema and handed to a caller-supplied
//! printer; its layout is configured with [`HelpLayout`].
//!
//! # Example
//!
//! ```
//! use option_schema_core::*;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Options {
//!     verbose: bool,
//!     name: String,
//! }
//!
//! let parser = OptionParser::builder("Greet someone.", Options::default())
//!     .with_option(OptionSpec::flag("v", "Be chatty.", |o: &mut Options| o.verbose = true))
//!     .with_parameter(ParameterSpec::required(
//!         "<name>",
//!         "Who to greet.",
//!         |o: &mut Options, v: String| o.name = v,
//!     ))
//!     .with_action(|o: Options| {
//!         assert_eq!(o, Options { verbose: true, name: "world".into() });
//!         Ok(())
//!     })
//!     .build()
//!     .unwrap();
//!
//! parser.parse(&["greet", "-v", "world"], |_| {}).unwrap();
//!
//! let mut help = String::new();
//! parser.parse(&["greet", "-help"], |text| help.push_str(text)).unwrap();
//! assert!(help.starts_with("Usage: greet [<option>]... <name>"));
//! ```

mod command;
mod cursor;
mod distribute;
mod error;
mod help;
mod option;
mod parameter;
mod parser;
mod syntax;
mod token;
mod validate;
mod value;

pub use command::{Command, CommandBuilder, CommandSpec};
pub use cursor::ParseCursor;
pub use error::{DecodeError, ParseError, Result, SchemaError};
pub use help::HelpLayout;
pub use option::{ArraySyntax, OptionSpec};
pub use parameter::{ParameterKind, ParameterSpec};
pub use parser::{OptionParser, ParserBuilder};
pub use token::Token;
pub use value::{LabeledValue, OptionValue};
