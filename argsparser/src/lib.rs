//! Priority-ordered command-line option parsing.
//!
//! Options are registered on a [`Parser`] with a handler each:
//! - `Opt::flag` for switches without parameters
//! - `Opt::fixed` / `Opt::single` for a fixed number of parameters
//! - `Opt::variable` for parameters running up to the next `-` token
//!
//! `Parser::parse_args` applies them in ascending priority order, removing
//! every consumed token, and passes the rest to the positional handler.
//! The result is a single [`ParseOutcome`].
//!
//! ```
//! use argsparser::{Opt, ParseOutcome, Parser};
//!
//! let mut parser = Parser::builder("demo")
//!     .option(Opt::flag("-v", "--verbose", || true).description("Talk more"))
//!     .positional(|rest: &[String]| rest.len() == 1)
//!     .build();
//!
//! assert_eq!(parser.parse_args(["input.txt", "-v"]), ParseOutcome::Ok);
//! assert!(parser.option("-v").unwrap().is_applied());
//! ```

pub mod error;
pub mod help;
pub mod option;
pub mod outcome;
pub mod parser;

pub use error::{OptionError, ParseError};
pub use help::HelpSections;
pub use option::{Action, Arity, Opt, DEFAULT_DESCRIPTION_INDENT, OPTION_PREFIX};
pub use outcome::{ParseOutcome, Parsed};
pub use parser::{first_bundle, is_bundle, Parser, ParserBuilder, PositionalHandler};
