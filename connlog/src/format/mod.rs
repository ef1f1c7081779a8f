//! The format language.
//!
//! A format string is literal text interleaved with `%keyword` tokens. It is
//! compiled once, before any connection is seen, into a [`FormatProgram`]: an
//! ordered list of [`FieldFactory`] values, one per output column.
//!
//! ```
//! let program = connlog::format::parse("%srcip:%srcport %status%n").unwrap();
//! assert_eq!(program.len(), 6);
//! ```
//!
//! Keywords take a parameter in one of two ways: `%const(text)` must be
//! followed by a parenthesised argument, `%reqtime[%H:%M]` may be followed by
//! a bracketed one and otherwise uses its registered default. `%%` writes a
//! literal percent sign.

mod error;
mod factory;
mod keyword;
mod parser;

pub use error::FormatError;
pub use factory::{FieldFactory, FormatProgram, LITERAL};
pub use keyword::{Grammar, GrammarKind, Keyword, KeywordRegistry, ParamKind};
pub use parser::{FormatParser, MARKER, OPTIONAL_CLOSE, OPTIONAL_OPEN, REQUIRED_CLOSE, REQUIRED_OPEN};

/// Compile `format` against [`KeywordRegistry::standard`].
pub fn parse(format: &str) -> Result<FormatProgram, FormatError> {
    let registry = KeywordRegistry::standard();
    FormatParser::new(&registry).parse(format)
}
