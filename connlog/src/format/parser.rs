/// Format string compiler
use crate::format::error::FormatError;
use crate::format::factory::{FieldFactory, FormatProgram};
use crate::format::keyword::{Grammar, Keyword, KeywordRegistry, ParamKind};
use chrono::format::{Item, StrftimeItems};

/// Introduces a keyword. Doubled, it stands for itself.
pub const MARKER: char = '%';
pub const REQUIRED_OPEN: char = '(';
pub const REQUIRED_CLOSE: char = ')';
pub const OPTIONAL_OPEN: char = '[';
pub const OPTIONAL_CLOSE: char = ']';

fn is_keyword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Compiles format strings against a keyword registry.
///
/// Parsing is a single left to right pass. Literal text between keywords is
/// kept verbatim, whitespace included, and becomes constant-text columns.
#[derive(Debug, Clone, Copy)]
pub struct FormatParser<'r> {
    registry: &'r KeywordRegistry,
}

impl<'r> FormatParser<'r> {
    pub fn new(registry: &'r KeywordRegistry) -> Self {
        Self { registry }
    }

    pub fn parse(&self, format: &str) -> Result<FormatProgram, FormatError> {
        let mut factories = Vec::new();
        let mut literal = String::new();
        let mut rest = format;

        while let Some((text, after)) = rest.split_once(MARKER) {
            literal.push_str(text);
            let offset = format.len() - rest.len() + text.len();

            if let Some(tail) = after.strip_prefix(MARKER) {
                literal.push(MARKER);
                rest = tail;
                continue;
            }

            let end = after.find(|c| !is_keyword_char(c)).unwrap_or(after.len());
            let (name, tail) = after.split_at(end);
            if name.is_empty() {
                return Err(FormatError::EmptyKeyword { offset });
            }
            let keyword = self
                .registry
                .get(name)
                .ok_or_else(|| FormatError::UnknownKeyword {
                    name: name.to_string(),
                })?;

            if !literal.is_empty() {
                factories.push(FieldFactory::literal(std::mem::take(&mut literal)));
            }

            let (factory, tail) = compile_keyword(keyword, tail)?;
            factories.push(factory);
            rest = tail;
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            factories.push(FieldFactory::literal(literal));
        }

        log::debug!("compiled format into {} columns", factories.len());
        Ok(FormatProgram::new(factories))
    }
}

/// Build the factory for `keyword`, consuming its parameter from `tail`.
fn compile_keyword<'a>(
    keyword: &Keyword,
    tail: &'a str,
) -> Result<(FieldFactory, &'a str), FormatError> {
    match keyword.grammar {
        Grammar::Plain(build) => Ok((FieldFactory::plain(keyword.name, build), tail)),
        Grammar::Preset { arg, build } => {
            Ok((FieldFactory::with_param(keyword.name, arg, build), tail))
        }
        Grammar::Required { param, build } => {
            let Some(open) = tail.strip_prefix(REQUIRED_OPEN) else {
                return Err(FormatError::MissingParameter {
                    keyword: keyword.name.to_string(),
                    open: REQUIRED_OPEN,
                });
            };
            let (value, tail) = delimited(keyword, open, REQUIRED_CLOSE)?;
            validate(keyword, param, value)?;
            Ok((FieldFactory::with_param(keyword.name, value, build), tail))
        }
        Grammar::Optional {
            param,
            default,
            build,
        } => match tail.strip_prefix(OPTIONAL_OPEN) {
            Some(open) => {
                let (value, tail) = delimited(keyword, open, OPTIONAL_CLOSE)?;
                validate(keyword, param, value)?;
                Ok((FieldFactory::with_param(keyword.name, value, build), tail))
            }
            None => Ok((FieldFactory::with_param(keyword.name, default, build), tail)),
        },
    }
}

/// Split `text` at the first `close`, dropping the delimiter.
fn delimited<'a>(
    keyword: &Keyword,
    text: &'a str,
    close: char,
) -> Result<(&'a str, &'a str), FormatError> {
    text.split_once(close)
        .ok_or_else(|| FormatError::UnterminatedParameter {
            keyword: keyword.name.to_string(),
            close,
        })
}

fn validate(keyword: &Keyword, kind: ParamKind, value: &str) -> Result<(), FormatError> {
    match kind {
        ParamKind::Text => Ok(()),
        ParamKind::TimeFormat => {
            if StrftimeItems::new(value).any(|item| matches!(item, Item::Error)) {
                Err(FormatError::InvalidTimeFormat {
                    keyword: keyword.name.to_string(),
                    format: value.to_string(),
                })
            } else {
                Ok(())
            }
        }
    }
}
