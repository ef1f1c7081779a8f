/// Field blueprints and the compiled format program
use crate::field::{Field, Text};
use std::fmt;

/// Keyword name recorded for literal runs of the format string.
pub const LITERAL: &str = "literal";

#[derive(Clone, Copy)]
enum Blueprint {
    Plain(fn() -> Field),
    WithParam(fn(&str) -> Field),
}

/// Immutable recipe for one column: builds a fresh [`Field`] per connection.
///
/// Identity is the keyword plus its literal parameter, if any.
#[derive(Clone)]
pub struct FieldFactory {
    keyword: &'static str,
    param: Option<String>,
    blueprint: Blueprint,
}

impl FieldFactory {
    pub fn plain(keyword: &'static str, build: fn() -> Field) -> Self {
        Self {
            keyword,
            param: None,
            blueprint: Blueprint::Plain(build),
        }
    }

    pub fn with_param(
        keyword: &'static str,
        param: impl Into<String>,
        build: fn(&str) -> Field,
    ) -> Self {
        Self {
            keyword,
            param: Some(param.into()),
            blueprint: Blueprint::WithParam(build),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::with_param(LITERAL, text, |text| Text::new(text).into())
    }

    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    pub fn create(&self) -> Field {
        match self.blueprint {
            Blueprint::Plain(build) => build(),
            Blueprint::WithParam(build) => build(self.param.as_deref().unwrap_or_default()),
        }
    }
}

impl PartialEq for FieldFactory {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword && self.param == other.param
    }
}

impl Eq for FieldFactory {}

impl fmt::Debug for FieldFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldFactory")
            .field("keyword", &self.keyword)
            .field("param", &self.param)
            .finish()
    }
}

/// Ordered factories compiled from one format string.
///
/// The order is the column order of every record. A program never changes
/// after parsing and is shared read-only by every flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatProgram {
    factories: Vec<FieldFactory>,
}

impl FormatProgram {
    pub fn new(factories: Vec<FieldFactory>) -> Self {
        Self { factories }
    }

    pub fn factories(&self) -> &[FieldFactory] {
        &self.factories
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// One fresh field per entry, in program order.
    pub fn instantiate(&self) -> Vec<Field> {
        self.factories.iter().map(FieldFactory::create).collect()
    }
}
