/// The keyword table of the format language
use crate::field::{
    CloseDelay, CloseOriginator, DestAddr, DestPort, Field, FirstByte, Latency, RecordTime,
    RequestDuration, RequestHeaders, RequestIdle, RequestLine, RequestPayload, RequestSize,
    RequestTime, ResponseDuration, ResponseHeaders, ResponseIdle, ResponseLine, ResponsePayload,
    ResponseSize, ResponseTime, SetupTime, SourceAddr, SourcePort, Status, Text, TimeFormat,
    DEFAULT_TIME_FORMAT,
};
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::{Display, EnumString, VariantNames};

/// What a parameter is checked against at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any text.
    Text,
    /// A strftime pattern.
    TimeFormat,
}

/// Grammar rule of a keyword together with its field constructor.
#[derive(Clone, Copy)]
pub enum Grammar {
    /// `%name`
    Plain(fn() -> Field),
    /// `%name`, built with an argument fixed in the registry.
    Preset {
        arg: &'static str,
        build: fn(&str) -> Field,
    },
    /// `%name(param)`
    Required {
        param: ParamKind,
        build: fn(&str) -> Field,
    },
    /// `%name[param]` or `%name`, the latter using `default`.
    Optional {
        param: ParamKind,
        default: &'static str,
        build: fn(&str) -> Field,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "kebab_case")]
pub enum GrammarKind {
    NoParameter,
    Preset,
    Mandatory,
    Optional,
}

impl Grammar {
    pub fn kind(&self) -> GrammarKind {
        match self {
            Grammar::Plain(_) => GrammarKind::NoParameter,
            Grammar::Preset { .. } => GrammarKind::Preset,
            Grammar::Required { .. } => GrammarKind::Mandatory,
            Grammar::Optional { .. } => GrammarKind::Optional,
        }
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grammar::Plain(_) => f.write_str("Plain"),
            Grammar::Preset { arg, .. } => f.debug_struct("Preset").field("arg", arg).finish(),
            Grammar::Required { param, .. } => {
                f.debug_struct("Required").field("param", param).finish()
            }
            Grammar::Optional { param, default, .. } => f
                .debug_struct("Optional")
                .field("param", param)
                .field("default", default)
                .finish(),
        }
    }
}

/// One entry of the registry.
#[derive(Clone, Copy)]
pub struct Keyword {
    pub name: &'static str,
    pub grammar: Grammar,
    pub description: &'static str,
}

impl Keyword {
    pub fn plain(name: &'static str, description: &'static str, build: fn() -> Field) -> Self {
        Self {
            name,
            grammar: Grammar::Plain(build),
            description,
        }
    }

    pub fn preset(
        name: &'static str,
        description: &'static str,
        arg: &'static str,
        build: fn(&str) -> Field,
    ) -> Self {
        Self {
            name,
            grammar: Grammar::Preset { arg, build },
            description,
        }
    }

    pub fn required(
        name: &'static str,
        description: &'static str,
        param: ParamKind,
        build: fn(&str) -> Field,
    ) -> Self {
        Self {
            name,
            grammar: Grammar::Required { param, build },
            description,
        }
    }

    pub fn optional(
        name: &'static str,
        description: &'static str,
        param: ParamKind,
        default: &'static str,
        build: fn(&str) -> Field,
    ) -> Self {
        Self {
            name,
            grammar: Grammar::Optional {
                param,
                default,
                build,
            },
            description,
        }
    }

    pub fn kind(&self) -> GrammarKind {
        self.grammar.kind()
    }

    /// How the keyword is written in a format string.
    pub fn usage(&self) -> String {
        match self.grammar {
            Grammar::Plain(_) | Grammar::Preset { .. } => format!("%{}", self.name),
            Grammar::Required { .. } => format!("%{}(...)", self.name),
            Grammar::Optional { .. } => format!("%{}[...]", self.name),
        }
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyword")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .finish()
    }
}

/// Maps keyword names to their grammar and field constructor.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    keywords: BTreeMap<&'static str, Keyword>,
}

impl KeywordRegistry {
    /// Revision of the keyword table returned by [`KeywordRegistry::standard`].
    pub const VERSION: u32 = 1;

    pub fn empty() -> Self {
        Self::default()
    }

    /// The full keyword table.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for keyword in standard_keywords() {
            registry.register(keyword);
        }
        registry
    }

    /// Add `keyword`, returning the entry it replaced.
    pub fn register(&mut self, keyword: Keyword) -> Option<Keyword> {
        self.keywords.insert(keyword.name, keyword)
    }

    pub fn get(&self, name: &str) -> Option<&Keyword> {
        self.keywords.get(name)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.values()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

fn standard_keywords() -> Vec<Keyword> {
    use ParamKind::TimeFormat as Time;

    vec![
        Keyword::preset("n", "newline", "\n", |text| Text::new(text).into()),
        Keyword::preset("t", "tab", "\t", |text| Text::new(text).into()),
        Keyword::required("const", "constant text", ParamKind::Text, |text| {
            Text::new(text).into()
        }),
        Keyword::plain("srcip", "client address", || SourceAddr::default().into()),
        Keyword::plain("dstip", "server address", || DestAddr::default().into()),
        Keyword::plain("srcport", "client port", || SourcePort::default().into()),
        Keyword::plain("dstport", "server port", || DestPort::default().into()),
        Keyword::plain("status", "connection status", || Status::default().into()),
        Keyword::plain("closer", "address that closed the connection", || {
            CloseOriginator::default().into()
        }),
        Keyword::plain("reqline", "first request line", || {
            RequestLine::default().into()
        }),
        Keyword::plain("respline", "first response line", || {
            ResponseLine::default().into()
        }),
        Keyword::plain("reqhdr", "request headers", || {
            RequestHeaders::default().into()
        }),
        Keyword::plain("resphdr", "response headers", || {
            ResponseHeaders::default().into()
        }),
        Keyword::plain("request", "request payload", || {
            RequestPayload::default().into()
        }),
        Keyword::plain("response", "response payload", || {
            ResponsePayload::default().into()
        }),
        Keyword::plain("reqsize", "request bytes", || RequestSize::default().into()),
        Keyword::plain("respsize", "response bytes", || ResponseSize::default().into()),
        Keyword::optional(
            "reqtime",
            "time of the last request",
            Time,
            DEFAULT_TIME_FORMAT,
            |f| RequestTime::new(TimeFormat::new(f)).into(),
        ),
        Keyword::optional(
            "resptime",
            "time of the last response",
            Time,
            DEFAULT_TIME_FORMAT,
            |f| ResponseTime::new(TimeFormat::new(f)).into(),
        ),
        Keyword::optional(
            "time",
            "time the record was written",
            Time,
            DEFAULT_TIME_FORMAT,
            |f| RecordTime::new(TimeFormat::new(f)).into(),
        ),
        Keyword::plain("reqdur", "first to last request (s)", || {
            RequestDuration::default().into()
        }),
        Keyword::plain("latency", "open or request to last response (s)", || {
            Latency::default().into()
        }),
        Keyword::plain("ttfb", "request to first response (s)", || {
            FirstByte::default().into()
        }),
        Keyword::plain("respdur", "first to last response (s)", || {
            ResponseDuration::default().into()
        }),
        Keyword::plain("idle", "open to first request (s)", || {
            RequestIdle::default().into()
        }),
        Keyword::plain("tailidle", "last response to close (s)", || {
            ResponseIdle::default().into()
        }),
        Keyword::plain("closedelay", "last activity to close (s)", || {
            CloseDelay::default().into()
        }),
        Keyword::plain("setup", "connection attempt to open (s)", || {
            SetupTime::default().into()
        }),
    ]
}
