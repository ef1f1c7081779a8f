use crate::event::Timestamp;
use crate::field::FieldHandler;
use crate::record::Record;

/// Fixed text known at parse time: literal runs of the format string and
/// the `const`, `n` and `t` keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FieldHandler for Text {
    fn render(&self, out: &mut Record, _at: Timestamp) {
        out.push_str(&self.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::from_timeval;

    #[test]
    fn test_text_renders_verbatim() {
        let text = Text::new(" \t-> ");
        let mut out = Record::new();
        text.render(&mut out, from_timeval(0, 0));
        assert_eq!(out.as_bytes(), b" \t-> ");
        assert_eq!(text.as_str(), " \t-> ");
    }
}
