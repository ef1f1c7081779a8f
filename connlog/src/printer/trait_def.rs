/// Printer trait shared by every output destination
use crate::event::Timestamp;
use crate::field::{render_fields, Field};
use crate::printer::PrintError;
use crate::record::Record;

/// Destination for the record of a closed connection.
pub trait Printer: Send {
    /// Render `fields` in order at time `at` and deliver the result.
    fn print(&mut self, fields: &[Field], at: Timestamp) -> Result<(), PrintError>;
}

impl<P: Printer + ?Sized> Printer for Box<P> {
    fn print(&mut self, fields: &[Field], at: Timestamp) -> Result<(), PrintError> {
        (**self).print(fields, at)
    }
}

/// Render `fields` into a sanitized record.
pub fn render(fields: &[Field], at: Timestamp) -> Record {
    let mut record = render_fields(fields, at);
    record.sanitize();
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::from_timeval;
    use crate::field::Text;

    #[test]
    fn test_render_sanitizes() {
        let fields: Vec<Field> = vec![Text::new("a\u{1}b\tc\n").into()];
        let record = render(&fields, from_timeval(0, 0));
        assert_eq!(record.as_bytes(), b"a.b\tc\n");
    }

    #[test]
    fn test_render_is_repeatable() {
        let fields: Vec<Field> = vec![
            Text::new("x").into(),
            crate::field::RecordTime::default().into(),
        ];
        let at = from_timeval(1_700_000_000, 250_000);
        assert_eq!(render(&fields, at).as_bytes(), render(&fields, at).as_bytes());
    }
}
