use crate::event::Timestamp;
use crate::field::Field;
use crate::printer::{render, PrintError, Printer};
use std::io::Write;

/// Writes one newline-terminated record per connection to a stream.
#[derive(Debug)]
pub struct StreamPrinter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> StreamPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Printer for StreamPrinter<W> {
    fn print(&mut self, fields: &[Field], at: Timestamp) -> Result<(), PrintError> {
        let mut record = render(fields, at);
        record.push_bytes(b"\n");
        self.out.write_all(record.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::from_timeval;
    use crate::field::{RequestSize, Text};
    use std::io;

    #[test]
    fn test_stream_printer_terminates_records() {
        let mut printer = StreamPrinter::new(Vec::new());
        let fields: Vec<Field> = vec![Text::new("one").into()];
        printer.print(&fields, from_timeval(0, 0)).unwrap();
        let fields: Vec<Field> = vec![Text::new("two\u{7f}").into(), RequestSize::default().into()];
        printer.print(&fields, from_timeval(0, 0)).unwrap();
        assert_eq!(printer.into_inner(), b"one\ntwo.0\n");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stream_printer_reports_io_errors() {
        let mut printer = StreamPrinter::new(FailingWriter);
        let fields: Vec<Field> = vec![Text::new("x").into()];
        let err = printer.print(&fields, from_timeval(0, 0)).unwrap_err();
        assert!(matches!(err, PrintError::Io(_)));
    }
}
