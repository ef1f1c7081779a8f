//! Output of rendered records.
//!
//! Two printers are provided:
//!
//! - [`StreamPrinter`] writes each record followed by a newline to any
//!   [`std::io::Write`] destination and flushes.
//! - [`CommandPrinter`] hands each record, unterminated, to an external
//!   command on its standard input, optionally as another user.
//!
//! Both run the record through the sanitizing transform before it leaves
//! the process.

mod command;
mod error;
mod runner;
mod stream;
mod trait_def;

pub use command::{CommandPrinter, Invocation};
pub use error::PrintError;
pub use runner::{CommandRunner, ShellRunner, SHELL};
pub use stream::StreamPrinter;
pub use trait_def::{render, Printer};

#[cfg(test)]
pub use runner::MockCommandRunner;
