use crate::event::Timestamp;
use crate::field::Field;
use crate::printer::{render, CommandRunner, PrintError, Printer, ShellRunner};

/// A command line and the optional user it runs as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: String,
    user: Option<String>,
}

impl Invocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

/// Runs a command once per connection, feeding it the sanitized record.
///
/// The record carries no line terminator. It is fully rendered before the
/// command is started.
#[derive(Debug)]
pub struct CommandPrinter<R: CommandRunner = ShellRunner> {
    invocation: Invocation,
    runner: R,
}

impl CommandPrinter<ShellRunner> {
    pub fn new(command: impl Into<String>) -> Self {
        Self::with_runner(Invocation::new(command), ShellRunner)
    }
}

impl<R: CommandRunner> CommandPrinter<R> {
    /// Create a printer with a custom runner, e.g. a mock in tests.
    pub fn with_runner(invocation: Invocation, runner: R) -> Self {
        Self { invocation, runner }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.invocation = self.invocation.with_user(user);
        self
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }
}

impl<R: CommandRunner> Printer for CommandPrinter<R> {
    fn print(&mut self, fields: &[Field], at: Timestamp) -> Result<(), PrintError> {
        let record = render(fields, at);
        self.runner.run(&self.invocation, record.as_bytes())
    }
}
