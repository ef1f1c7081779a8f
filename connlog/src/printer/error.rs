use std::fmt::Display;
use thiserror::Error;

/// Failure to deliver one record. Never fatal to the process.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("failed to write record: {0}")]
    Io(#[from] std::io::Error),

    #[error("command '{command}' failed: {reason}")]
    Command { command: String, reason: String },
}

impl PrintError {
    pub fn command(command: &str, reason: impl Display) -> Self {
        PrintError::Command {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_message() {
        let err = PrintError::command("logger -t web", "exited with status 1");
        assert_eq!(
            err.to_string(),
            "command 'logger -t web' failed: exited with status 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: PrintError = io.into();
        assert!(matches!(err, PrintError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
