/// Process execution behind the command printer
use crate::printer::{Invocation, PrintError};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Shell used to interpret commands.
pub const SHELL: &str = "/bin/sh";

/// Runs an external command with `input` on its standard input and waits
/// for it to finish.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send {
    fn run(&mut self, invocation: &Invocation, input: &[u8]) -> Result<(), PrintError>;
}

/// Runs commands through [`SHELL`], switching user with `su` when the
/// invocation names one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    fn command(invocation: &Invocation) -> Command {
        match invocation.user() {
            Some(user) => {
                let mut cmd = Command::new("su");
                cmd.arg(user)
                    .arg("-s")
                    .arg(SHELL)
                    .arg("-c")
                    .arg(invocation.command());
                cmd
            }
            None => {
                let mut cmd = Command::new(SHELL);
                cmd.arg("-c").arg(invocation.command());
                cmd
            }
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, invocation: &Invocation, input: &[u8]) -> Result<(), PrintError> {
        let mut child = Self::command(invocation)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| PrintError::command(invocation.command(), e))?;

        if let Some(mut stdin) = child.stdin.take() {
            // the command is free to ignore its input
            let written = match stdin.write_all(input) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            };
            drop(stdin);
            if let Err(e) = written {
                let _ = child.wait();
                return Err(PrintError::command(invocation.command(), e));
            }
        }

        let status = child
            .wait()
            .map_err(|e| PrintError::command(invocation.command(), e))?;
        if status.success() {
            Ok(())
        } else {
            Err(PrintError::command(
                invocation.command(),
                format!("exited with {status}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_command_line() {
        let cmd = ShellRunner::command(&Invocation::new("cat > /dev/null"));
        assert_eq!(cmd.get_program(), SHELL);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["-c", "cat > /dev/null"]);
    }

    #[test]
    fn test_run_as_user_command_line() {
        let cmd = ShellRunner::command(&Invocation::new("logger").with_user("nobody"));
        assert_eq!(cmd.get_program(), "su");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["nobody", "-s", SHELL, "-c", "logger"]);
    }

    #[test]
    fn test_shell_runner_success_and_failure() {
        let mut runner = ShellRunner;
        runner
            .run(&Invocation::new("cat > /dev/null"), b"record")
            .unwrap();

        let err = runner.run(&Invocation::new("exit 3"), b"").unwrap_err();
        assert!(matches!(err, PrintError::Command { .. }));
        assert!(err.to_string().contains("exit 3"));
    }

    #[test]
    fn test_mock_runner_receives_input() {
        let mut mock = MockCommandRunner::new();
        mock.expect_run()
            .withf(|invocation, input| invocation.command() == "logger" && input == b"abc")
            .times(1)
            .returning(|_, _| Ok(()));
        assert!(mock.run(&Invocation::new("logger"), b"abc").is_ok());
    }
}
