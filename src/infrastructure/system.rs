//! OS command invocation for maintenance actions

use crate::error::{Result, TamioError};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub const UNINSTALL_TIMEOUT: Duration = Duration::from_secs(300);
pub const STOP_SERVICE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DISABLE_SERVICE_TIMEOUT: Duration = Duration::from_secs(30);
pub const RENAME_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A program invocation with its time limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl SystemCommand {
    pub fn new(program: &str, args: &[&str], timeout: Duration) -> Self {
        SystemCommand {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timeout,
        }
    }

    /// `wmic computersystem where name='<current>' rename <new>`
    pub fn rename_computer(current: &str, new_name: &str) -> Self {
        let filter = format!("name='{}'", current);
        SystemCommand::new(
            "wmic",
            &["computersystem", "where", &filter, "rename", new_name],
            RENAME_TIMEOUT,
        )
    }

    /// `net stop <service>`
    pub fn stop_service(service: &str) -> Self {
        SystemCommand::new("net", &["stop", service], STOP_SERVICE_TIMEOUT)
    }

    /// `sc config <service> start= disabled`
    pub fn disable_service(service: &str) -> Self {
        SystemCommand::new(
            "sc",
            &["config", service, "start=", "disabled"],
            DISABLE_SERVICE_TIMEOUT,
        )
    }

    /// `msiexec /x <product> /qn /norestart`
    pub fn uninstall_product(product_code: &str) -> Self {
        SystemCommand::new(
            "msiexec",
            &["/x", product_code, "/qn", "/norestart"],
            UNINSTALL_TIMEOUT,
        )
    }

    /// Command line as it would be typed
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes system commands
pub trait CommandRunner {
    /// Run to completion and capture output. A non-zero exit is not an error
    /// at this level; only failing to run or exceeding the timeout is.
    fn run(&self, command: &SystemCommand) -> Result<CommandOutput>;
}

/// Runs commands as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &SystemCommand) -> Result<CommandOutput> {
        debug!(command = %command.display(), "Spawning");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TamioError::CommandFailed {
                program: command.program.clone(),
                code: None,
                stderr: format!("failed to start: {}", e),
            })?;

        // Drain the pipes on their own threads so a chatty child cannot block
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let deadline = Instant::now() + command.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                error!(command = %command.display(), "Timed out");
                return Err(TamioError::Timeout {
                    program: command.program.clone(),
                    timeout: command.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        Ok(CommandOutput {
            code: status.code(),
            stdout: stdout.map(join_output).unwrap_or_default(),
            stderr: stderr.map(join_output).unwrap_or_default(),
        })
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_output(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

/// Run a command and turn a non-zero exit into `CommandFailed`.
pub fn execute(runner: &dyn CommandRunner, command: &SystemCommand) -> Result<CommandOutput> {
    info!(command = %command.display(), "Running");
    let output = runner.run(command)?;

    if output.success() {
        info!(command = %command.display(), "Succeeded");
        Ok(output)
    } else {
        let stderr = if output.stderr.trim().is_empty() {
            output.stdout.trim().to_string()
        } else {
            output.stderr.trim().to_string()
        };
        error!(command = %command.display(), code = ?output.code, %stderr, "Failed");
        Err(TamioError::CommandFailed {
            program: command.program.clone(),
            code: output.code,
            stderr,
        })
    }
}

pub fn is_windows() -> bool {
    cfg!(windows)
}

/// Fail with `Unsupported` unless running on Windows.
pub fn require_windows(feature: &str) -> Result<()> {
    if is_windows() {
        Ok(())
    } else {
        Err(TamioError::Unsupported(format!(
            "{} is only available on Windows",
            feature
        )))
    }
}

/// Name of this computer as Windows reports it
pub fn current_hostname() -> Result<String> {
    std::env::var("COMPUTERNAME")
        .or_else(|_| std::env::var("HOSTNAME"))
        .map_err(|_| TamioError::Config("Cannot determine the current computer name".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maintenance_command_lines() {
        assert_eq!(
            SystemCommand::stop_service("MySQL-POS").display(),
            "net stop MySQL-POS"
        );
        assert_eq!(
            SystemCommand::disable_service("POSDaemonService").display(),
            "sc config POSDaemonService start= disabled"
        );
        assert_eq!(
            SystemCommand::uninstall_product("{B7C5EA94-B96A-41F5-BE95-25D78B486678}").display(),
            "msiexec /x {B7C5EA94-B96A-41F5-BE95-25D78B486678} /qn /norestart"
        );
        assert_eq!(
            SystemCommand::rename_computer("DESKTOP-1", "POS-01").args,
            vec!["computersystem", "where", "name='DESKTOP-1'", "rename", "POS-01"]
        );
    }

    #[test]
    fn test_timeouts() {
        assert_eq!(SystemCommand::uninstall_product("x").timeout.as_secs(), 300);
        assert_eq!(SystemCommand::stop_service("x").timeout.as_secs(), 60);
        assert_eq!(SystemCommand::disable_service("x").timeout.as_secs(), 30);
    }

    struct FixedRunner(CommandOutput);

    impl CommandRunner for FixedRunner {
        fn run(&self, _command: &SystemCommand) -> Result<CommandOutput> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_execute_maps_failure() {
        let runner = FixedRunner(CommandOutput {
            code: Some(2),
            stdout: "The service name is invalid.".to_string(),
            stderr: String::new(),
        });

        match execute(&runner, &SystemCommand::stop_service("Nope")).unwrap_err() {
            TamioError::CommandFailed {
                program,
                code,
                stderr,
            } => {
                assert_eq!(program, "net");
                assert_eq!(code, Some(2));
                assert_eq!(stderr, "The service name is invalid.");
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_execute_success() {
        let runner = FixedRunner(CommandOutput {
            code: Some(0),
            ..CommandOutput::default()
        });
        assert!(execute(&runner, &SystemCommand::stop_service("MySQL-POS")).is_ok());
    }

    #[test]
    fn test_process_runner_missing_program() {
        let command = SystemCommand::new(
            "tamio-definitely-not-a-program",
            &[],
            Duration::from_secs(1),
        );
        assert!(matches!(
            ProcessRunner.run(&command),
            Err(TamioError::CommandFailed { code: None, .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_captures_output() {
        let command = SystemCommand::new("sh", &["-c", "echo out; echo err >&2; exit 3"], Duration::from_secs(10));
        let output = ProcessRunner.run(&command).unwrap();
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[test]
    fn test_process_runner_timeout() {
        let command = SystemCommand::new("sleep", &["5"], Duration::from_millis(200));
        assert!(matches!(
            ProcessRunner.run(&command),
            Err(TamioError::Timeout { .. })
        ));
    }

    #[test]
    fn test_require_windows() {
        assert_eq!(require_windows("Renaming").is_ok(), is_windows());
    }
}
