//! Child-process execution for upstream scaffolders and package managers.
//!
//! Every command is spawned as the leader of its own process group, so a
//! deadline kills whatever the scaffolder started along with it.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Mutex, PoisonError, mpsc};
use std::thread;
use std::time::Duration;

use command_group::{CommandGroup, GroupChild};
use tracing::{debug, info, instrument, warn};
use wait_timeout::ChildExt;

use kiln_core::application::{CommandSpec, ProcessRunner, ScaffoldError};

/// Deadline for one scaffolder or install run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Deadline for version queries.
const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// How long to wait for buffered output once the group is gone.
const READ_GRACE: Duration = Duration::from_secs(2);

/// Runs commands on the host with a hard deadline.
///
/// In dry-run mode commands are recorded instead of spawned; callers read
/// them back through [`ProcessRunner::recorded_commands`].
#[derive(Debug)]
pub struct SystemProcessRunner {
    timeout: Duration,
    recorded: Mutex<Vec<String>>,
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            recorded: Mutex::new(Vec::new()),
        }
    }
}

impl ProcessRunner for SystemProcessRunner {
    #[instrument(skip_all, fields(command = %command, framework = framework))]
    fn run(
        &self,
        command: &CommandSpec,
        dry_run: bool,
        framework: &str,
    ) -> Result<(), ScaffoldError> {
        let line = command.to_string();

        if dry_run {
            info!(cwd = %command.cwd.display(), "Dry run, not spawning");
            self.recorded
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(line);
            return Ok(());
        }

        info!(cwd = %command.cwd.display(), "Running command");
        match execute(command, self.timeout) {
            Ok(Execution::Exited { status, stderr, .. }) if status.success() => {
                debug!(stderr_bytes = stderr.len(), "Command succeeded");
                Ok(())
            }
            Ok(Execution::Exited { status, stderr, .. }) => {
                let code = status.code().unwrap_or(-1);
                warn!(code, "Command failed");
                Err(ScaffoldError::process_failure(framework, line, code, &stderr))
            }
            Ok(Execution::TimedOut) => {
                warn!(timeout = ?self.timeout, "Command timed out");
                Err(ScaffoldError::process_failure(
                    framework,
                    line,
                    -1,
                    &format!("timed out after {:?}", self.timeout),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Command could not start");
                Err(ScaffoldError::process_failure(
                    framework,
                    line,
                    -1,
                    &format!("failed to start {}: {e}", command.program),
                ))
            }
        }
    }

    #[instrument(skip_all, fields(command = %command))]
    fn probe(&self, command: &CommandSpec) -> Option<String> {
        match execute(command, PROBE_TIMEOUT.min(self.timeout)) {
            Ok(Execution::Exited { status, stdout, .. }) if status.success() => {
                let out = stdout.trim();
                (!out.is_empty()).then(|| out.to_string())
            }
            other => {
                debug!(outcome = ?other.map(|e| e.is_timeout()), "Probe failed");
                None
            }
        }
    }

    fn recorded_commands(&self) -> Vec<String> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Debug)]
enum Execution {
    Exited {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    TimedOut,
}

impl Execution {
    fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }
}

fn execute(command: &CommandSpec, timeout: Duration) -> io::Result<Execution> {
    let mut group = Command::new(&command.program)
        .args(&command.args)
        .current_dir(&command.cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .group_spawn()?;

    let stdout = group.inner().stdout.take().map(drain);
    let stderr = group.inner().stderr.take().map(drain);

    let status = group.inner().wait_timeout(timeout)?;
    // Leftover members would hold the pipes open.
    terminate(&mut group, status.is_none());
    let (stdout, stderr) = (collect(stdout), collect(stderr));

    Ok(match status {
        Some(status) => Execution::Exited {
            status,
            stdout,
            stderr,
        },
        None => Execution::TimedOut,
    })
}

fn terminate(group: &mut GroupChild, leader_running: bool) {
    if let Err(e) = group.kill() {
        if leader_running {
            warn!(error = %e, "Cannot kill process group");
        }
    }
    if leader_running {
        let _ = group.wait();
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

fn collect(output: Option<mpsc::Receiver<String>>) -> String {
    output
        .and_then(|rx| rx.recv_timeout(READ_GRACE).ok())
        .unwrap_or_default()
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Instant;

    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh", std::env::temp_dir()).args(["-c", script])
    }

    #[test]
    fn successful_command_is_ok() {
        let runner = SystemProcessRunner::new();
        assert!(runner.run(&sh("exit 0"), false, "astro").is_ok());
    }

    #[test]
    fn failure_carries_exit_code_and_stderr_only() {
        let runner = SystemProcessRunner::new();
        let err = runner
            .run(&sh("echo visible; echo boom >&2; exit 3"), false, "nextjs")
            .unwrap_err();
        assert_eq!(err.exit_code, 3);
        assert_eq!(err.framework, "nextjs");
        assert_eq!(err.stderr, "boom");
        assert!(err.command.starts_with("sh -c"));
    }

    #[test]
    fn long_stderr_is_truncated_to_tail() {
        let runner = SystemProcessRunner::new();
        let err = runner
            .run(
                &sh("i=1; while [ $i -le 80 ]; do echo line$i >&2; i=$((i+1)); done; exit 1"),
                false,
                "astro",
            )
            .unwrap_err();
        let lines: Vec<&str> = err.stderr.lines().collect();
        assert_eq!(lines.len(), 50);
        assert_eq!(lines[0], "line31");
        assert_eq!(lines[49], "line80");
    }

    #[test]
    fn missing_program_reports_minus_one() {
        let runner = SystemProcessRunner::new();
        let cmd = CommandSpec::new("kiln-definitely-not-a-binary", std::env::temp_dir());
        let err = runner.run(&cmd, false, "sveltekit").unwrap_err();
        assert_eq!(err.exit_code, -1);
        assert!(err.stderr.contains("failed to start"));
    }

    #[test]
    fn deadline_kills_the_child() {
        let runner = SystemProcessRunner::with_timeout(Duration::from_millis(300));
        let started = Instant::now();
        let cmd = CommandSpec::new("sleep", std::env::temp_dir()).arg("10");
        let err = runner.run(&cmd, false, "nextjs").unwrap_err();
        assert_eq!(err.exit_code, -1);
        assert_eq!(err.stderr, "timed out after 300ms");
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn deadline_kills_grandchildren_too() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("late");
        let script = format!("sh -c 'sleep 2; touch {}' ; wait", marker.display());
        let runner = SystemProcessRunner::with_timeout(Duration::from_millis(300));

        let started = Instant::now();
        let err = runner.run(&sh(&script), false, "astro").unwrap_err();
        assert!(err.stderr.starts_with("timed out"));
        assert!(started.elapsed() < Duration::from_secs(2));

        thread::sleep(Duration::from_millis(2500));
        assert!(!marker.exists());
    }

    #[test]
    fn dry_run_records_without_spawning() {
        let runner = SystemProcessRunner::new();
        let cmd = CommandSpec::new("kiln-definitely-not-a-binary", "/work")
            .args(["create", "app"]);
        runner.run(&cmd, true, "astro").unwrap();
        assert_eq!(
            runner.recorded_commands(),
            vec!["kiln-definitely-not-a-binary create app".to_string()]
        );
    }

    #[test]
    fn probe_returns_trimmed_stdout() {
        let runner = SystemProcessRunner::new();
        assert_eq!(runner.probe(&sh("echo '  15.4.2  '")).as_deref(), Some("15.4.2"));
        assert_eq!(runner.probe(&sh("exit 1")), None);
    }
}
