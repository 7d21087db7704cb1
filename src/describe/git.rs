use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;
use wait_timeout::ChildExt;

use crate::describe::DescribeInvoker;
use crate::error::{Result, VersionError};

const GIT: &str = "git";

/// Runs `git describe --long` as a child process.
///
/// The binary location is resolved once, when the invoker is built, and kept
/// as plain state so callers can inject another path (or none) instead.
#[derive(Debug, Clone)]
pub struct GitDescribe {
    binary: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl GitDescribe {
    /// Locates `git` on `PATH`.
    ///
    /// An absent binary is not an error here; [DescribeInvoker::describe] reports
    /// it as [VersionError::ToolNotFound] when a version is actually requested.
    pub fn discover() -> Self {
        let binary = match which::which(GIT) {
            Ok(path) => {
                debug!("Found {} at {}", GIT, path.display());
                Some(path)
            }
            Err(e) => {
                debug!("\"{}\" binary was not found: {}", GIT, e);
                None
            }
        };
        Self::with_binary(binary)
    }

    /// Uses the given binary, or behaves as if git were not installed when `None`.
    pub fn with_binary(binary: Option<PathBuf>) -> Self {
        GitDescribe {
            binary,
            working_dir: None,
            timeout: None,
        }
    }

    /// Runs the command inside `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Bounds how long the command may run. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };

        match child.wait_timeout(timeout)? {
            Some(status) => Ok(status),
            None => {
                // reap the child so it does not linger as a zombie
                let _ = child.kill();
                let _ = child.wait();
                Err(VersionError::ToolTimedOut {
                    tool: GIT.to_string(),
                    timeout,
                })
            }
        }
    }
}

impl DescribeInvoker for GitDescribe {
    fn tool(&self) -> &str {
        GIT
    }

    fn describe(&self) -> Result<String> {
        let binary = self.binary.as_deref().ok_or_else(|| VersionError::ToolNotFound {
            tool: GIT.to_string(),
        })?;

        let mut cmd = Command::new(binary);
        cmd.args(["describe", "--long"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        debug!(
            "Running {} describe --long in {}",
            binary.display(),
            self.working_dir
                .as_deref()
                .unwrap_or_else(|| Path::new("."))
                .display()
        );

        let mut child = cmd.spawn()?;

        // drain both pipes while waiting so a chatty child cannot block on a full pipe
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());
        let status = self.wait(&mut child)?;

        let stdout = join_reader(stdout)?;
        let stderr = join_reader(stderr)?;

        if !status.success() {
            return Err(VersionError::ToolExecutionFailed {
                tool: GIT.to_string(),
                code: status.code(),
                stderr,
            });
        }

        debug!("{} describe returned {:?}", GIT, stdout.trim());
        Ok(stdout)
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

fn join_reader(reader: JoinHandle<io::Result<String>>) -> Result<String> {
    let output = reader
        .join()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "pipe reader thread panicked"))??;
    Ok(output)
}
