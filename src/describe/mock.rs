use std::sync::atomic::{AtomicUsize, Ordering};

use crate::describe::DescribeInvoker;
use crate::error::{Result, VersionError};

#[derive(Debug, Clone)]
enum Outcome {
    Output(String),
    NotFound,
    ExitCode(i32),
}

/// Mock invoker for testing without spawning processes
#[derive(Debug)]
pub struct MockDescribe {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl MockDescribe {
    /// Succeeds with the given raw describe output
    pub fn output(raw: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Output(raw.into()))
    }

    /// Behaves as if the tool binary were missing
    pub fn not_found() -> Self {
        Self::with_outcome(Outcome::NotFound)
    }

    /// Behaves as if the tool exited with the given status
    pub fn exit_code(code: i32) -> Self {
        Self::with_outcome(Outcome::ExitCode(code))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        MockDescribe {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `describe` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DescribeInvoker for MockDescribe {
    fn tool(&self) -> &str {
        "git"
    }

    fn describe(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Output(raw) => Ok(raw.clone()),
            Outcome::NotFound => Err(VersionError::ToolNotFound {
                tool: self.tool().to_string(),
            }),
            Outcome::ExitCode(code) => Err(VersionError::ToolExecutionFailed {
                tool: self.tool().to_string(),
                code: Some(*code),
                stderr: String::new(),
            }),
        }
    }
}
