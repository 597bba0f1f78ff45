use std::io::Write;

use sms_resource_core::error::ResourceError;

pub mod check;
pub mod get;
pub mod put;

/// Process status a handler asks its binary to exit with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

impl RunStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

pub(crate) fn write_stdout(stdout: &mut impl Write, body: &str) -> Result<(), ResourceError> {
    writeln!(stdout, "{body}")
        .and_then(|()| stdout.flush())
        .map_err(ResourceError::WriteStdout)
}

pub(crate) fn report_failure(stderr: &mut impl Write, error: &ResourceError) -> RunStatus {
    tracing::debug!(%error, "resource step failed");
    // Nothing else can be reported if stderr itself is gone.
    let _ = writeln!(stderr, "{error}").and_then(|()| stderr.flush());
    RunStatus::Failure
}
