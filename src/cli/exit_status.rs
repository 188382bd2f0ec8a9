use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, nothing left to do
/// - `Failure` (1): Command completed but found issues, rejected input, or left work to do
/// - `Error` (2): Command failed (unreadable resource, invalid config, write error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed and left nothing to do.
    Success,
    /// Command completed but found issues or left work undone.
    Failure,
    /// Command could not run (unreadable resource, invalid config, failed write).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
