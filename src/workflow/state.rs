//! Workflow run states.

use std::fmt;

/// Progress of one check-in run
///
/// Runs move `Idle -> SessionStarted -> LoggedIn -> SignedIn -> Done`;
/// any stage error jumps to `Failed`. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    /// Created, nothing executed yet
    Idle,
    /// Browser session is up
    SessionStarted,
    /// Credentials submitted and accepted
    LoggedIn,
    /// Check-in control clicked
    SignedIn,
    /// Run finished successfully
    Done,
    /// A stage reported an error
    Failed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::SessionStarted => "session_started",
            WorkflowState::LoggedIn => "logged_in",
            WorkflowState::SignedIn => "signed_in",
            WorkflowState::Done => "done",
            WorkflowState::Failed => "failed",
        }
    }

    /// Whether the run can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Done | WorkflowState::Failed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_values() {
        assert_eq!(WorkflowState::Idle.as_str(), "idle");
        assert_eq!(WorkflowState::SessionStarted.as_str(), "session_started");
        assert_eq!(WorkflowState::LoggedIn.as_str(), "logged_in");
        assert_eq!(WorkflowState::SignedIn.as_str(), "signed_in");
        assert_eq!(WorkflowState::Done.as_str(), "done");
        assert_eq!(WorkflowState::Failed.as_str(), "failed");
    }

    #[test]
    fn test_only_done_and_failed_are_terminal() {
        assert!(!WorkflowState::Idle.is_terminal());
        assert!(!WorkflowState::SessionStarted.is_terminal());
        assert!(!WorkflowState::LoggedIn.is_terminal());
        assert!(!WorkflowState::SignedIn.is_terminal());
        assert!(WorkflowState::Done.is_terminal());
        assert!(WorkflowState::Failed.is_terminal());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(WorkflowState::Done.to_string(), "done");
        assert_eq!(WorkflowState::Failed.to_string(), "failed");
    }
}
