//! Check-in workflow orchestration.

pub mod signin;
pub mod state;

pub use signin::SignInWorkflow;
pub use state::WorkflowState;
