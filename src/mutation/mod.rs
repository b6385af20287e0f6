//! Boundary to the external keyword mutation collaborators.
//!
//! The core never performs a mutation itself. It emits [`MutationRequest`]s
//! (wrapped in [`crate::app::Action::Mutate`]) that the plugin shim turns into
//! command invocations; completion is reported back as a [`MutationOutcome`].
//!
//! # Modules
//!
//! - `messages`: Request types, trace context propagation and JSON payloads

pub mod messages;

pub use messages::{MutationKind, MutationRequest, TraceContext};

/// Result of an external mutation, as reported by its command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// The collaborator that ran.
    pub kind: MutationKind,
    /// Whether the command exited successfully.
    pub success: bool,
    /// The collaborator's own message (stdout on success, stderr on failure).
    pub message: String,
}
