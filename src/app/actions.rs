//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin shim executes them in order: closing the pane, running the keyword
//! source command, or running a mutation command with a serialized
//! [`MutationRequest`] payload.
//!
//! # Example
//!
//! ```rust
//! use serpdeck::app::Action;
//! use serpdeck::mutation::MutationRequest;
//!
//! let actions = vec![
//!     Action::Mutate(MutationRequest::refresh(vec![1, 2])),
//!     Action::LoadKeywords { domain: "example.com".to_string() },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::mutation::MutationRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Runs the keyword source for a domain.
    ///
    /// The answer comes back as `Event::KeywordsLoaded` or
    /// `Event::SourceFailed`.
    LoadKeywords {
        /// Domain whose keywords are requested.
        domain: String,
    },

    /// Hands a mutation to its external collaborator.
    ///
    /// Completion is reported as `Event::MutationFinished`.
    Mutate(MutationRequest),
}
