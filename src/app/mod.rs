//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the domain and
//! pipeline layers. It implements the event-driven architecture that powers
//! the interactive table.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Commands
//!                           ↑                                          ↓
//!                           └─────── Source / Mutation Results ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`bulk`]: Batch refresh/remove with the removal confirmation gate
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input modes and overlay state
//! - [`selection`]: Multi-selection state machine
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod bulk;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use bulk::{BulkCoordinator, RemovalGate};
pub use handler::{handle_event, Event};
pub use modes::{DraftBatch, DraftField, FilterDimension, FilterOption, InputMode, KeywordDraft, TagEditor};
pub use selection::{Selection, SelectionEvent};
pub use state::{AppState, Notice, NoticeLevel, ViewDefaults};
