//! Terminal rendering.
//!
//! Rendering never reads `AppState` directly: the state first produces a
//! [`UIViewModel`], and the components draw that with ANSI escapes.
//!
//! ```text
//! AppState ─► compute_viewmodel ─► UIViewModel ─► components ─► stdout
//! ```
//!
//! - [`viewmodel`]: Plain data for every visible element
//! - [`renderer`]: Entry point called from the plugin's `render`
//! - [`components`]: One renderer per screen region, plus modals
//! - [`helpers`]: Width handling, match highlighting, cursor positioning
//! - [`theme`]: TOML color themes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, ModalInfo, Toolbar, UIViewModel};
