//! Domain layer for the serpdeck plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific
//! APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`keyword`]: Tracked keyword model, device context and source payload parsing
//!
//! # Examples
//!
//! ```
//! use serpdeck::domain::{Device, Keyword};
//!
//! let keyword = Keyword::new(1, "rust tutorial", Device::Desktop);
//! assert_eq!(keyword.device, Device::Desktop);
//! assert!(keyword.tags.is_empty());
//! ```

pub mod error;
pub mod keyword;

pub use error::{Result, SerpdeckError};
pub use keyword::{parse_keywords, Device, Keyword, KeywordId};
