//! Serpdeck: a Zellij plugin for browsing the search keywords tracked for a
//! domain.
//!
//! Serpdeck shows one domain's tracked keywords split by device, and provides:
//! - Device tabs (desktop, mobile) with per-device counts
//! - Search, tag and country filters with a lenient sort key
//! - Multi-selection that survives re-filtering as long as rows stay visible
//! - Bulk refresh and confirmed bulk removal, favorites, tag editing and
//!   adding new keywords, all delegated to external commands
//! - A details view with the keyword's full ranking history

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Keys, run_command
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, input modes                      │
//! │  - Selection and bulk actions                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Pipeline      │   │ Mutations     │
//! │ (ui/)         │   │ (pipeline/)   │   │ (mutation/)   │
//! │ - Rendering   │   │ - Filter      │   │ - Requests    │
//! │ - Theming     │   │ - Sort        │   │ - Payloads    │
//! │ - Components  │   │ - Group       │   │ - Trace ctx   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Command templates, sandbox paths                 │
//! │  - Keyword model, source payload parsing, errors    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/serpdeck.wasm" {
//!         domain "example.com"
//!         source_command "serp-cli keywords --domain {domain} --json"
//!         refresh_command "serp-cli refresh --domain {domain}"
//!         delete_command "serp-cli delete --domain {domain}"
//!         favorite_command "serp-cli favorite --domain {domain}"
//!         tags_command "serp-cli tags --domain {domain}"
//!         add_command "serp-cli add --domain {domain}"
//!         device "desktop"
//!         sort "pos_asc"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! Mutation commands receive the request as a JSON document in their last
//! argument.
//!
//! # Example
//!
//! ```rust
//! use serpdeck::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config {
//!     domain: "example.com".to_string(),
//!     ..Config::default()
//! });
//!
//! let payload = r#"[{"ID": 1, "keyword": "rust", "device": "desktop"}]"#;
//! handle_event(&mut state, &Event::KeywordsLoaded { payload: payload.to_string() })?;
//! handle_event(&mut state, &Event::ToggleRow)?;
//!
//! let (_, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert!(matches!(actions.as_slice(), [Action::Mutate(_)]));
//! # Ok::<(), serpdeck::SerpdeckError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod mutation;
pub mod observability;
pub mod pipeline;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewDefaults};
pub use domain::{Device, Keyword, KeywordId, Result, SerpdeckError};
pub use infrastructure::CommandSet;
pub use mutation::{MutationKind, MutationOutcome, MutationRequest};
pub use pipeline::SortKey;
pub use ui::Theme;

use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Domain whose keywords are shown. Substituted for `{domain}` in
    /// command templates.
    pub domain: String,

    /// Keyword source and mutation commands.
    pub commands: CommandSet,

    /// Device tab shown on load. Default: desktop.
    pub device: Device,

    /// Sort key on load. Unknown names fall back to insertion order.
    /// Default: `date_asc`.
    pub sort: SortKey,

    /// Built-in theme name (`catppuccin-mocha`, `catppuccin-latte`).
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`.
    pub trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Every key is optional; malformed values fall back to defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use serpdeck::{Config, Device, SortKey};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("domain".to_string(), "example.com".to_string());
    /// map.insert("device".to_string(), "mobile".to_string());
    /// map.insert("sort".to_string(), "alpha_desc".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.domain, "example.com");
    /// assert_eq!(config.device, Device::Mobile);
    /// assert_eq!(config.sort, SortKey::AlphaDesc);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let device = config
            .get("device")
            .map_or_else(Device::default, |raw| {
                raw.parse().unwrap_or_else(|err| {
                    tracing::warn!(device = %raw, error = %err, "unknown device, using default");
                    Device::default()
                })
            });

        let sort = config
            .get("sort")
            .map_or_else(SortKey::default, |raw| SortKey::parse_lenient(raw));

        Self {
            domain: config
                .get("domain")
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            commands: CommandSet::from_config(config),
            device,
            sort,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// The view the plugin opens with.
    #[must_use]
    pub const fn view_defaults(&self) -> ViewDefaults {
        ViewDefaults {
            device: self.device,
            sort: self.sort,
        }
    }
}

/// Creates the initial `AppState` for `config`.
///
/// The theme is taken from `theme_file` if set, else from `theme`, else the
/// default. A theme that fails to load is logged and replaced by the default.
/// The state starts out loading; the shim requests the keyword source next.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(domain = %config.domain, "initializing serpdeck plugin");

    let theme = load_theme(config);
    AppState::new(config.domain.clone(), theme, config.view_defaults())
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        let path = infrastructure::expand_tilde(theme_file);
        return Theme::from_file(&path).unwrap_or_else(|e| {
            tracing::debug!(theme_file = %path, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.domain, "");
        assert_eq!(config.device, Device::Desktop);
        assert_eq!(config.sort, SortKey::DateAsc);
        assert!(config.commands.source.is_none());
        assert!(config.commands.mutations.is_empty());
    }

    #[test]
    fn unknown_values_fall_back() {
        let config = Config::from_zellij(&map(&[("device", "tablet"), ("sort", "volume_desc")]));
        assert_eq!(config.device, Device::Desktop);
        assert_eq!(config.sort, SortKey::Insertion);
    }

    #[test]
    fn reads_commands() {
        let config = Config::from_zellij(&map(&[
            ("source_command", "serp list {domain}"),
            ("delete_command", "serp delete {domain}"),
        ]));
        let source = config.commands.source.as_ref().unwrap();
        assert_eq!(source.render("a.com", None), vec!["serp", "list", "a.com"]);
        assert!(config.commands.mutation(MutationKind::Delete).is_some());
        assert!(config.commands.mutation(MutationKind::Refresh).is_none());
    }

    #[test]
    fn initialize_applies_view_defaults() {
        let config = Config::from_zellij(&map(&[
            ("domain", " example.com "),
            ("device", "mobile"),
            ("sort", "pos_asc"),
            ("theme", "catppuccin-latte"),
        ]));
        let state = initialize(&config);

        assert_eq!(state.domain, "example.com");
        assert_eq!(state.device(), Device::Mobile);
        assert_eq!(state.sort(), SortKey::PosAsc);
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert!(state.loading);
    }

    #[test]
    fn missing_theme_file_falls_back_to_default() {
        let config = Config {
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.theme.name, Theme::default().name);
    }
}
