//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents, either built in (Catppuccin variants embedded
//! with `include_str!`) or loaded from a user file.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme (default)
//! - `catppuccin-latte`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! tab_active_fg = "#1e1e2e"
//! tab_active_bg = "#89b4fa"
//! cursor_fg = "#1e1e2e"
//! cursor_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! toolbar_accent = "#f5c2e7"
//! bulk_bar_fg = "#1e1e2e"
//! bulk_bar_bg = "#fab387"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! favorite_fg = "#f9e2af"
//! rank_up_fg = "#a6e3a1"
//! rank_down_fg = "#f38ba8"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use serpdeck::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{Result, SerpdeckError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title text color.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active device tab.
    pub tab_active_fg: String,
    pub tab_active_bg: String,

    /// Cursor row.
    pub cursor_fg: String,
    pub cursor_bg: String,

    pub text_normal: String,
    /// Secondary text (footer, url, history).
    pub text_dim: String,

    /// Separators and modal frames.
    pub border: String,

    /// Search field and active filter chips.
    pub toolbar_accent: String,

    /// Bulk action bar shown while keywords are selected.
    pub bulk_bar_fg: String,
    pub bulk_bar_bg: String,

    /// Search match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Favorite star.
    pub favorite_fg: String,

    /// Position change arrows.
    pub rank_up_fg: String,
    pub rank_down_fg: String,

    /// Notice colors.
    pub success_fg: String,
    pub error_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serpdeck::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SerpdeckError::Theme`] if the file cannot be read or does not
    /// parse as a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SerpdeckError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| SerpdeckError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Rgb::parse(hex).escape(38)
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Rgb::parse(hex).escape(48)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\x1b[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\x1b[2m"
    }

    /// Clears colors and weight.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\x1b[0m"
    }

    /// Grey-scale palette used if the embedded default ever fails to parse.
    fn monochrome() -> Self {
        let light = || "#e0e0e0".to_string();
        let dark = || "#202020".to_string();
        let mid = || "#808080".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: light(),
                header_bg: None,
                tab_active_fg: dark(),
                tab_active_bg: light(),
                cursor_fg: dark(),
                cursor_bg: light(),
                text_normal: light(),
                text_dim: mid(),
                border: mid(),
                toolbar_accent: light(),
                bulk_bar_fg: dark(),
                bulk_bar_bg: mid(),
                match_highlight_fg: dark(),
                match_highlight_bg: light(),
                empty_state_fg: light(),
                favorite_fg: light(),
                rank_up_fg: light(),
                rank_down_fg: mid(),
                success_fg: light(),
                error_fg: light(),
            },
        }
    }
}

/// A color parsed from `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    const WHITE: Self = Self(255, 255, 255);

    /// Parses `#rrggbb` or `rrggbb`; anything else is white.
    fn parse(hex: &str) -> Self {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::WHITE;
        }
        u32::from_str_radix(digits, 16).map_or(Self::WHITE, |value| {
            let [_, r, g, b] = value.to_be_bytes();
            Self(r, g, b)
        })
    }

    /// `layer` is 38 for foreground, 48 for background.
    fn escape(self, layer: u8) -> String {
        let Self(r, g, b) = self;
        format!("\x1b[{layer};2;{r};{g};{b}m")
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(|| {
            tracing::warn!("built-in theme failed to parse, using monochrome");
            Self::monochrome()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
        assert!(Theme::from_name("catppuccin-latte").is_some());
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::fg("#ff0080"), "\x1b[38;2;255;0;128m");
        assert_eq!(Theme::bg("102030"), "\x1b[48;2;16;32;48m");
        assert_eq!(Rgb::parse("#abc"), Rgb::WHITE);
        assert_eq!(Rgb::parse("#zzzzzz"), Rgb::WHITE);
        assert_eq!(Rgb::parse("#+12345"), Rgb::WHITE);
    }

    #[test]
    fn missing_file_is_a_theme_error() {
        let err = Theme::from_file("/nonexistent/serpdeck-theme.toml").unwrap_err();
        assert!(matches!(err, SerpdeckError::Theme(_)));
    }
}
