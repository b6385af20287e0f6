//! External command templates.
//!
//! The keyword source and every mutation collaborator are configured as
//! command lines such as `serp-cli keywords --domain {domain}`. A template is
//! split into arguments once at load time; rendering substitutes the domain
//! and, for mutations, appends the JSON request as the final argument.

use crate::domain::error::{Result, SerpdeckError};
use crate::mutation::MutationKind;
use std::collections::BTreeMap;

/// Placeholder replaced by the configured domain.
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    argv: Vec<String>,
}

impl CommandTemplate {
    /// Splits a command line with POSIX shell quoting rules.
    ///
    /// # Errors
    ///
    /// Returns [`SerpdeckError::Config`] for an empty template or one that
    /// does not lex, such as an unclosed quote.
    ///
    /// # Examples
    ///
    /// ```
    /// use serpdeck::infrastructure::CommandTemplate;
    ///
    /// let template = CommandTemplate::parse(r#"serp "keyword list" {domain}"#).unwrap();
    /// assert_eq!(template.render("example.com", None), vec!["serp", "keyword list", "example.com"]);
    /// ```
    pub fn parse(template: &str) -> Result<Self> {
        let argv = shlex::split(template)
            .ok_or_else(|| SerpdeckError::Config(format!("cannot split command `{template}`")))?;
        if argv.is_empty() {
            return Err(SerpdeckError::Config("empty command".to_string()));
        }
        Ok(Self { argv })
    }

    /// Program name.
    #[must_use]
    pub fn program(&self) -> &str {
        self.argv.first().map_or("", String::as_str)
    }

    /// Arguments with `{domain}` substituted and the optional payload appended.
    #[must_use]
    pub fn render(&self, domain: &str, payload: Option<&str>) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| arg.replace(DOMAIN_PLACEHOLDER, domain))
            .chain(payload.map(ToString::to_string))
            .collect()
    }
}

/// The configured keyword source and mutation commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSet {
    pub source: Option<CommandTemplate>,
    pub mutations: BTreeMap<&'static str, CommandTemplate>,
}

impl CommandSet {
    /// Configuration key of each mutation command.
    #[must_use]
    pub const fn config_key(kind: MutationKind) -> &'static str {
        match kind {
            MutationKind::Refresh => "refresh_command",
            MutationKind::Delete => "delete_command",
            MutationKind::Favorite => "favorite_command",
            MutationKind::Tags => "tags_command",
            MutationKind::Add => "add_command",
        }
    }

    /// Reads `source_command` and the mutation commands from plugin
    /// configuration. Invalid templates are logged and left unset.
    #[must_use]
    pub fn from_config(config: &BTreeMap<String, String>) -> Self {
        let parse = |key: &str| -> Option<CommandTemplate> {
            let raw = config.get(key)?;
            match CommandTemplate::parse(raw) {
                Ok(template) => Some(template),
                Err(err) => {
                    tracing::warn!(key, error = %err, "ignoring invalid command template");
                    None
                }
            }
        };

        let kinds = [
            MutationKind::Refresh,
            MutationKind::Delete,
            MutationKind::Favorite,
            MutationKind::Tags,
            MutationKind::Add,
        ];
        let mutations = kinds
            .into_iter()
            .filter_map(|kind| parse(Self::config_key(kind)).map(|t| (kind.as_str(), t)))
            .collect();

        Self {
            source: parse("source_command"),
            mutations,
        }
    }

    /// The command handling `kind`, if configured.
    #[must_use]
    pub fn mutation(&self, kind: MutationKind) -> Option<&CommandTemplate> {
        self.mutations.get(kind.as_str())
    }
}
