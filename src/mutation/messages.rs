//! Mutation requests handed to the external keyword commands.
//!
//! Requests are serialized to JSON and passed as the last argument of the
//! configured mutation command. Each request carries the trace context that was
//! active when it was dispatched, so the external side can correlate its own
//! work with the plugin's spans.

use crate::domain::error::{Result, SerpdeckError};
use crate::domain::{Device, KeywordId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distributed tracing context captured at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the dispatching span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is not valid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! mutation_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl MutationRequest {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " request with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

mutation_builders! {
    refresh(Refresh { ids: Vec<KeywordId> }),
    delete(Delete { ids: Vec<KeywordId> }),
    favorite(Favorite { id: KeywordId, sticky: bool }),
    update_tags(UpdateTags { id: KeywordId, tags: Vec<String> }),
    add(Add { keywords: Vec<String>, device: Device, country: String }),
}

/// A keyword mutation to be executed by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationRequest {
    /// Re-scrape the rank of every listed keyword (one batch).
    Refresh {
        ids: Vec<KeywordId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Stop tracking every listed keyword (one batch).
    Delete {
        ids: Vec<KeywordId>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Set the favorite flag of a single keyword.
    Favorite {
        id: KeywordId,
        sticky: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Replace the tags of a single keyword.
    UpdateTags {
        id: KeywordId,
        tags: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Start tracking new keywords, all for one device and country (one batch).
    Add {
        keywords: Vec<String>,
        device: Device,
        country: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl MutationRequest {
    /// Which collaborator handles this request.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        match self {
            Self::Refresh { .. } => MutationKind::Refresh,
            Self::Delete { .. } => MutationKind::Delete,
            Self::Favorite { .. } => MutationKind::Favorite,
            Self::UpdateTags { .. } => MutationKind::Tags,
            Self::Add { .. } => MutationKind::Add,
        }
    }

    /// Keyword identifiers the request touches. Empty for additions, which
    /// have no identifiers yet.
    #[must_use]
    pub fn ids(&self) -> Vec<KeywordId> {
        match self {
            Self::Refresh { ids, .. } | Self::Delete { ids, .. } => ids.clone(),
            Self::Favorite { id, .. } | Self::UpdateTags { id, .. } => vec![*id],
            Self::Add { .. } => vec![],
        }
    }

    /// JSON form passed to the external command.
    ///
    /// # Errors
    ///
    /// Returns [`SerpdeckError::Json`] if serialization fails.
    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The mutation collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Refresh,
    Delete,
    Favorite,
    Tags,
    Add,
}

impl MutationKind {
    /// Name used in command contexts and configuration keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::Delete => "delete",
            Self::Favorite => "favorite",
            Self::Tags => "tags",
            Self::Add => "add",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MutationKind {
    type Err = SerpdeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "refresh" => Ok(Self::Refresh),
            "delete" => Ok(Self::Delete),
            "favorite" => Ok(Self::Favorite),
            "tags" => Ok(Self::Tags),
            "add" => Ok(Self::Add),
            other => Err(SerpdeckError::Mutation(format!("unknown mutation kind `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_tagged_and_omits_missing_trace() {
        let request = MutationRequest::delete(vec![1, 2]);
        let payload = request.to_payload().unwrap();
        assert_eq!(payload, r#"{"type":"delete","ids":[1,2]}"#);
        assert_eq!(serde_json::from_str::<MutationRequest>(&payload).unwrap(), request);
    }

    #[test]
    fn kind_and_ids_follow_variant() {
        let favorite = MutationRequest::favorite(9, true);
        assert_eq!(favorite.kind(), MutationKind::Favorite);
        assert_eq!(favorite.ids(), vec![9]);
        assert_eq!(MutationRequest::refresh(vec![3, 4]).ids(), vec![3, 4]);
        assert_eq!("tags".parse::<MutationKind>().unwrap(), MutationKind::Tags);
        assert!("rename".parse::<MutationKind>().is_err());
    }

    #[test]
    fn add_payload_carries_the_whole_batch() {
        let request = MutationRequest::add(
            vec!["rust book".to_string(), "cargo".to_string()],
            Device::Mobile,
            "DE".to_string(),
        );
        assert_eq!(request.kind(), MutationKind::Add);
        assert!(request.ids().is_empty());
        assert_eq!(
            request.to_payload().unwrap(),
            r#"{"type":"add","keywords":["rust book","cargo"],"device":"mobile","country":"DE"}"#
        );
    }
}
