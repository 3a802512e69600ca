//! Event record persisted for every accepted submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Usage counters reported by the model runtime for one generation.
///
/// Durations are nanoseconds. Non-zero counters are passed through untouched;
/// absent and zero counters are left out of the stored document, matching
/// what the model runtime itself emits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub total_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub load_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub prompt_eval_count: Option<i64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub prompt_eval_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub eval_count: Option<i64>,
    #[serde(default, skip_serializing_if = "is_unset")]
    pub eval_duration: Option<i64>,
}

/// Decoded request body, before the server stamps it.
///
/// `created_at` is deliberately absent: a client-sent value is ignored like
/// any other unknown field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UsagePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(flatten)]
    pub metrics: UsageMetrics,
}

fn is_unset(v: &Option<i64>) -> bool {
    matches!(v, None | Some(0))
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// One accepted usage submission, stamped with its receipt time.
///
/// Immutable once built; serializes to the on-disk JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    #[serde(rename = "created_at")]
    captured_at: DateTime<Utc>,
    #[serde(rename = "model")]
    model_identifier: String,
    #[serde(rename = "user_id", skip_serializing_if = "String::is_empty")]
    user_identifier: String,
    #[serde(rename = "user_name", skip_serializing_if = "String::is_empty")]
    user_display_name: String,
    #[serde(flatten)]
    usage_metrics: UsageMetrics,
}

impl EventRecord {
    /// Stamp a decoded payload with the server receipt time.
    pub fn stamp(payload: UsagePayload, captured_at: DateTime<Utc>) -> Self {
        Self {
            captured_at,
            model_identifier: payload.model,
            user_identifier: payload.user_id,
            user_display_name: payload.user_name,
            usage_metrics: payload.metrics,
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn model_identifier(&self) -> &str {
        &self.model_identifier
    }

    pub fn user_identifier(&self) -> Option<&str> {
        non_empty(&self.user_identifier)
    }

    pub fn user_display_name(&self) -> Option<&str> {
        non_empty(&self.user_display_name)
    }

    pub fn usage_metrics(&self) -> &UsageMetrics {
        &self.usage_metrics
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}
