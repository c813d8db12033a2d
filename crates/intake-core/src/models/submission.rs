use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{UNKNOWN_BROKER, UNKNOWN_EMPLOYER};

/// Keys owned by the fixed part of the record; form fields with these names
/// never reach `extra`.
const FIXED_KEYS: [&str; 5] = [
    "submissionId",
    "submissionDate",
    "tpaId",
    "brokerId",
    "employerId",
];

/// The tenant triple a submission is partitioned under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identifiers {
    pub tpa_id: String,
    pub broker_id: String,
    pub employer_id: String,
}

/// One form intake event. Built once per request and persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    pub submission_date: String,
    pub tpa_id: String,
    pub broker_id: String,
    pub employer_id: String,
    /// Every other scalar field from the form, flattened into the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Submission {
    /// Millisecond timestamp identifier. Two requests in the same millisecond
    /// get the same id.
    pub fn assign_id(now: DateTime<Utc>) -> String {
        format!("submission-{}", now.timestamp_millis())
    }

    /// Build the record from the parsed form fields.
    ///
    /// `brokerId` and `employerId` are taken from the fields when present and
    /// fall back to the `unknown-*` sentinels otherwise.
    pub fn new(now: DateTime<Utc>, tpa_id: impl Into<String>, fields: &Map<String, Value>) -> Self {
        let broker_id = identifier_field(fields, "brokerId").unwrap_or_else(|| UNKNOWN_BROKER.to_string());
        let employer_id =
            identifier_field(fields, "employerId").unwrap_or_else(|| UNKNOWN_EMPLOYER.to_string());

        let extra = fields
            .iter()
            .filter(|(key, _)| !FIXED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            submission_id: Self::assign_id(now),
            submission_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            tpa_id: tpa_id.into(),
            broker_id,
            employer_id,
            extra,
        }
    }

    pub fn identifiers(&self) -> Identifiers {
        Identifiers {
            tpa_id: self.tpa_id.clone(),
            broker_id: self.broker_id.clone(),
            employer_id: self.employer_id.clone(),
        }
    }

    /// All string-valued entries of the document, fixed keys first.
    pub fn string_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("submissionId".to_string(), self.submission_id.clone()),
            ("submissionDate".to_string(), self.submission_date.clone()),
            ("tpaId".to_string(), self.tpa_id.clone()),
            ("brokerId".to_string(), self.broker_id.clone()),
            ("employerId".to_string(), self.employer_id.clone()),
        ];
        fields.extend(
            self.extra
                .iter()
                .filter_map(|(key, value)| value.as_str().map(|v| (key.clone(), v.to_string()))),
        );
        fields
    }
}

/// Render a form value usable as a key segment. Empty strings, null and
/// structured values are ignored.
fn identifier_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
