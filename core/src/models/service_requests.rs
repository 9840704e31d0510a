//! Support service requests and the filter used to search them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collection::ResourceAttributes;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRequestStatus {
    #[default]
    None,
    Open,
    Closed,
    AttentionNeeded,
}

impl ServiceRequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceRequestStatus::None => "none",
            ServiceRequestStatus::Open => "open",
            ServiceRequestStatus::Closed => "closed",
            ServiceRequestStatus::AttentionNeeded => "attention_needed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRequestSeverity {
    #[default]
    Unknown,
    Critical,
    Moderate,
    Minimal,
}

/// A support ticket. Also used as the update body, so fields left at their
/// defaults are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_default")]
    pub severity: ServiceRequestSeverity,
    #[serde(default, skip_serializing_if = "is_default")]
    pub status: ServiceRequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_topic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_topic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_closed_date: Option<String>,
    /// Only set on updates; the service appends it to the request's notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_note: Option<ServiceRequestNote>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<ServiceRequestNote>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub attributes: ResourceAttributes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestNote {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    pub text: String,
}

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Fields a service request search can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceRequestSearchField {
    Status,
}

impl fmt::Display for ServiceRequestSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceRequestSearchField::Status => f.write_str("Status"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFilterOperation {
    #[default]
    Equals,
    Substring,
    StartsWith,
}

/// A single-field search, sent JSON-encoded in the `Filter` query key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRequestFilter {
    pub field: ServiceRequestSearchField,
    pub value: String,
    pub operator: FieldFilterOperation,
}

impl ServiceRequestFilter {
    pub fn equals(field: ServiceRequestSearchField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            operator: FieldFilterOperation::Equals,
        }
    }

    pub fn status(status: ServiceRequestStatus) -> Self {
        Self::equals(ServiceRequestSearchField::Status, status.as_str())
    }
}
