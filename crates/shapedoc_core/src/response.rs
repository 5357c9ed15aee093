//! Response-related structure definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::schema::{RefOr, Reference, SchemaRef};

/// Media type definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaType {
    /// Schema reference or inline schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
    /// Example
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    /// Examples
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<BTreeMap<String, Example>>,
}

/// Example definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// Example summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Example description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Response definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Response description
    pub description: String,
    /// Header definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, RefOr<Header>>>,
    /// Schema per Content-Type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
    /// Specification extensions, flattened into the object.
    ///
    /// Deserializing collects every unknown key here, not just `x-` prefixed
    /// ones. Keys that name a field of this object must not be inserted.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

/// Header definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Header description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the header must be present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Deprecation flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    /// Schema reference or inline schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    /// Specification extensions, flattened into the object.
    ///
    /// Deserializing collects every unknown key here, not just `x-` prefixed
    /// ones. Keys that name a field of this object must not be inserted.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

/// One value of a generated response map.
///
/// Status-code and `default` keys hold a response or a reference to one;
/// specification-extension keys hold whatever literal value they were given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseItem {
    /// Pointer to a registered response
    Ref(Reference),
    /// Inline response
    Inline(Response),
    /// Verbatim specification-extension value
    Extension(serde_json::Value),
}

impl From<RefOr<Response>> for ResponseItem {
    fn from(value: RefOr<Response>) -> Self {
        match value {
            RefOr::Ref(reference) => Self::Ref(reference),
            RefOr::Inline(response) => Self::Inline(response),
        }
    }
}

/// Generated responses object, in declaration order
pub type Responses = IndexMap<String, ResponseItem>;
