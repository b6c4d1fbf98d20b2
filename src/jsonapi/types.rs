use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Inbound JSON:API request document. `data` must be a single resource
/// object; an array of resources fails deserialization and therefore
/// validation.
#[derive(Debug, Deserialize)]
pub struct Document {
    pub data: Resource,
}

#[derive(Debug, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

#[derive(Debug, Deserialize)]
pub struct Relationship {
    pub data: Option<RelationshipData>,
}

#[derive(Debug, Deserialize)]
pub struct RelationshipData {
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub id: Option<Value>,
}
