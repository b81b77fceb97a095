use crate::db::search::schema::EntitySchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A stored entity instance as a JSON object keyed by API field names.
///
/// Child collections, when loaded, live under their relation name
/// (`tags`, `revisions`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, JsonValue>);

impl Record {
    /// Wrap a JSON value; `None` unless it is an object.
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    /// Identity used for deduplication: the id field rendered as a string.
    pub fn key(&self, schema: &EntitySchema) -> Option<String> {
        object_key(&self.0, schema)
    }

    /// Copy of the record restricted to the schema's scalar fields.
    pub fn project(&self, schema: &EntitySchema) -> Record {
        let mut out = Map::new();
        for field in schema.fields {
            if let Some(v) = self.0.get(field.name) {
                out.insert(field.name.to_string(), v.clone());
            }
        }
        Record(out)
    }
}

pub(crate) fn object_key(obj: &Map<String, JsonValue>, schema: &EntitySchema) -> Option<String> {
    match obj.get(schema.id.name)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl From<Map<String, JsonValue>> for Record {
    fn from(fields: Map<String, JsonValue>) -> Self {
        Self(fields)
    }
}
