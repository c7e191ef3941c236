//! Decode/encode plumbing shared by every wire entity.
//!
//! Payloads stay plain `serde_json::Value` objects. Each entity declares an
//! explicit table of its wire keys; decode reads through that table's keys,
//! encode writes them, and the conformance tests iterate the table to cover
//! the mapping exhaustively.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::SchemaViolation;

/// Platform identifier type. Snowflakes exceed 53-bit float precision, so
/// they are carried as strings on both sides of the wire.
pub type Snowflake = String;

/// One field's wire mapping: struct field name, JSON key, and whether decode
/// fails when the key is absent.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub key: &'static str,
    pub required: bool,
}

impl Field {
    pub(crate) const fn required(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            required: true,
        }
    }

    pub(crate) const fn optional(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            key,
            required: false,
        }
    }
}

/// A JSON object shape that can cross the wire in both directions.
pub trait Wire: Sized {
    /// Entity name used in error reporting.
    const ENTITY: &'static str;

    /// Wire-key table, one entry per field in declaration order.
    const FIELDS: &'static [Field];

    /// Build a typed value from a decoded JSON payload.
    ///
    /// Unknown keys are ignored. Explicit `null` reads the same as an
    /// absent key. A required field that is absent, or any field of the
    /// wrong JSON type, fails with [`SchemaViolation`].
    fn decode(value: &Value) -> Result<Self, SchemaViolation>;

    /// Serialize back to the wire shape.
    ///
    /// Absent optional fields are omitted from the output object entirely,
    /// never written as `null`.
    fn encode(&self) -> Value;
}

/// JSON type name for error messages.
fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read-side view over one payload object.
pub(crate) struct Object<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Object<'a> {
    /// Wrap `value`, rejecting non-objects. Keys outside the entity's wire
    /// table are left alone for forward compatibility and reported at trace
    /// level.
    pub fn of<T: Wire>(value: &'a Value) -> Result<Self, SchemaViolation> {
        let map = value
            .as_object()
            .ok_or_else(|| SchemaViolation::NotAnObject {
                entity: T::ENTITY,
                found: json_type(value),
            })?;
        for key in map.keys() {
            if !T::FIELDS.iter().any(|f| f.key == key) {
                trace!(
                    entity = T::ENTITY,
                    key = key.as_str(),
                    "ignoring unknown wire key"
                );
            }
        }
        Ok(Self {
            entity: T::ENTITY,
            map,
        })
    }

    /// Explicit `null` reads the same as an absent key: the platform writes
    /// `null` for empty nullable fields, and the typed side keeps a single
    /// absent state.
    fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            Some(Value::Null) | None => None,
            present => present,
        }
    }

    fn missing(&self, field: &'static str) -> SchemaViolation {
        SchemaViolation::MissingField {
            entity: self.entity,
            field,
        }
    }

    fn mismatch(
        &self,
        field: &'static str,
        expected: &'static str,
        value: &Value,
    ) -> SchemaViolation {
        SchemaViolation::TypeMismatch {
            entity: self.entity,
            field,
            expected,
            found: json_type(value),
        }
    }

    fn malformed(&self, field: &'static str, message: String) -> SchemaViolation {
        SchemaViolation::Malformed {
            entity: self.entity,
            field,
            message,
        }
    }

    pub fn req_str(&self, key: &'static str) -> Result<String, SchemaViolation> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(self.mismatch(key, "string", other)),
            None => Err(self.missing(key)),
        }
    }

    pub fn opt_str(&self, key: &'static str) -> Result<Option<String>, SchemaViolation> {
        match self.get(key) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(key, "string", other)),
            None => Ok(None),
        }
    }

    /// Text field the platform may omit; absent decodes to the empty string.
    pub fn str_or_empty(&self, key: &'static str) -> Result<String, SchemaViolation> {
        Ok(self.opt_str(key)?.unwrap_or_default())
    }

    /// Boolean flag; absent decodes to `false`.
    pub fn flag(&self, key: &'static str) -> Result<bool, SchemaViolation> {
        match self.get(key) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.mismatch(key, "boolean", other)),
            None => Ok(false),
        }
    }

    pub fn opt_u32(&self, key: &'static str) -> Result<Option<u32>, SchemaViolation> {
        match self.opt_u64(key)? {
            Some(wide) => u32::try_from(wide)
                .map(Some)
                .map_err(|_| self.malformed(key, format!("{wide} does not fit in 32 bits"))),
            None => Ok(None),
        }
    }

    pub fn req_u32(&self, key: &'static str) -> Result<u32, SchemaViolation> {
        self.opt_u32(key)?.ok_or_else(|| self.missing(key))
    }

    pub fn opt_u64(&self, key: &'static str) -> Result<Option<u64>, SchemaViolation> {
        match self.get(key) {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(v) => Ok(Some(v)),
                None => Err(self.malformed(key, format!("expected an unsigned integer, got {n}"))),
            },
            Some(other) => Err(self.mismatch(key, "number", other)),
            None => Ok(None),
        }
    }

    pub fn opt_i64(&self, key: &'static str) -> Result<Option<i64>, SchemaViolation> {
        match self.get(key) {
            Some(Value::Number(n)) => match n.as_i64() {
                Some(v) => Ok(Some(v)),
                None => Err(self.malformed(key, format!("expected an integer, got {n}"))),
            },
            Some(other) => Err(self.mismatch(key, "number", other)),
            None => Ok(None),
        }
    }

    /// RFC 3339 timestamp, normalized to UTC.
    pub fn opt_timestamp(&self, key: &'static str) -> Result<Option<DateTime<Utc>>, SchemaViolation> {
        match self.get(key) {
            Some(Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
                Ok(ts) => Ok(Some(ts.with_timezone(&Utc))),
                Err(err) => Err(self.malformed(key, format!("bad timestamp {s:?}: {err}"))),
            },
            Some(other) => Err(self.mismatch(key, "string", other)),
            None => Ok(None),
        }
    }

    pub fn opt_entity<T: Wire>(&self, key: &'static str) -> Result<Option<T>, SchemaViolation> {
        match self.get(key) {
            Some(value) => T::decode(value).map(Some),
            None => Ok(None),
        }
    }

    pub fn req_entity<T: Wire>(&self, key: &'static str) -> Result<T, SchemaViolation> {
        match self.get(key) {
            Some(value) => T::decode(value),
            None => Err(self.missing(key)),
        }
    }

    /// List field; absent decodes to an empty `Vec`, matching the platform
    /// convention that array fields default to empty rather than null.
    pub fn list<T: Wire>(&self, key: &'static str) -> Result<Vec<T>, SchemaViolation> {
        match self.get(key) {
            Some(Value::Array(items)) => items.iter().map(T::decode).collect(),
            Some(other) => Err(self.mismatch(key, "array", other)),
            None => Ok(Vec::new()),
        }
    }
}

/// Write-side builder for one payload object.
pub(crate) struct ObjectBuilder {
    map: Map<String, Value>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self { map: Map::new() }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.map.insert(key.to_owned(), value.into());
        self
    }

    pub fn set_opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn set_timestamp(self, key: &str, value: Option<DateTime<Utc>>) -> Self {
        self.set_opt(key, value.map(|ts| ts.to_rfc3339()))
    }

    pub fn set_entity<T: Wire>(self, key: &str, value: Option<&T>) -> Self {
        self.set_opt(key, value.map(T::encode))
    }

    pub fn set_list<T: Wire>(self, key: &str, items: &[T]) -> Self {
        self.set(key, items.iter().map(T::encode).collect::<Vec<_>>())
    }

    pub fn build(self) -> Value {
        Value::Object(self.map)
    }
}
