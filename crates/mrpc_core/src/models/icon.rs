//! Icon records and the ordered icon list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind tag for static images, the only kind this interface uploads.
pub const STATIC_IMAGE_KIND: &str = "1";

/// One icon asset as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconRecord {
    /// Identifier assigned by the remote service
    #[serde(deserialize_with = "text_or_empty")]
    pub id: String,
    /// Display name
    #[serde(default, deserialize_with = "text_or_empty")]
    pub name: String,
    /// Classification tag (`type` on the wire)
    #[serde(
        rename = "type",
        default,
        deserialize_with = "kind_from_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    /// Any other fields of the remote object, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IconRecord {
    /// Create a record with no extra fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: Option<&str>) -> Self {
        Self { id: id.into(), name: name.into(), kind: kind.map(String::from), extra: Map::new() }
    }
}

/// Text form of a scalar field. `None` for null, JSON text for non-strings.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

// The service owns these objects; a record is never rejected for the shape of
// its scalar fields. The listing API sends `type` as a number, the upload
// service as a string.

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn kind_from_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Insertion-ordered icon list, unique by `id`.
///
/// `replace` and `append` are the only mutating operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconList {
    icons: Vec<IconRecord>,
}

impl IconList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list, keeping response order.
    ///
    /// Later records repeating an `id` are dropped. Returns the new length.
    pub fn replace(&mut self, records: Vec<IconRecord>) -> usize {
        let mut icons: Vec<IconRecord> = Vec::with_capacity(records.len());
        for record in records {
            if icons.iter().any(|icon| icon.id == record.id) {
                tracing::warn!(icon_id = %record.id, "Dropping duplicate icon from listing");
                continue;
            }
            icons.push(record);
        }
        self.icons = icons;
        self.icons.len()
    }

    /// Append a record as the last element.
    ///
    /// Returns false if a record with the same `id` is already listed.
    pub fn append(&mut self, record: IconRecord) -> bool {
        if self.contains(&record.id) {
            tracing::warn!(icon_id = %record.id, "Icon already listed, not appending");
            return false;
        }
        self.icons.push(record);
        true
    }

    /// Number of icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Check if an icon with `id` is listed.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Look up an icon by `id`.
    pub fn get(&self, id: &str) -> Option<&IconRecord> {
        self.icons.iter().find(|icon| icon.id == id)
    }

    /// Iterate in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, IconRecord> {
        self.icons.iter()
    }

    /// Snapshot for rendering.
    pub fn to_vec(&self) -> Vec<IconRecord> {
        self.icons.clone()
    }
}

impl<'a> IntoIterator for &'a IconList {
    type Item = &'a IconRecord;
    type IntoIter = std::slice::Iter<'a, IconRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(id: &str, name: &str) -> IconRecord {
        IconRecord::new(id, name, Some(STATIC_IMAGE_KIND))
    }

    #[test]
    fn test_record_wire_format() {
        let json = r#"{"id":"abc123","name":"Logo","type":"1"}"#;
        let record: IconRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, icon("abc123", "Logo"));
        assert_eq!(record.kind.as_deref(), Some(STATIC_IMAGE_KIND));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, serde_json::json!({"id": "abc123", "name": "Logo", "type": "1"}));
    }

    #[test]
    fn test_record_keeps_extra_fields() {
        let json = r#"{"id":"9","name":"big","type":"1","created":"2024-01-01"}"#;
        let record: IconRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra.get("created"), Some(&Value::from("2024-01-01")));
        assert_eq!(record.extra.len(), 1);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["created"], "2024-01-01");
    }

    #[test]
    fn test_record_numeric_kind() {
        let record: IconRecord =
            serde_json::from_str(r#"{"id":"5","name":"n","type":1}"#).unwrap();
        assert_eq!(record.kind.as_deref(), Some("1"));
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_record_optional_fields() {
        let record: IconRecord = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.kind, None);
        assert!(serde_json::from_str::<IconRecord>(r#"{"name":"x"}"#).is_err());
    }

    #[test]
    fn test_record_accepts_loose_scalars() {
        let record: IconRecord =
            serde_json::from_str(r#"{"id":5,"name":null,"type":true}"#).unwrap();
        assert_eq!(record.id, "5");
        assert_eq!(record.name, "");
        assert_eq!(record.kind.as_deref(), Some("true"));

        let record: IconRecord = serde_json::from_str(r#"{"id":null,"type":null}"#).unwrap();
        assert_eq!(record.id, "");
        assert_eq!(record.kind, None);
    }

    #[test]
    fn test_replace_keeps_order_and_is_idempotent() {
        let response = vec![icon("b", "second"), icon("a", "first"), icon("c", "third")];
        let mut list = IconList::new();

        assert_eq!(list.replace(response.clone()), 3);
        let ids: Vec<&str> = list.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);

        let before = list.clone();
        list.replace(response);
        assert_eq!(list, before);
    }

    #[test]
    fn test_replace_drops_duplicate_ids() {
        let mut list = IconList::new();
        list.replace(vec![icon("a", "one"), icon("a", "two"), icon("b", "three")]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("a").unwrap().name, "one");
    }

    #[test]
    fn test_append() {
        let mut list = IconList::new();
        list.replace(vec![icon("a", "one")]);

        assert!(list.append(icon("b", "two")));
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().last().unwrap().id, "b");

        assert!(!list.append(icon("a", "again")));
        assert_eq!(list.len(), 2);
    }
}
