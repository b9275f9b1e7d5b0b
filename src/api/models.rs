use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw row as the server sent it. Field names vary between deployments,
/// so rows stay untyped until [`crate::attendance::normalize`] reads them.
pub type RawRow = Map<String, Value>;

/// Reduces any response body to its list of row objects.
///
/// Accepts a bare array or an object wrapping the array under `data`.
/// Anything else, and any non-object element, contributes no rows.
pub fn parse_rows(body: Value) -> Vec<RawRow> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => match wrapper.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect()
}

/// Reads a scalar field as text. The PHP backend is loose about whether ids
/// come back as strings or numbers.
pub fn text_field(row: &RawRow, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First present field among `keys`, in order.
pub fn first_text_field(row: &RawRow, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_field(row, key))
}

/// A person row from the listing / credential lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub record: String,
    pub id: String,
    pub lastnames: String,
    pub names: String,
    pub mail: String,
    pub phone: String,
    pub user: String,
}

impl Person {
    pub fn from_row(row: &RawRow) -> Self {
        let field = |key: &str| text_field(row, key).unwrap_or_default();
        Self {
            record: field("record"),
            id: field("id"),
            lastnames: field("lastnames"),
            names: field("names"),
            mail: field("mail"),
            phone: field("phone"),
            user: field("user"),
        }
    }

    /// Fallback login rule: trimmed, case-insensitive username and the
    /// national id used as password.
    pub fn matches_credentials(&self, username: &str, password: &str) -> bool {
        self.user.trim().to_lowercase() == username.trim().to_lowercase()
            && self.id == password.trim()
    }
}

/// POST body that records one attendance mark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceSubmission {
    pub record_user: i64,
    pub join_user: String,
}
