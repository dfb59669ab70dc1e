use std::fmt;

use serde::{Deserialize, Serialize};

/// A single sign-up: who wants in and where to reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub name: String,
    pub email: String,
}

impl WaitlistEntry {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Identifier of the record created in the external workspace.
///
/// Opaque: never parsed or rewritten, only stored and echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalRecordId(String);

impl ExternalRecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ExternalRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExternalRecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ExternalRecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_is_a_bare_json_string() {
        let id = ExternalRecordId::new("59833787-2cf9-4fdf-8782-e53db20768a5");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""59833787-2cf9-4fdf-8782-e53db20768a5""#);
    }

    #[test]
    fn test_entry_body_shape() {
        let entry = WaitlistEntry::new("Ada", "ada@example.com");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "name": "Ada", "email": "ada@example.com" })
        );
    }
}
