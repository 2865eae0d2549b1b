/// Current UTC timestamp (seconds)
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Serde helpers for backend-assigned identifiers
///
/// The hosted backend may hand out UUIDs or bigint keys depending on how the
/// table was created. Both are carried as opaque strings.
pub mod opaque_id {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(id: &str, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Int(i) => i.to_string(),
        })
    }
}

/// Serde helper for form fields that may arrive as a JSON string or number
///
/// The number is kept as its JSON text so the form's own parsing decides
/// what is valid.
pub mod text_or_number {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawField {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match RawField::deserialize(deserializer)? {
            RawField::Text(s) => s,
            RawField::Number(n) => n.to_string(),
        })
    }
}
