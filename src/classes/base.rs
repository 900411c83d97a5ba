use serde::Serialize;

/// Base trait for objects that end up in JSON artifacts
pub trait JsonObject {
    /// Convert to JSON string
    fn to_json_string(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string(self)
    }

    /// Convert to pretty-printed JSON string
    fn to_json_string_pretty(&self) -> Result<String, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }

    /// Convert to JSON value
    fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error>
    where
        Self: Serialize,
    {
        serde_json::to_value(self)
    }
}

/// Serializer helper that skips absent or empty optional strings
#[inline]
pub fn skip_if_empty_optional_string(value: &Option<String>) -> bool {
    match value {
        Some(s) => s.is_empty(),
        None => true,
    }
}
