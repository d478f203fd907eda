use serde_json::Value;

/// Error payload convention of the backend.
///
/// Business errors carry `message` (older endpoints use `error`). Credit exhaustion adds
/// `credits`, optionally `required`, and `needsUpgrade`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
    pub credits: Option<i64>,
    pub required: Option<i64>,
    pub needs_upgrade: Option<bool>,
}

impl ApiErrorBody {
    /// Parse an error body, tolerating empty or non-JSON payloads.
    /// Fields are read one by one so a single odd field does not hide the others.
    pub fn parse(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => return Self::default(),
        };
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let count = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        };

        Self {
            message: text("message"),
            error: text("error"),
            credits: count("credits"),
            required: count("required"),
            needs_upgrade: value.get("needsUpgrade").and_then(Value::as_bool),
        }
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn needs_upgrade(&self) -> bool {
        self.needs_upgrade.unwrap_or(false)
    }
}
