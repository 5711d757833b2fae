//! Task-log values as they sit in the report columns.
//!
//! Older rows stored a JSON object (clip counts, project name, duration) in
//! the same columns that now carry free text. A value is classified once,
//! when it crosses into the process, and the raw text is always kept so a
//! legacy object is shown exactly as it was stored.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const LEGACY_KEYS: [&str; 4] = ["clips", "clip", "project", "duration"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskLog {
    Plain(String),
    Legacy(String),
}

impl TaskLog {
    /// Never fails: anything that is not a recognised legacy object is plain text.
    pub fn classify(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if is_legacy_object(&raw) {
            Self::Legacy(raw)
        } else {
            Self::Plain(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Legacy(text) => text,
        }
    }

    pub fn format(&self) -> LogFormat {
        match self {
            Self::Plain(_) => LogFormat::Plain,
            Self::Legacy(_) => LogFormat::Legacy,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Text to show for a stored column; null shows as empty.
pub fn display_text(raw: Option<&str>) -> String {
    raw.map(|value| TaskLog::classify(value).as_str().to_string())
        .unwrap_or_default()
}

fn is_legacy_object(raw: &str) -> bool {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
        return false;
    };
    LEGACY_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .any(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Serialize for TaskLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(TaskLog::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_stays_plain() {
        let log = TaskLog::classify("Edited intro");
        assert_eq!(log.format(), LogFormat::Plain);
        assert_eq!(log.as_str(), "Edited intro");
    }

    #[test]
    fn legacy_object_passes_through_unmodified() {
        let raw = r#"{ "clips": 4, "project": "Promo",  "duration": "2h" }"#;
        let log = TaskLog::classify(raw);
        assert!(log.is_legacy());
        assert_eq!(log.as_str(), raw);
    }

    #[test]
    fn json_without_legacy_keys_is_plain() {
        assert_eq!(TaskLog::classify(r#"{"note":"x"}"#).format(), LogFormat::Plain);
        assert_eq!(TaskLog::classify(r#"{"clips":0,"project":""}"#).format(), LogFormat::Plain);
        assert_eq!(TaskLog::classify("[1,2,3]").format(), LogFormat::Plain);
        assert_eq!(TaskLog::classify("42").format(), LogFormat::Plain);
    }

    #[test]
    fn malformed_json_is_plain_text() {
        for raw in ["{\"clips\": ", "{", "", "not json at all", "{\"project\":}"] {
            let log = TaskLog::classify(raw);
            assert_eq!(log, TaskLog::Plain(raw.to_string()));
        }
    }

    #[test]
    fn reconciliation_is_idempotent() {
        for raw in [
            "Shot b-roll",
            r#"{"project":"Launch","duration":3}"#,
            "{broken",
            "",
        ] {
            let once = display_text(Some(raw));
            let twice = display_text(Some(&once));
            assert_eq!(once, twice);
            assert_eq!(
                TaskLog::classify(once.as_str()).format(),
                TaskLog::classify(raw).format()
            );
        }
    }

    #[test]
    fn null_column_displays_empty() {
        assert_eq!(display_text(None), "");
    }

    #[test]
    fn serializes_as_the_raw_string() {
        let log = TaskLog::classify(r#"{"clip":"a"}"#);
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#""{\"clip\":\"a\"}""#);

        let back: TaskLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
