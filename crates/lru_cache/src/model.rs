use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub version: u32,
    pub capacity: usize,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Insert(InsertStep),
    Get(KeyedCheck),
    Peek(KeyedCheck),
    Remove(KeyedCheck),
    PeekMostRecent(KeyCheck),
    PeekLeastRecent(KeyCheck),
    Len(LenCheck),
}

impl Step {
    pub fn op_name(&self) -> &'static str {
        match self {
            Step::Insert(_) => "insert",
            Step::Get(_) => "get",
            Step::Peek(_) => "peek",
            Step::Remove(_) => "remove",
            Step::PeekMostRecent(_) => "peek_most_recent",
            Step::PeekLeastRecent(_) => "peek_least_recent",
            Step::Len(_) => "len",
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Step::Insert(insert) => Some(insert.key.as_str()),
            Step::Get(check) | Step::Peek(check) | Step::Remove(check) => Some(check.key.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct InsertStep {
    pub key: String,
    pub value: JsonValue,
}

/// Lookup of one key. `expect: null` checks for a stored null, which is not
/// the same as leaving `expect` out.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyedCheck {
    pub key: String,
    #[serde(default, deserialize_with = "present")]
    pub expect: Option<JsonValue>,
    pub found: Option<bool>,
}

/// Query of the key at one end of the recency order.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct KeyCheck {
    pub expect: Option<String>,
    pub found: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LenCheck {
    pub expect: Option<usize>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}
