use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The announcement. Serialized as `{"title": .., "mensagem": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub title: String,
    #[serde(rename = "mensagem")]
    pub body: String,
}

/// Write input; missing fields are reported as a validation error.
/// Numbers and booleans are stored as their string form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageInput {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub title: Option<String>,
    #[serde(default, rename = "mensagem", deserialize_with = "scalar_as_string")]
    pub body: Option<String>,
}

fn scalar_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(de::Error::custom("expected a string, number or boolean")),
    }
}

impl MessageInput {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: Some(title.into()), body: Some(body.into()) }
    }

    /// Both fields present and non-empty. Whitespace counts as content.
    pub fn into_message(self) -> Option<Message> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let body = self.body.filter(|b| !b.is_empty())?;
        Some(Message { title, body })
    }
}
