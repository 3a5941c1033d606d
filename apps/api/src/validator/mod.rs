// Product validator HTTP surface: deep search, outreach, contacts, inbound content,
// plus the chat / analysis / research entry points into conversation and research.

pub mod handlers;
pub mod mock;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contact details the model found for one person, passed through as the model wrote them.
/// Usually `email`, `linkedin`, `twitter`, `company`, `website` and `other`, but any JSON
/// object is accepted. Anything that is not an object fails to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactInfo(pub Map<String, Value>);

impl ContactInfo {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// Clients send the `*JSON` fields either as JSON text or as inline JSON.
/// Either way the prompt gets text. `null` and blank strings count as absent.
pub fn json_field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
