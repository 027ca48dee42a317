use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body the employees service sends with a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// `detail` is a plain message for handler errors and a list of items for
/// request-body validation failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ValidationItem>),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationItem {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(ErrorDetail::Message(detail.into())),
        }
    }

    /// Parses a response body, returning `None` for anything that is not a
    /// JSON object.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    pub fn message(&self) -> Option<String> {
        self.detail.as_ref().and_then(ErrorDetail::to_message)
    }
}

impl ErrorDetail {
    pub fn to_message(&self) -> Option<String> {
        match self {
            ErrorDetail::Message(message) => {
                let message = message.trim();
                (!message.is_empty()).then(|| message.to_string())
            }
            ErrorDetail::Items(items) => {
                let parts: Vec<String> = items.iter().map(ValidationItem::describe).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            ErrorDetail::Other(_) => None,
        }
    }
}

impl ValidationItem {
    fn describe(&self) -> String {
        let field = self.loc.last().and_then(|segment| match segment {
            Value::String(name) => Some(name.clone()),
            Value::Number(index) => Some(index.to_string()),
            _ => None,
        });
        match field {
            Some(field) => format!("{field}: {}", self.msg),
            None => self.msg.clone(),
        }
    }
}
