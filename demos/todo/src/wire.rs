//! JSON envelope for todo actions.
//!
//! Actions travel as `{ "type": <kind>, "payload": { ... } }`. An unknown
//! `type` is not an error: it decodes to [`TodoAction::Unrecognized`] so the
//! reducer can ignore it. Only a broken envelope, or a known `type` with a
//! payload of the wrong shape, fails to decode.

use crate::types::{TodoAction, TodoId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors produced when decoding an action envelope
#[derive(Debug, thiserror::Error)]
pub enum ActionDecodeError {
    /// Input is not an object with a string `type`
    #[error("malformed action envelope: {0}")]
    Malformed(String),

    /// A known `type` whose payload does not have the expected shape
    #[error("invalid payload for `{kind}`: {source}")]
    InvalidPayload {
        /// The action kind
        kind: String,
        /// What went wrong
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize)]
struct NamePayload {
    name: String,
}

#[derive(Serialize, Deserialize)]
struct IdPayload {
    id: TodoId,
}

impl TodoAction {
    /// Decodes an action from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`ActionDecodeError::Malformed`] if `input` is not JSON or
    /// not an envelope, and [`ActionDecodeError::InvalidPayload`] if a known
    /// kind carries the wrong payload.
    pub fn from_json(input: &str) -> Result<Self, ActionDecodeError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|error| ActionDecodeError::Malformed(error.to_string()))?;
        Self::from_value(value)
    }

    /// Decodes an action from an already parsed JSON value
    ///
    /// # Errors
    ///
    /// See [`TodoAction::from_json`].
    pub fn from_value(value: Value) -> Result<Self, ActionDecodeError> {
        let Value::Object(mut envelope) = value else {
            return Err(ActionDecodeError::Malformed(
                "expected a JSON object".to_string(),
            ));
        };

        let kind = match envelope.remove("type") {
            Some(Value::String(kind)) => kind,
            Some(_) => {
                return Err(ActionDecodeError::Malformed(
                    "`type` must be a string".to_string(),
                ));
            },
            None => {
                return Err(ActionDecodeError::Malformed(
                    "missing `type` field".to_string(),
                ));
            },
        };
        let payload = envelope.remove("payload").unwrap_or(Value::Null);

        let invalid = |source| ActionDecodeError::InvalidPayload {
            kind: kind.clone(),
            source,
        };

        let action = match kind.as_str() {
            "add-todo" => {
                let NamePayload { name } = serde_json::from_value(payload).map_err(invalid)?;
                Self::AddTodo { name }
            },
            "toggle-todo" => {
                let IdPayload { id } = serde_json::from_value(payload).map_err(invalid)?;
                Self::ToggleTodo { id }
            },
            "delete-todo" => {
                let IdPayload { id } = serde_json::from_value(payload).map_err(invalid)?;
                Self::DeleteTodo { id }
            },
            _ => Self::Unrecognized { kind },
        };

        Ok(action)
    }

    /// Encodes this action as an envelope
    ///
    /// An unrecognized action keeps its kind and has no payload.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let payload = match self {
            Self::AddTodo { name } => Some(serde_json::json!({ "name": name })),
            Self::ToggleTodo { id } | Self::DeleteTodo { id } => {
                Some(serde_json::json!({ "id": id }))
            },
            Self::Unrecognized { .. } => None,
        };

        let mut envelope = Map::new();
        envelope.insert("type".to_string(), Value::String(self.kind().to_string()));
        if let Some(payload) = payload {
            envelope.insert("payload".to_string(), payload);
        }
        Value::Object(envelope)
    }
}
