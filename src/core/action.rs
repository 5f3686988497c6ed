//! Actions: tagged values describing a requested transition.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A tagged value whose kind selects which transition applies.
///
/// Kinds are caller-defined strings; the engine attaches no meaning to them
/// beyond lookup.
///
/// # Example
///
/// ```rust
/// use refold::core::Action;
///
/// #[derive(Clone, Debug)]
/// enum CounterAction {
///     Increment,
///     Add(i64),
/// }
///
/// impl Action for CounterAction {
///     fn kind(&self) -> &str {
///         match self {
///             Self::Increment => "increment",
///             Self::Add(_) => "add",
///         }
///     }
/// }
///
/// assert_eq!(CounterAction::Add(2).kind(), "add");
/// ```
pub trait Action: Clone + Debug + Send + Sync {
    /// The discriminant used to look up a transition.
    fn kind(&self) -> &str;
}

/// Dynamically tagged action with free-form payload fields.
///
/// Serializes as a flat JSON object with the kind under `"type"`:
/// `{"type": "add", "amount": 5}`.
///
/// # Example
///
/// ```rust
/// use refold::core::{Action, TaggedAction};
///
/// let action = TaggedAction::new("add").with("amount", 5);
/// assert_eq!(action.kind(), "add");
/// assert_eq!(action.field_as::<i64>("amount"), Some(5));
///
/// let parsed = TaggedAction::from_json(r#"{"type":"add","amount":5}"#).unwrap();
/// assert_eq!(parsed, action);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaggedAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

/// JSON key holding the kind; never a payload field.
pub const KIND_FIELD: &str = "type";

impl TaggedAction {
    /// Create an action with no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload field, returning the updated action.
    ///
    /// A field named `"type"` is ignored: that key carries the kind.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        if field != KIND_FIELD {
            self.payload.insert(field, value.into());
        }
        self
    }

    /// Raw payload field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// Payload field decoded into `T`. Missing or mistyped fields yield `None`.
    pub fn field_as<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.payload
            .get(name)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// All payload fields, excluding the kind.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Parse an action from its JSON object form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to the flat `{"type": ..}` object form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Action for TaggedAction {
    fn kind(&self) -> &str {
        &self.kind
    }
}
