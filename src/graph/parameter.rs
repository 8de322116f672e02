use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter values of a node, keyed by parameter name.
///
/// Ordered by key so that resolved pipelines serialize identically for the same graph.
pub type Parameters = BTreeMap<String, ParameterValue>;

/// The current value of one node parameter.
///
/// JSON arrays deserialize as `List`, everything else as `Scalar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    List(Vec<serde_json::Value>),
    Scalar(serde_json::Value),
}

impl ParameterValue {
    pub fn is_list(&self) -> bool {
        matches!(self, ParameterValue::List(_))
    }

    pub fn as_list(&self) -> Option<&[serde_json::Value]> {
        match self {
            ParameterValue::List(items) => Some(items),
            ParameterValue::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&serde_json::Value> {
        match self {
            ParameterValue::Scalar(value) => Some(value),
            ParameterValue::List(_) => None,
        }
    }
}

impl From<serde_json::Value> for ParameterValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => ParameterValue::List(items),
            other => ParameterValue::Scalar(other),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Scalar(serde_json::Value::String(value.to_string()))
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Scalar(serde_json::json!(value))
    }
}

impl<T: Into<serde_json::Value>> From<Vec<T>> for ParameterValue {
    fn from(items: Vec<T>) -> Self {
        ParameterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::List(items) => write!(f, "{}", serde_json::Value::Array(items.clone())),
            ParameterValue::Scalar(value) => write!(f, "{}", value),
        }
    }
}
