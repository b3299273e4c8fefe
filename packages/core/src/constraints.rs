use std::collections::BTreeMap;
use std::fmt;

use formdeco_dom::NodeRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validity flags supplied by the host, keyed by constraint name.
/// `true` means the constraint is currently violated.
pub type ConstraintSet = BTreeMap<String, bool>;

/// Numeric bounds parsed from markup, keyed by constraint name.
pub type ConstraintParameters = BTreeMap<String, ParameterValue>;

/// A numeric constraint bound. Length bounds are integral, value bounds are
/// floating-point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Int(value) => write!(f, "{}", value),
            ParameterValue::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Collects constraint parameters from an input element's static attributes.
///
/// Called once at attach time; the result is immutable for the lifetime of
/// the attachment. Absent or unparsable attributes are omitted.
pub fn collect_constraint_parameters(node: &NodeRef) -> ConstraintParameters {
    let mut parameters = ConstraintParameters::new();

    for name in ["minlength", "maxlength"] {
        if let Some(raw) = node.attr(name) {
            match raw.trim().parse::<i64>() {
                Ok(value) => {
                    parameters.insert(name.to_string(), ParameterValue::Int(value));
                }
                Err(_) => debug!(attribute = name, value = %raw, "ignoring unparsable length bound"),
            }
        }
    }

    for name in ["min", "max"] {
        if let Some(raw) = node.attr(name) {
            match raw.trim().parse::<f64>() {
                Ok(value) => {
                    parameters.insert(name.to_string(), ParameterValue::Float(value));
                }
                Err(_) => debug!(attribute = name, value = %raw, "ignoring unparsable value bound"),
            }
        }
    }

    parameters
}
