use serde::{Deserialize, Serialize};
use serde_json::Value;

// Payloads the client passes through without interpreting
pub type ItemData = Value;
pub type RecipesData = Value;
pub type UsesData = Value;
pub type LineageData = Value;
pub type CustomLineageData = Value;

/// Error body returned alongside every non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// 404 "Unknown element"
pub type UnknownElement = ErrorBody;
/// 400 "Invalid element ID"
pub type InvalidElementId = ErrorBody;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OptimizeLineageResponse {
    pub id: String,
    pub before: u32,
    pub after: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShareLineageResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StepElement {
    pub id: String,
    pub emoji: String,
}

impl StepElement {
    pub fn new(id: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            emoji: emoji.into(),
        }
    }
}

/// One combination: two inputs and the element they produce.
/// Serialized as a three element JSON array.
pub type LineageStep = (StepElement, StepElement, StepElement);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLineagePayload<'a> {
    pub id: &'a str,
    pub emoji: &'a str,
    pub steps: &'a [LineageStep],
}

impl<'a> ShareLineagePayload<'a> {
    /// The final step's result names the shared lineage. `None` for no steps.
    pub fn from_steps(steps: &'a [LineageStep]) -> Option<Self> {
        let (_, _, result) = steps.last()?;
        Some(Self {
            id: &result.id,
            emoji: &result.emoji,
            steps,
        })
    }
}
