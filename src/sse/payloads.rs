//! Wire payload deserialization structs
//!
//! Every frame carries `{"type": <tag>, "data": <object>}`; these structs
//! describe the envelope and each recognized tag's `data` shape.

use serde::Deserialize;

/// Outer envelope shared by every frame
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: serde_json::Value,
}

/// status_update payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StatusUpdatePayload {
    pub node: String,
}

/// final_answer payload
///
/// The backend dumps its whole final agent state here (question, context,
/// evaluation, iteration...). Only the answer matters to the client.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FinalAnswerPayload {
    pub answer: String,
}

/// error payload
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_requires_both_fields() {
        assert!(serde_json::from_str::<EventEnvelope>(r#"{"type":"x"}"#).is_err());
        assert!(serde_json::from_str::<EventEnvelope>(r#"{"data":{}}"#).is_err());
        let env: EventEnvelope = serde_json::from_str(r#"{"type":"x","data":{}}"#).unwrap();
        assert_eq!(env.event_type, "x");
    }

    #[test]
    fn test_final_answer_ignores_extra_state() {
        let payload: FinalAnswerPayload = serde_json::from_str(
            r#"{"question":"q","answer":"a","context":[],"evaluation":{"is_supported":true},"iteration":1}"#,
        )
        .unwrap();
        assert_eq!(payload.answer, "a");
    }
}
