use serde::{Deserialize, Serialize};

use super::message::Message;

/// Request body for `POST /query`.
///
/// `history` is the prior transcript in chronological order, without the
/// session's synthetic greeting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub question: String,
    pub history: Vec<Message>,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>, history: Vec<Message>) -> Self {
        Self {
            question: question.into(),
            history,
        }
    }
}

/// Request body for `POST /index`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexRequest {
    pub repo_url: String,
}

impl IndexRequest {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
        }
    }
}

/// Acknowledgement returned by `POST /index`.
///
/// Indexing runs in the background on the server; this only confirms it was
/// scheduled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexResponse {
    pub message: String,
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_serialization() {
        let request = QueryRequest::new(
            "What does X do?",
            vec![Message::user("hi"), Message::assistant("hello")],
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "question": "What does X do?",
                "history": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"}
                ]
            })
        );
    }

    #[test]
    fn test_index_request_serialization() {
        let json = serde_json::to_string(&IndexRequest {
            repo_url: "https://github.com/a/b".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"repo_url":"https://github.com/a/b"}"#);
    }

    #[test]
    fn test_index_response_deserialization() {
        let response: IndexResponse = serde_json::from_str(
            r#"{"message":"Repository indexing started in the background."}"#,
        )
        .unwrap();
        assert!(response.message.contains("indexing started"));
    }
}
