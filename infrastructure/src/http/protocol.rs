//! Wire types for the chat backend's JSON API
//!
//! | Operation | Request | Response body |
//! |---|---|---|
//! | list threads | `GET /threadid` | `{"thread_ids": [..]}` |
//! | list models | `GET /model_list` | `{"model_list": [..]}` |
//! | list servers | `GET /server_names` | `{"mcpserver_names": [..]}` |
//! | fetch messages | `GET /messages/{id}` | `{"Human": [..], "AI": [..], "Tool": [..]}` |
//! | send prompt | `POST /generate` | ignored |
//! | register server | `POST /add_mcp` | ignored |

use mcp_chat_domain::RoleTranscripts;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ThreadIdsResponse {
    pub thread_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModelListResponse {
    pub model_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServerNamesResponse {
    pub mcpserver_names: Vec<String>,
}

/// Per-role transcripts of one thread. A missing or null role is an empty list.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(rename = "Human", default)]
    pub human: Option<Vec<String>>,
    #[serde(rename = "AI", default)]
    pub ai: Option<Vec<String>>,
    #[serde(rename = "Tool", default)]
    pub tool: Option<Vec<String>>,
}

impl From<MessagesResponse> for RoleTranscripts {
    fn from(response: MessagesResponse) -> Self {
        RoleTranscripts::new(
            response.human.unwrap_or_default(),
            response.ai.unwrap_or_default(),
            response.tool.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub user_prompt: &'a str,
    pub model_name: &'a str,
    /// The thread the prompt belongs to
    pub chat_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AddServerRequest<'a> {
    pub server_name: &'a str,
    pub url: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_missing_roles_default_to_empty() {
        let response: MessagesResponse = serde_json::from_str(r#"{"AI": ["hello"]}"#).unwrap();
        let transcripts = RoleTranscripts::from(response);
        assert!(transcripts.human.is_empty());
        assert_eq!(transcripts.ai, vec!["hello".to_string()]);
        assert!(transcripts.tool.is_empty());
    }

    #[test]
    fn test_messages_all_roles() {
        let json = r#"{"AI": ["a0"], "Human": ["h0", "h1"], "Tool": ["t0"]}"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        let transcripts = RoleTranscripts::from(response);
        assert_eq!(transcripts.human, vec!["h0", "h1"]);
        assert_eq!(transcripts.tool, vec!["t0"]);
    }

    #[test]
    fn test_messages_null_roles_are_empty() {
        let json = r#"{"Human": ["h0"], "AI": null, "Tool": null}"#;
        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        let transcripts = RoleTranscripts::from(response);
        assert_eq!(transcripts.human, vec!["h0"]);
        assert!(transcripts.ai.is_empty());
        assert!(transcripts.tool.is_empty());
    }

    #[test]
    fn test_listing_requires_its_field() {
        assert!(serde_json::from_str::<ThreadIdsResponse>(r#"{"ids": []}"#).is_err());
        let models: ModelListResponse =
            serde_json::from_str(r#"{"model_list": ["qwen3:1.7b"]}"#).unwrap();
        assert_eq!(models.model_list, vec!["qwen3:1.7b"]);
    }

    #[test]
    fn test_generate_request_field_names() {
        let request = GenerateRequest {
            user_prompt: "hi",
            model_name: "llama3",
            chat_name: "thread-1",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "user_prompt": "hi",
                "model_name": "llama3",
                "chat_name": "thread-1"
            })
        );
    }

    #[test]
    fn test_add_server_request_field_names() {
        let request = AddServerRequest {
            server_name: "weather",
            url: "http://localhost:8000/mcp",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["server_name"], "weather");
        assert_eq!(value["url"], "http://localhost:8000/mcp");
    }
}
