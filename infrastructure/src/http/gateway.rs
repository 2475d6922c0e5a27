//! reqwest-backed [`ChatBackend`]

use super::protocol::{
    AddServerRequest, GenerateRequest, MessagesResponse, ModelListResponse, ServerNamesResponse,
    ThreadIdsResponse,
};
use async_trait::async_trait;
use mcp_chat_application::{ChatBackend, GatewayError};
use mcp_chat_domain::{Model, Prompt, RoleTranscripts, ServerRegistration, ThreadId};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

/// Talks to the chat backend over HTTP.
///
/// Every endpoint is resolved against `base_url`. Any transport error,
/// non-2xx status or undecodable body is reported as a [`GatewayError`].
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: Client,
    base_url: Url,
}

impl HttpChatBackend {
    /// Create a backend client. With `timeout` set, each request is bounded
    /// by it; otherwise requests wait indefinitely.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// `base_url` with `segments` appended as percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::Transport(format!("cannot route from {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GatewayError> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(transport)?;
        decode(check_status(response)?).await
    }

    async fn post_json<B: Serialize>(&self, segments: &[&str], body: &B) -> Result<(), GatewayError> {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response)?;
        // The acknowledgement body carries nothing the client uses
        let body = response.text().await.map_err(transport)?;
        trace!("POST response: {}", body);
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        debug!("{} returned {}", response.url(), status);
        Err(GatewayError::Status(status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|e| GatewayError::MalformedPayload(e.to_string()))
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn list_thread_ids(&self) -> Result<Vec<ThreadId>, GatewayError> {
        let response: ThreadIdsResponse = self.get_json(&["threadid"]).await?;
        Ok(response.thread_ids.into_iter().map(ThreadId::new).collect())
    }

    async fn list_models(&self) -> Result<Vec<Model>, GatewayError> {
        let response: ModelListResponse = self.get_json(&["model_list"]).await?;
        Ok(response.model_list.into_iter().map(Model::new).collect())
    }

    async fn list_servers(&self) -> Result<Vec<String>, GatewayError> {
        let response: ServerNamesResponse = self.get_json(&["server_names"]).await?;
        Ok(response.mcpserver_names)
    }

    async fn fetch_messages(&self, thread_id: &ThreadId) -> Result<RoleTranscripts, GatewayError> {
        let response: MessagesResponse = self
            .get_json(&["messages", thread_id.as_str()])
            .await?;
        Ok(response.into())
    }

    async fn send_prompt(
        &self,
        thread_id: &ThreadId,
        model: &Model,
        prompt: &Prompt,
    ) -> Result<(), GatewayError> {
        let request = GenerateRequest {
            user_prompt: prompt.content(),
            model_name: model.as_str(),
            chat_name: thread_id.as_str(),
        };
        self.post_json(&["generate"], &request).await
    }

    async fn register_server(&self, registration: &ServerRegistration) -> Result<(), GatewayError> {
        let request = AddServerRequest {
            server_name: registration.name(),
            url: registration.url(),
        };
        self.post_json(&["add_mcp"], &request).await
    }
}
