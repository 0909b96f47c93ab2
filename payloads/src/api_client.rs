use crate::{
    ApiResource, Featurable, NodeId, SubjectId, requests,
    responses::{self, Envelope, ListPage},
};
use reqwest::{RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Upper bound on the pages [`APIClient::list_all`] requests.
pub const MAX_LIST_ALL_PAGES: u32 = 50;

/// Shown when neither the server nor the transport gave anything better.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// An API client for interfacing with the backend.
///
/// The bearer token is handed in explicitly by whoever owns the session;
/// the client never reads browser storage itself.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    pub token: Option<String>,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/admin/{path}", &self.address)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get(&self, path: &str, query: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);
        self.authorize(request).send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.authorize(request).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);
        self.authorize(request).send().await
    }

    async fn empty_patch(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.patch(self.format_url(path));
        self.authorize(request).send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));
        self.authorize(request).send().await
    }
}

/// Session endpoints
impl APIClient {
    /// Exchange credentials for a bearer token and the admin's profile.
    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<responses::LoginResponse, ClientError> {
        let response = self.post("auth/login", details).await?;
        ok_data(response).await
    }

    /// Profile of the admin owning the current token.
    pub async fn profile(
        &self,
    ) -> Result<responses::AdminProfile, ClientError> {
        let response = self.empty_get("auth/profile").await?;
        ok_data(response).await
    }

    pub async fn dashboard_stats(
        &self,
    ) -> Result<responses::DashboardStats, ClientError> {
        let response = self.empty_get("stats").await?;
        ok_data(response).await
    }
}

/// Generic collection endpoints
impl APIClient {
    pub async fn list<R: ApiResource>(
        &self,
        query: &requests::ListQuery,
    ) -> Result<ListPage<R>, ClientError> {
        let response = self.get(R::PATH, query).await?;
        ok_page(response).await
    }

    /// Every record matching `query`, following pagination page by page.
    pub async fn list_all<R: ApiResource>(
        &self,
        query: &requests::ListQuery,
    ) -> Result<Vec<R>, ClientError> {
        let mut query = query.clone();
        let mut items = Vec::new();
        for _ in 0..MAX_LIST_ALL_PAGES {
            let page = self.list::<R>(&query).await?;
            items.extend(page.items);
            match query.next_page(page.pagination.as_ref()) {
                Some(next) => query = next,
                None => return Ok(items),
            }
        }
        tracing::warn!(
            "Stopped listing {} after {MAX_LIST_ALL_PAGES} pages",
            R::PATH
        );
        Ok(items)
    }

    pub async fn fetch<R: ApiResource>(
        &self,
        id: &R::Id,
    ) -> Result<R, ClientError> {
        let response = self.empty_get(&format!("{}/{id}", R::PATH)).await?;
        ok_data(response).await
    }

    pub async fn create<R: ApiResource>(
        &self,
        draft: &R::Draft,
    ) -> Result<R, ClientError> {
        let response = self.post(R::PATH, draft).await?;
        ok_data(response).await
    }

    pub async fn update<R: ApiResource>(
        &self,
        id: &R::Id,
        draft: &R::Draft,
    ) -> Result<R, ClientError> {
        let response = self.put(&format!("{}/{id}", R::PATH), draft).await?;
        ok_data(response).await
    }

    /// Delete a record, returning the server's confirmation message.
    pub async fn remove<R: ApiResource>(
        &self,
        id: &R::Id,
    ) -> Result<String, ClientError> {
        let response = self.delete(&format!("{}/{id}", R::PATH)).await?;
        ok_message(response).await
    }

    pub async fn toggle_status<R: ApiResource>(
        &self,
        id: &R::Id,
    ) -> Result<R, ClientError> {
        let response = self
            .empty_patch(&format!("{}/{id}/toggle-status", R::PATH))
            .await?;
        ok_data(response).await
    }

    pub async fn toggle_featured<R: Featurable>(
        &self,
        id: &R::Id,
    ) -> Result<R, ClientError> {
        let response = self
            .empty_patch(&format!("{}/{id}/toggle-featured", R::PATH))
            .await?;
        ok_data(response).await
    }

    /// Raw bytes of a collection export. The payload is handed straight to
    /// the browser as a download and never parsed.
    pub async fn export<R: ApiResource>(
        &self,
        query: &requests::ListQuery,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self.get(&format!("{}/export", R::PATH), query).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(error_from_body(status, &body));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Subject hierarchy endpoints
impl APIClient {
    /// The full forest of a subject, roots in order.
    pub async fn subject_hierarchy(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<responses::HierarchyNode>, ClientError> {
        let response = self
            .empty_get(&format!("subjects/{subject_id}/hierarchy"))
            .await?;
        ok_data(response).await
    }

    pub async fn create_node(
        &self,
        details: &requests::CreateHierarchyNode,
    ) -> Result<responses::HierarchyNode, ClientError> {
        let response = self.post("hierarchy", details).await?;
        ok_data(response).await
    }

    pub async fn update_node(
        &self,
        node_id: &NodeId,
        details: &requests::UpdateHierarchyNode,
    ) -> Result<responses::HierarchyNode, ClientError> {
        let response =
            self.put(&format!("hierarchy/{node_id}"), details).await?;
        ok_data(response).await
    }

    /// Deletes the node; the backend removes its descendants as well.
    pub async fn delete_node(
        &self,
        node_id: &NodeId,
    ) -> Result<String, ClientError> {
        let response = self.delete(&format!("hierarchy/{node_id}")).await?;
        ok_message(response).await
    }

    pub async fn toggle_node_status(
        &self,
        node_id: &NodeId,
    ) -> Result<responses::HierarchyNode, ClientError> {
        let response = self
            .empty_patch(&format!("hierarchy/{node_id}/toggle-status"))
            .await?;
        ok_data(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing the best message
    /// available for the failed request.
    #[error("{1}")]
    APIError(StatusCode, String),
    /// The token is missing, expired or revoked.
    #[error("{0}")]
    Unauthorized(String),
    /// The response did not have the shape the endpoint promises.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// The single human readable string shown to the user.
    ///
    /// Prefers the server supplied message, then the generic description
    /// of the failure, then a fixed fallback.
    pub fn user_message(&self) -> String {
        let message = match self {
            ClientError::APIError(_, message)
            | ClientError::Unauthorized(message) => message.trim().to_string(),
            ClientError::Decode(_) | ClientError::Network(_) => {
                self.to_string()
            }
        };
        if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

/// Pull the `message` field out of an error body, if the body is JSON and
/// carries one.
pub fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value
        .get("message")
        .or_else(|| value.get("error").and_then(|e| e.get("message")))
        .or_else(|| value.get("error"))?
        .as_str()?
        .trim();
    (!message.is_empty()).then(|| message.to_string())
}

fn error_from_body(status: StatusCode, body: &str) -> ClientError {
    let message = server_message(body).unwrap_or_else(|| {
        format!("Request failed with status code {}", status.as_u16())
    });
    if status == StatusCode::UNAUTHORIZED {
        ClientError::Unauthorized(message)
    } else {
        ClientError::APIError(status, message)
    }
}

/// Decode a response body into the shared envelope, mapping non-success
/// statuses and `success: false` bodies into a [`ClientError`].
pub fn decode_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Envelope<T>, ClientError> {
    if !status.is_success() {
        return Err(error_from_body(status, body));
    }

    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to decode response body: {e}");
        ClientError::Decode(e.to_string())
    })?;

    if !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        return Err(ClientError::APIError(status, message));
    }

    Ok(envelope)
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Envelope<T>, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    decode_envelope(status, &body)
}

/// Deserialize the `data` of a successful response into the desired type,
/// or return an appropriate error.
pub async fn ok_data<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    read_envelope::<T>(response).await?.data.ok_or_else(|| {
        ClientError::Decode("response is missing `data`".to_string())
    })
}

/// Deserialize a list response into a page of items.
pub async fn ok_page<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ListPage<T>, ClientError> {
    let envelope = read_envelope::<Vec<T>>(response).await?;
    Ok(ListPage {
        items: envelope.data.unwrap_or_default(),
        pagination: envelope.pagination,
    })
}

/// Check that a data-less response is OK and hand back its message.
pub async fn ok_message(
    response: reqwest::Response,
) -> Result<String, ClientError> {
    let envelope = read_envelope::<serde_json::Value>(response).await?;
    Ok(envelope.message.unwrap_or_default())
}
