//! API Client
//!
//! HTTP bindings to the Lost & Found backend. The coordinator only sees the
//! `ItemsApi` trait, so tests can substitute a double for the fetch-backed
//! implementation.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};

use crate::models::{Item, ItemDraft, ItemType};

/// Where the backend lives. Constructed explicitly and handed to the
/// coordinator rather than read from ambient globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Backend served from the page's own origin under `/api`.
    pub fn from_window() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(format!("{origin}/api"))
    }

    fn partition_url(&self, kind: ItemType) -> String {
        format!("{}/items/{}", self.base_url, kind.as_str())
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.base_url, id)
    }
}

/// One failed backend call. Callers collapse these to a fixed per-action
/// message; the variants exist for console diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("bad response body: {0}")]
    Decode(String),
}

impl From<JsValue> for ApiError {
    fn from(err: JsValue) -> Self {
        ApiError::Network(format!("{err:?}"))
    }
}

/// Backend operations the board depends on.
#[async_trait(?Send)]
pub trait ItemsApi {
    /// Fetch every item in one partition.
    async fn list(&self, kind: ItemType) -> Result<Vec<Item>, ApiError>;

    /// Submit a new report to the partition's own endpoint. The server
    /// assigns the id (and image URL if a file was attached) and echoes the
    /// stored record.
    async fn create(
        &self,
        kind: ItemType,
        draft: &ItemDraft,
        image: Option<File>,
    ) -> Result<Item, ApiError>;

    /// Delete one item by id.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// `ItemsApi` over the browser fetch API.
pub struct HttpApi {
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn send(&self, url: &str, init: &RequestInit) -> Result<Response, ApiError> {
        let request = Request::new_with_str_and_init(url, init)?;
        let window =
            web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request)).await?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::Network("fetch did not return a Response".to_string()))?;
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }
        Ok(response)
    }

    async fn json_body<T>(response: Response) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let text = JsFuture::from(response.text()?).await?;
        let text = text
            .as_string()
            .ok_or_else(|| ApiError::Decode("non-string body".to_string()))?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl ItemsApi for HttpApi {
    async fn list(&self, kind: ItemType) -> Result<Vec<Item>, ApiError> {
        let init = RequestInit::new();
        init.set_method("GET");
        let response = self.send(&self.config.partition_url(kind), &init).await?;
        Self::json_body(response).await
    }

    async fn create(
        &self,
        kind: ItemType,
        draft: &ItemDraft,
        image: Option<File>,
    ) -> Result<Item, ApiError> {
        let form = FormData::new()?;
        for (name, value) in draft.form_fields() {
            form.append_with_str(name, value)?;
        }
        if let Some(file) = image {
            form.append_with_blob_and_filename("image", &file, &file.name())?;
        }

        // The browser fills in the multipart content type and boundary.
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        let response = self.send(&self.config.partition_url(kind), &init).await?;
        Self::json_body(response).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let init = RequestInit::new();
        init.set_method("DELETE");
        self.send(&self.config.item_url(id), &init).await?;
        Ok(())
    }
}
