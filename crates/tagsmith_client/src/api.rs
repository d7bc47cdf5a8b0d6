use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::stream::{consume_process_stream, ProgressSink};
use crate::{
    HistoryDraft, HistoryItem, ItemId, ProcessError, ProcessFailureKind, ProcessRequest,
    PromptsConfig, SaveAck, StoreError, TitlePatch,
};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Typed wrapper over the backend HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: reqwest::Url,
    client: reqwest::Client,
    settings: ApiSettings,
}

impl ApiClient {
    pub fn new(base_url: &str, settings: ApiSettings) -> Result<Self, StoreError> {
        let base =
            reqwest::Url::parse(base_url).map_err(|err| StoreError::BaseUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| StoreError::Network(err.to_string()))?;
        Ok(Self {
            base,
            client,
            settings,
        })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, StoreError> {
        self.base
            .join(path)
            .map_err(|err| StoreError::BaseUrl(err.to_string()))
    }

    /// `GET /api/history`, newest first as the server orders it.
    pub async fn fetch_history(&self) -> Result<Vec<HistoryItem>, StoreError> {
        let response = self
            .client
            .get(self.endpoint("/api/history")?)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_store_error)?;
        let response = check_status(response)?;
        response
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))
    }

    /// `POST /api/history`; returns the created item with its id.
    pub async fn save_history(&self, draft: &HistoryDraft) -> Result<HistoryItem, StoreError> {
        let response = self
            .client
            .post(self.endpoint("/api/history")?)
            .timeout(self.settings.request_timeout)
            .json(draft)
            .send()
            .await
            .map_err(map_store_error)?;
        let response = check_status(response)?;
        response
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))
    }

    /// `PUT /api/history/{id}`; the response body is ignored.
    pub async fn update_title(&self, id: ItemId, title: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.endpoint(&format!("/api/history/{id}"))?)
            .timeout(self.settings.request_timeout)
            .json(&TitlePatch {
                title: title.to_string(),
            })
            .send()
            .await
            .map_err(map_store_error)?;
        check_status(response)?;
        Ok(())
    }

    /// `DELETE /api/history/{id}`.
    pub async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/api/history/{id}"))?)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_store_error)?;
        check_status(response)?;
        Ok(())
    }

    /// `GET /api/prompts`.
    pub async fn fetch_prompts(&self) -> Result<PromptsConfig, StoreError> {
        let response = self
            .client
            .get(self.endpoint("/api/prompts")?)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_store_error)?;
        let response = check_status(response)?;
        response
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))
    }

    /// `POST /api/prompts`; an acknowledgement whose `status` is not
    /// `"success"` is a rejection carrying the server's message.
    pub async fn save_prompts(&self, prompts: &PromptsConfig) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.endpoint("/api/prompts")?)
            .timeout(self.settings.request_timeout)
            .json(prompts)
            .send()
            .await
            .map_err(map_store_error)?;
        let response = check_status(response)?;
        let ack: SaveAck = response
            .json()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        if ack.status == "success" {
            Ok(())
        } else {
            Err(StoreError::Rejected(
                ack.message.unwrap_or(ack.status),
            ))
        }
    }

    /// `POST /api/process`: one request/response exchange whose body is
    /// consumed incrementally. No total timeout is applied here; the stream
    /// legitimately runs for as long as the pipeline takes.
    pub async fn process(
        &self,
        request: &ProcessRequest,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<String, ProcessError> {
        if request.content.trim().is_empty() {
            return Err(ProcessError::new(
                ProcessFailureKind::EmptyInput,
                "content is empty after trimming",
            ));
        }

        let url = self
            .endpoint("/api/process")
            .map_err(|err| ProcessError::new(ProcessFailureKind::Connection, err.to_string()))?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|err| ProcessError::new(ProcessFailureKind::Connection, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProcessError::new(
                ProcessFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        consume_process_stream(response, sink, cancel).await
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StoreError::Status(status.as_u16()))
    }
}

fn map_store_error(err: reqwest::Error) -> StoreError {
    StoreError::Network(err.to_string())
}
