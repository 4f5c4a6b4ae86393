//! reqwest-backed gateway for the inventory and stats backends.

use super::{BackendFlavor, InventoryGateway, StatsGateway};
use crate::domain::model::{ChartData, DailySales, DashboardStats, SalesTotal, StockDraft, StockItem};
use crate::error::AppError;
use crate::infra::auth::SessionProvider;
use crate::infra::config;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub flavor: BackendFlavor,
    pub page_limit: u32,
    pub timeout: Option<Duration>,
}

impl GatewaySettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            flavor: BackendFlavor::Flat,
            page_limit: 50,
            timeout: Some(Duration::from_secs(10)),
        }
    }

    pub fn from_env() -> Self {
        Self {
            base_url: config::backend_base_url(),
            flavor: config::backend_flavor(),
            page_limit: config::page_limit(),
            timeout: config::request_timeout(),
        }
    }
}

/// List payloads come either as a bare array or wrapped in a page envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload {
    Flat(Vec<StockItem>),
    Page(PageEnvelope),
}

#[derive(Deserialize)]
struct PageEnvelope {
    #[serde(alias = "items", alias = "stocks")]
    data: Vec<StockItem>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

pub struct HttpGateway {
    client: reqwest::Client,
    settings: GatewaySettings,
    session: Option<Arc<dyn SessionProvider>>,
}

impl HttpGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            settings,
            session: None,
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(GatewaySettings::from_env())
    }

    /// Attaches a session; every mutating call then requires its bearer token.
    pub fn with_session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url, path)
    }

    fn item_url(&self, id: &str) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.url(self.settings.flavor.collection_path()))
            .map_err(|e| AppError::Network(format!("Invalid backend URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Network("Backend URL cannot carry a path".to_string()))?
            .push(id);
        Ok(url)
    }

    async fn authorize(&self, req: RequestBuilder) -> Result<RequestBuilder, AppError> {
        match &self.session {
            Some(session) => Ok(req.bearer_auth(session.bearer_token().await?)),
            None => Ok(req),
        }
    }

    /// Sends the request and turns non-2xx answers into `AppError::Http`.
    async fn send(&self, req: RequestBuilder) -> Result<Response, AppError> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(error = %e, "backend request failed");
            AppError::from(e)
        })?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or(text);
        tracing::warn!(status = status.as_u16(), %message, "backend returned an error status");
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, AppError> {
        let bytes = resp.bytes().await.map_err(AppError::from)?;
        serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let resp = self.send(self.client.get(self.url(path)).query(query)).await?;
        Self::decode(resp).await
    }

    async fn list_flat(&self) -> Result<Vec<StockItem>, AppError> {
        let payload: ListPayload = self.get_json(BackendFlavor::Flat.collection_path(), &[]).await?;
        Ok(match payload {
            ListPayload::Flat(items) => items,
            ListPayload::Page(page) => page.data,
        })
    }

    async fn list_paginated(&self) -> Result<Vec<StockItem>, AppError> {
        let limit = self.settings.page_limit;
        let mut out: Vec<StockItem> = Vec::new();
        let mut page: u32 = 1;
        loop {
            let payload: ListPayload = self
                .get_json(
                    BackendFlavor::Paginated.collection_path(),
                    &[("page", page.to_string()), ("limit", limit.to_string())],
                )
                .await?;
            let (batch, total) = match payload {
                // A backend ignoring the paging parameters sent everything at once.
                ListPayload::Flat(items) => {
                    out.extend(items);
                    return Ok(out);
                }
                ListPayload::Page(p) => (p.data, p.total),
            };
            let short_page = (batch.len() as u32) < limit;
            out.extend(batch);
            let reached_total = total.map(|t| out.len() as u64 >= t).unwrap_or(false);
            if short_page || reached_total {
                tracing::debug!(pages = page, items = out.len(), "paginated listing complete");
                return Ok(out);
            }
            page += 1;
        }
    }
}

#[async_trait]
impl InventoryGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<StockItem>, AppError> {
        match self.settings.flavor {
            BackendFlavor::Flat => self.list_flat().await,
            BackendFlavor::Paginated => self.list_paginated().await,
        }
    }

    async fn create(&self, draft: &StockDraft) -> Result<StockItem, AppError> {
        let req = self
            .client
            .post(self.url(self.settings.flavor.collection_path()))
            .json(draft);
        let req = self.authorize(req).await?;
        let created: StockItem = Self::decode(self.send(req).await?).await?;
        tracing::info!(id = %created.id, name = %created.name, "stock item created");
        Ok(created)
    }

    async fn update(&self, id: &str, draft: &StockDraft) -> Result<Option<StockItem>, AppError> {
        let req = self.client.put(self.item_url(id)?).json(draft);
        let req = self.authorize(req).await?;
        let resp = self.send(req).await?;
        let bytes = resp.bytes().await.map_err(AppError::from)?;
        tracing::info!(id, "stock item updated");
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let req = match self.settings.flavor {
            BackendFlavor::Flat => self.client.delete(self.item_url(id)?),
            BackendFlavor::Paginated => self
                .client
                .delete(self.url(BackendFlavor::Paginated.collection_path()))
                .json(&serde_json::json!({ "issueId": id })),
        };
        let req = self.authorize(req).await?;
        self.send(req).await?;
        tracing::info!(id, "stock item deleted");
        Ok(())
    }
}

#[async_trait]
impl StatsGateway for HttpGateway {
    async fn stats(&self) -> Result<DashboardStats, AppError> {
        self.get_json("/api/dashboard/stats", &[]).await
    }

    async fn charts(&self) -> Result<ChartData, AppError> {
        self.get_json("/api/dashboard/charts", &[]).await
    }

    async fn recent_sales(&self, days: u32) -> Result<Vec<DailySales>, AppError> {
        self.get_json("/api/sales", &[("days", days.to_string())]).await
    }

    async fn sales_total(&self, period: Option<&str>) -> Result<SalesTotal, AppError> {
        let query: Vec<(&str, String)> = period.map(|p| ("period", p.to_string())).into_iter().collect();
        self.get_json("/api/sales/total_sales", &query).await
    }
}
