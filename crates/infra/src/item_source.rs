//! HTTP catalog source backed by the ERP inventory endpoints.

use async_trait::async_trait;
use serde::Deserialize;

use stocktake_core::{DomainError, ItemCode, Quantity};
use stocktake_inventory::{
    InventoryItem, InventorySnapshot, ItemCategory, ItemSource, SourceError,
};

use crate::credentials::TokenProvider;

/// Fetches the known-items catalog over HTTP.
///
/// Raw materials and finished goods live on separate endpoints; both answer
/// a JSON array of items.
pub struct HttpItemSource<P> {
    client: reqwest::Client,
    base_url: String,
    tokens: P,
}

impl<P> HttpItemSource<P> {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, tokens: P) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }
}

fn endpoint(category: ItemCategory) -> &'static str {
    match category {
        ItemCategory::RawMaterial => "api/materials",
        ItemCategory::FinishedGood => "api/products",
    }
}

#[derive(Debug, Deserialize)]
struct ItemDto {
    id: String,
    name: String,
    quantity: f64,
    unit: String,
    #[serde(default)]
    min_level: Option<f64>,
    #[serde(default)]
    max_level: Option<f64>,
    #[serde(default)]
    sku: Option<String>,
}

impl TryFrom<ItemDto> for InventoryItem {
    type Error = DomainError;

    fn try_from(dto: ItemDto) -> Result<Self, Self::Error> {
        let mut item = InventoryItem::new(
            ItemCode::new(dto.id)?,
            dto.name,
            Quantity::new(dto.quantity)?,
            dto.unit,
        )?;
        if let Some(min_level) = dto.min_level {
            item = item.with_min_level(Quantity::new(min_level)?);
        }
        if let Some(max_level) = dto.max_level {
            item = item.with_max_level(Quantity::new(max_level)?);
        }
        if let Some(sku) = dto.sku {
            item = item.with_sku(sku);
        }
        Ok(item)
    }
}

#[async_trait]
impl<P> ItemSource for HttpItemSource<P>
where
    P: TokenProvider,
{
    async fn fetch(&self, category: ItemCategory) -> Result<InventorySnapshot, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint(category));

        let mut request = self.client.get(&url);
        if let Some(token) = self.tokens.token() {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Transport(format!(
                "{url} answered HTTP {}: {body}",
                status.as_u16()
            )));
        }

        let dtos: Vec<ItemDto> = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        let mut items = Vec::with_capacity(dtos.len());
        for dto in dtos {
            items.push(InventoryItem::try_from(dto)?);
        }

        tracing::debug!(?category, items = items.len(), "fetched item catalog");
        Ok(InventorySnapshot::new(items))
    }
}
