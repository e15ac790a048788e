//! HTTP adapter for the bulk stock update endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stocktake_commit::{CommitReceipt, StockWriteError, StockWriter};
use stocktake_reconcile::StockAdjustment;

use crate::credentials::TokenProvider;

/// Applies reviewed batches through `POST /api/inventory/bulk-update`.
pub struct HttpStockWriter<P> {
    client: reqwest::Client,
    base_url: String,
    tokens: P,
}

impl<P> HttpStockWriter<P> {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, tokens: P) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct BulkUpdateRequest<'a> {
    updates: Vec<UpdateDto<'a>>,
}

/// Wire row: the store wants the target quantity, not the delta.
#[derive(Debug, Serialize)]
struct UpdateDto<'a> {
    id: &'a str,
    quantity: f64,
}

#[derive(Debug, Deserialize)]
struct BulkUpdateResponse {
    applied: usize,
}

fn wire_body(updates: &[StockAdjustment]) -> BulkUpdateRequest<'_> {
    BulkUpdateRequest {
        updates: updates
            .iter()
            .map(|adjustment| UpdateDto {
                id: adjustment.code.as_str(),
                quantity: adjustment.requested.value(),
            })
            .collect(),
    }
}

#[async_trait]
impl<P> StockWriter for HttpStockWriter<P>
where
    P: TokenProvider,
{
    async fn apply_updates(
        &self,
        updates: &[StockAdjustment],
    ) -> Result<CommitReceipt, StockWriteError> {
        let url = format!("{}/api/inventory/bulk-update", self.base_url);

        let mut request = self.client.post(&url).json(&wire_body(updates));
        if let Some(token) = self.tokens.token() {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| StockWriteError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StockWriteError::Rejected(format!(
                "HTTP {}: {body}",
                status.as_u16()
            )));
        }

        // A success status means the batch landed. A receipt body that does
        // not decode must not surface as a failure: the caller would retry
        // and double-apply.
        let applied = match response.json::<BulkUpdateResponse>().await {
            Ok(receipt) => receipt.applied,
            Err(_) => updates.len(),
        };

        tracing::info!(applied, "bulk stock update accepted");
        Ok(CommitReceipt { applied })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stocktake_core::{ItemCode, Quantity};

    #[test]
    fn the_request_body_carries_target_quantities() {
        let updates = vec![StockAdjustment {
            code: ItemCode::new("RM001").unwrap(),
            name: "Steel Rod".to_string(),
            unit: "kg".to_string(),
            current: Quantity::new(150.0).unwrap(),
            requested: Quantity::new(140.0).unwrap(),
            delta: -10.0,
            warning: None,
        }];

        let encoded = serde_json::to_value(wire_body(&updates)).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({ "updates": [{ "id": "RM001", "quantity": 140.0 }] })
        );
    }

    #[test]
    fn an_empty_batch_still_encodes_as_a_list() {
        let encoded = serde_json::to_value(wire_body(&[])).unwrap();
        assert_eq!(encoded, serde_json::json!({ "updates": [] }));
    }
}
