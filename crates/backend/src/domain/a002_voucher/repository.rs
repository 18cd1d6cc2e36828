use contracts::domain::a002_voucher::aggregate::Voucher;
use contracts::domain::common::next_id;
use serde_json::{Map, Value};

use crate::shared::data::json_store::JsonStore;
use crate::shared::errors::ValidationError;

/// All vouchers, soft-deleted ones included.
pub async fn list_all(store: &JsonStore) -> anyhow::Result<Vec<Voucher>> {
    Ok(store.read().await?.vouchers)
}

/// Insert a voucher from a posted JSON object.
pub async fn insert(store: &JsonStore, body: Map<String, Value>) -> anyhow::Result<Voucher> {
    let created = store
        .modify(|db| {
            let voucher =
                Voucher::from_json(body, next_id(&db.vouchers)).map_err(ValidationError)?;
            db.vouchers.push(voucher.clone());
            Ok(Some(voucher))
        })
        .await?;
    created.ok_or_else(|| anyhow::anyhow!("voucher was not inserted"))
}

/// Shallow-merge `changes` into the voucher with this id.
pub async fn patch(
    store: &JsonStore,
    id: i64,
    changes: Map<String, Value>,
) -> anyhow::Result<Option<Voucher>> {
    store
        .modify(|db| {
            let Some(voucher) = db.vouchers.iter_mut().find(|v| v.id == id) else {
                return Ok(None);
            };
            let merged = voucher.merged(changes).map_err(ValidationError)?;
            *voucher = merged.clone();
            Ok(Some(merged))
        })
        .await
}

/// Returns `false` when no voucher has this id.
pub async fn delete(store: &JsonStore, id: i64) -> anyhow::Result<bool> {
    let removed = store
        .modify(|db| {
            let before = db.vouchers.len();
            db.vouchers.retain(|v| v.id != id);
            Ok((db.vouchers.len() != before).then_some(()))
        })
        .await?;
    Ok(removed.is_some())
}
