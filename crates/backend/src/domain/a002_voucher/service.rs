use super::repository;
use contracts::domain::a002_voucher::aggregate::Voucher;
use serde_json::{Map, Value};

use crate::shared::data::json_store::get_store;

pub async fn create(body: Map<String, Value>) -> anyhow::Result<Voucher> {
    repository::insert(get_store()?, body).await
}

pub async fn patch(id: i64, changes: Map<String, Value>) -> anyhow::Result<Option<Voucher>> {
    repository::patch(get_store()?, id, changes).await
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    repository::delete(get_store()?, id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Voucher>> {
    repository::list_all(get_store()?).await
}
