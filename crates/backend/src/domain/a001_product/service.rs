use super::repository;
use contracts::domain::a001_product::aggregate::{Product, ProductDto};

use crate::shared::data::json_store::get_store;

pub async fn create(dto: ProductDto) -> anyhow::Result<Product> {
    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    repository::insert(get_store()?, dto, now).await
}

pub async fn update(id: i64, dto: ProductDto) -> anyhow::Result<Option<Product>> {
    repository::update(get_store()?, id, &dto).await
}

pub async fn delete(id: i64) -> anyhow::Result<bool> {
    repository::delete(get_store()?, id).await
}

pub async fn get_by_id(id: i64) -> anyhow::Result<Option<Product>> {
    repository::get_by_id(get_store()?, id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    repository::list_all(get_store()?).await
}
