use contracts::domain::a001_product::aggregate::{Product, ProductDto};
use contracts::domain::common::next_id;

use crate::shared::data::json_store::JsonStore;
use crate::shared::errors::ValidationError;

pub async fn list_all(store: &JsonStore) -> anyhow::Result<Vec<Product>> {
    Ok(store.read().await?.products)
}

pub async fn get_by_id(store: &JsonStore, id: i64) -> anyhow::Result<Option<Product>> {
    Ok(store
        .read()
        .await?
        .products
        .into_iter()
        .find(|p| p.id == id))
}

/// Insert a new product; the id is taken from the DTO or allocated.
pub async fn insert(store: &JsonStore, dto: ProductDto, now: String) -> anyhow::Result<Product> {
    let created = store
        .modify(|db| {
            let id = dto.id.unwrap_or_else(|| next_id(&db.products));
            let product = Product::new_for_insert(id, dto, now);
            product.validate().map_err(ValidationError)?;
            db.products.push(product.clone());
            Ok(Some(product))
        })
        .await?;
    created.ok_or_else(|| anyhow::anyhow!("product was not inserted"))
}

pub async fn update(
    store: &JsonStore,
    id: i64,
    dto: &ProductDto,
) -> anyhow::Result<Option<Product>> {
    store
        .modify(|db| {
            let Some(product) = db.products.iter_mut().find(|p| p.id == id) else {
                return Ok(None);
            };
            let mut updated = product.clone();
            updated.update(dto);
            updated.validate().map_err(ValidationError)?;
            *product = updated.clone();
            Ok(Some(updated))
        })
        .await
}

/// Returns `false` when no product has this id.
pub async fn delete(store: &JsonStore, id: i64) -> anyhow::Result<bool> {
    let removed = store
        .modify(|db| {
            let before = db.products.len();
            db.products.retain(|p| p.id != id);
            Ok((db.products.len() != before).then_some(()))
        })
        .await?;
    Ok(removed.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::json_store::tests::temp_store;
    use crate::shared::errors::is_validation_error;

    const NOW: &str = "2024-03-01T00:00:00Z";

    fn dto(name: &str, price: f64) -> ProductDto {
        ProductDto {
            name: name.to_string(),
            price,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_allocates_sequential_ids() {
        let store = temp_store().await;
        let first = insert(&store, dto("Tea", 500.0), NOW.to_string()).await.unwrap();
        let second = insert(&store, dto("Rice", 12000.0), NOW.to_string()).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.created_at, NOW);
        assert_eq!(list_all(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_product() {
        let store = temp_store().await;
        let err = insert(&store, dto("", 10.0), NOW.to_string()).await.unwrap_err();
        assert!(is_validation_error(&err));
        assert!(list_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = temp_store().await;
        let product = insert(&store, dto("Tea", 500.0), NOW.to_string()).await.unwrap();

        let updated = update(&store, product.id, &dto("Milk tea", 800.0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Milk tea");
        assert_eq!(updated.created_at, NOW);
        assert_eq!(get_by_id(&store, product.id).await.unwrap(), Some(updated));

        assert!(update(&store, 42, &dto("Ghost", 1.0)).await.unwrap().is_none());

        assert!(delete(&store, product.id).await.unwrap());
        assert!(!delete(&store, product.id).await.unwrap());
        assert_eq!(get_by_id(&store, product.id).await.unwrap(), None);
    }
}
