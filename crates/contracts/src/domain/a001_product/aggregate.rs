use crate::domain::common::AggregateRoot;
use crate::shared::lenient;
use serde::{Deserialize, Serialize};

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Unit price
    #[serde(
        default,
        deserialize_with = "lenient::amount",
        serialize_with = "lenient::serialize_amount"
    )]
    pub price: f64,
    /// RFC 3339 creation time
    #[serde(default)]
    pub created_at: String,
}

impl Product {
    pub fn new_for_insert(id: i64, dto: ProductDto, now: String) -> Self {
        Self {
            id,
            name: dto.name,
            price: dto.price,
            created_at: dto.created_at.unwrap_or(now),
        }
    }

    /// Replaces name and price; keeps the creation time unless one is given.
    pub fn update(&mut self, dto: &ProductDto) {
        self.name = dto.name.clone();
        self.price = dto.price;
        if let Some(created_at) = &dto.created_at {
            self.created_at = created_at.clone();
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name must not be empty".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Product price must be a non-negative number".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Product {
    fn id(&self) -> i64 {
        self.id
    }
    fn aggregate_index() -> &'static str {
        "a001"
    }
    fn collection_name() -> &'static str {
        "products"
    }
    fn element_name() -> &'static str {
        "Product"
    }
    fn list_name() -> &'static str {
        "Products"
    }
}

// =============================================================================
// DTO
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductDto {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: f64,
    pub created_at: Option<String>,
}
