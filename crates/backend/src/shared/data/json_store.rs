//! Flat JSON-file store: one document holding every collection, read and
//! rewritten wholesale on each operation.

use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_voucher::aggregate::Voucher;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

static STORE: OnceCell<JsonStore> = OnceCell::new();

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store is not initialized")]
    NotInitialized,
    #[error("store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole content of the store file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub vouchers: Vec<Voucher>,
    /// Top-level keys owned by other tools, written back untouched
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

pub struct JsonStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open the store at `path`, creating parent directories and an empty
    /// document when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let store = Self {
            path,
            lock: Mutex::new(()),
        };
        if !tokio::fs::try_exists(&store.path)
            .await
            .map_err(|source| store.io_error(source))?
        {
            tracing::info!("Creating empty store at {}", store.path.display());
            store.write_unlocked(&Database::default()).await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the whole document
    pub async fn read(&self) -> Result<Database, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Read the document, let `f` change it and write it back.
    ///
    /// The file is rewritten only when `f` returns `Some`; `None` means
    /// nothing changed (e.g. the target record does not exist). A rewrite
    /// re-serializes every record: whole numbers stay integers and unknown
    /// fields are kept, but numeric-string amounts and flags are written in
    /// their parsed form.
    pub async fn modify<T, F>(&self, f: F) -> anyhow::Result<Option<T>>
    where
        F: FnOnce(&mut Database) -> anyhow::Result<Option<T>>,
    {
        let _guard = self.lock.lock().await;
        let mut db = self.read_unlocked().await?;
        let outcome = f(&mut db)?;
        if outcome.is_some() {
            self.write_unlocked(&db).await?;
        }
        Ok(outcome)
    }

    async fn read_unlocked(&self) -> Result<Database, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if raw.trim().is_empty() {
            return Ok(Database::default());
        }
        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write_unlocked(&self, db: &Database) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(db).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Open the store and register it for the services.
pub async fn initialize_store(path: &Path) -> anyhow::Result<()> {
    let store = JsonStore::open(path).await?;
    tracing::info!("Store file: {}", store.path().display());
    STORE
        .set(store)
        .map_err(|_| anyhow::anyhow!("store already initialized"))
}

pub fn get_store() -> Result<&'static JsonStore, StoreError> {
    STORE.get().ok_or(StoreError::NotInitialized)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) async fn temp_store() -> JsonStore {
        let path = std::env::temp_dir()
            .join("shop-backoffice-tests")
            .join(format!("{}.json", uuid::Uuid::new_v4()));
        JsonStore::open(path).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_empty_document() {
        let store = temp_store().await;
        assert!(store.path().exists());
        let db = store.read().await.unwrap();
        assert!(db.products.is_empty());
        assert!(db.vouchers.is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty_document() {
        let store = temp_store().await;
        tokio::fs::write(store.path(), "").await.unwrap();
        assert_eq!(store.read().await.unwrap(), Database::default());
    }

    #[tokio::test]
    async fn test_invalid_json_is_reported() {
        let store = temp_store().await;
        tokio::fs::write(store.path(), "{ not json").await.unwrap();
        assert!(matches!(store.read().await, Err(StoreError::Json { .. })));
    }

    #[tokio::test]
    async fn test_modify_writes_only_on_change() {
        let store = temp_store().await;
        tokio::fs::write(
            store.path(),
            json!({"settings": {"shopName": "Voucher App"}}).to_string(),
        )
        .await
        .unwrap();

        let unchanged: Option<()> = store.modify(|_| Ok(None)).await.unwrap();
        assert!(unchanged.is_none());
        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(!raw.contains('\n'));

        store
            .modify(|db| {
                db.products.push(Product {
                    id: 1,
                    name: "Tea".to_string(),
                    price: 500.0,
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                });
                Ok(Some(()))
            })
            .await
            .unwrap();

        let db = store.read().await.unwrap();
        assert_eq!(db.products.len(), 1);
        assert_eq!(db.other.get("settings"), Some(&json!({"shopName": "Voucher App"})));
    }

    #[tokio::test]
    async fn test_rewrite_keeps_untouched_vouchers_as_stored() {
        let store = temp_store().await;
        let voucher = json!({
            "id": 1,
            "voucherId": "VC-0001",
            "phoneNumber": 912345678,
            "date": 1709294400000_i64,
            "items": [{"name": "Tea", "quantity": 2}],
            "subTotal": 100,
            "tax": 8,
            "taxRate": 8,
            "grandTotal": 108,
            "note": "regular"
        });
        // Numeric strings are the one spelling a rewrite changes
        let stringly = json!({"id": 2, "date": "2024-03-02", "grandTotal": "250"});
        tokio::fs::write(
            store.path(),
            json!({"vouchers": [voucher.clone(), stringly]}).to_string(),
        )
        .await
        .unwrap();

        store
            .modify(|db| {
                db.products.push(Product {
                    id: 1,
                    name: "Tea".to_string(),
                    price: 500.0,
                    created_at: "2024-01-01T00:00:00Z".to_string(),
                });
                Ok(Some(()))
            })
            .await
            .unwrap();

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        let written: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(written["vouchers"][0], voucher);
        assert_eq!(written["vouchers"][1]["grandTotal"], json!(250));
        assert_eq!(written["products"][0]["price"], json!(500));
    }
}
