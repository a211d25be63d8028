use super::CartDataSource;
use crate::cart_item::CartItem;
use crate::error::CartResult as Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// JSON 文件数据源：文件内容为条目数组
///
/// ```json
/// [{ "id": 1, "amount": 2, "product": { "id": 1, "price": "10.00", "name": "Mug" } }]
/// ```
#[derive(Clone, Debug)]
pub struct JsonFileCartDataSource {
    path: PathBuf,
}

impl JsonFileCartDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CartDataSource for JsonFileCartDataSource {
    async fn fetch_all(&self) -> Result<Vec<CartItem>> {
        let raw = tokio::fs::read(&self.path).await?;
        let items: Vec<CartItem> = serde_json::from_slice(&raw)?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "read stored cart items");
        Ok(items)
    }
}
