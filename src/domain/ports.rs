use super::account::{Account, ListPage, ListQuery};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Storage port for account records.
///
/// `find`, `replace` and `remove` surface `AccountError::NotFound` when
/// the identifier has no record; `insert` surfaces
/// `AccountError::DuplicateKey` when it already has one.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn insert(&self, account: Account) -> Result<()>;
    async fn find(&self, account_id: i64) -> Result<Account>;
    /// Runs the count branch and the windowed data branch against one
    /// consistent filtered view of the collection.
    async fn list(&self, query: ListQuery) -> Result<ListPage>;
    async fn replace(&self, account: Account) -> Result<()>;
    async fn remove(&self, account_id: i64) -> Result<()>;
}

pub type SharedAccountStore = Arc<dyn AccountStore>;
