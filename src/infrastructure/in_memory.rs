use crate::domain::account::{Account, ListPage, ListQuery, SortDirection};
use crate::domain::ports::AccountStore;
use crate::error::{AccountError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for account records.
///
/// Keeps insertion order so that an unsorted listing mirrors the
/// collection's natural order. Intended for tests and local development;
/// it follows the same filter, sort, and windowing semantics as the
/// MongoDB adapter.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts directly, bypassing duplicate checks. Test setup helper.
    pub async fn seed(&self, account: Account) {
        self.accounts.write().await.push(account);
    }
}

fn window(offset: i64, limit: i64) -> (usize, usize) {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    (offset, limit)
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.account_id == account.account_id) {
            return Err(AccountError::DuplicateKey(account.account_id));
        }
        accounts.push(account);
        Ok(())
    }

    async fn find(&self, account_id: i64) -> Result<Account> {
        let accounts = self.accounts.read().await;
        accounts
            .iter()
            .find(|a| a.account_id == account_id)
            .cloned()
            .ok_or(AccountError::NotFound(account_id))
    }

    async fn list(&self, query: ListQuery) -> Result<ListPage> {
        let accounts = self.accounts.read().await;
        let mut matching: Vec<Account> = accounts
            .iter()
            .filter(|a| match &query.product {
                Some(product) => a.products.iter().any(|p| p == product),
                None => true,
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;

        match query.sort {
            Some(SortDirection::Ascending) => matching.sort_by_key(|a| a.account_id),
            Some(SortDirection::Descending) => {
                matching.sort_by_key(|a| std::cmp::Reverse(a.account_id));
            }
            None => {}
        }

        let (offset, limit) = window(query.offset, query.limit);
        let accounts = matching.into_iter().skip(offset).take(limit).collect();

        Ok(ListPage { accounts, total })
    }

    async fn replace(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        match accounts
            .iter_mut()
            .find(|a| a.account_id == account.account_id)
        {
            Some(existing) => {
                *existing = account;
                Ok(())
            }
            None => Err(AccountError::NotFound(account.account_id)),
        }
    }

    async fn remove(&self, account_id: i64) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| a.account_id != account_id);
        if accounts.len() == before {
            return Err(AccountError::NotFound(account_id));
        }
        Ok(())
    }
}
