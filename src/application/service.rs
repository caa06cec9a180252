use crate::domain::account::{Account, ListQuery, SortDirection};
use crate::domain::ports::SharedAccountStore;
use crate::error::{AccountError, Result};

/// Listing inputs as they arrive from the transport layer.
///
/// `limit` and `page` are raw values: zero means "unset" and is resolved
/// here, not by the caller.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub product: Option<String>,
    pub order_by: Option<String>,
    pub limit: i64,
    pub page: i64,
}

/// A resolved listing: one page of records plus the totals derived from
/// the full filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub accounts: Vec<Account>,
    pub total: u64,
    pub total_pages: u64,
}

/// Orchestrates the account use-cases over the storage port.
///
/// Each call dispatches at most one store operation; errors propagate
/// unchanged and nothing is retried.
#[derive(Clone)]
pub struct AccountService {
    store: SharedAccountStore,
    default_limit: i64,
}

impl AccountService {
    pub fn new(store: SharedAccountStore, default_limit: i64) -> Self {
        Self {
            store,
            default_limit,
        }
    }

    pub async fn create(&self, account: Account) -> Result<()> {
        self.store.insert(account).await
    }

    pub async fn detail(&self, account_id: i64) -> Result<Account> {
        self.store.find(account_id).await
    }

    /// Resolves the pagination window, validates the sort token, and runs
    /// the combined count-and-page query.
    pub async fn list(&self, request: ListRequest) -> Result<Listing> {
        if request.limit < 0 {
            return Err(AccountError::Validation(
                "limit must not be negative".to_owned(),
            ));
        }

        let limit = if request.limit == 0 {
            self.default_limit
        } else {
            request.limit
        };

        let sort = SortDirection::parse(request.order_by.as_deref().unwrap_or(""))?;
        let offset = offset_for(request.page, limit);

        let product = request.product.filter(|p| !p.is_empty());
        let page = self
            .store
            .list(ListQuery {
                product,
                sort,
                limit,
                offset,
            })
            .await?;

        let total_pages = total_pages(page.total, limit);
        Ok(Listing {
            accounts: page.accounts,
            total: page.total,
            total_pages,
        })
    }

    /// Fetch-then-replace; the identifier itself is immutable.
    pub async fn update(&self, account_id: i64, limit: i64, products: Vec<String>) -> Result<()> {
        let mut account = self.store.find(account_id).await?;
        account.limit = limit;
        account.products = products;
        self.store.replace(account).await
    }

    pub async fn delete(&self, account_id: i64) -> Result<()> {
        self.store.remove(account_id).await
    }
}

/// First page (and any page <= 0) starts at offset 0.
fn offset_for(page: i64, limit: i64) -> i64 {
    if page > 0 { (page - 1) * limit } else { 0 }
}

/// Integer ceiling of `total / limit`; zero when the limit is zero.
fn total_pages(total: u64, limit: i64) -> u64 {
    if limit <= 0 {
        return 0;
    }
    let limit = limit as u64;
    total / limit + u64::from(total % limit != 0)
}
